//! CSV wire format for orders.
//!
//! The CSV surface uses fixed, human-readable column labels while the
//! persisted documents use camelCase field names, so a translation record
//! sits at the boundary: [`CsvOrder`] carries the labels, [`Order`] carries
//! the document shape, and the conversions map between them field by field.
//!
//! All cells are strings; numeric-looking columns stay decimal strings so
//! imports round-trip exactly as exported.

use serde::{Deserialize, Serialize};

use crate::models::Order;

/// The fixed export column layout, in order.
///
/// Kept in lockstep with the serde renames on [`CsvOrder`] — a test guards
/// against drift.
pub const CSV_HEADERS: [&str; 45] = [
    "Package ID",
    "Sender First Name",
    "Sender Last Name",
    "Sender Business Name",
    "Sender Address Line 1",
    "Sender Address Line 2",
    "Sender City",
    "Sender Province",
    "Sender Postal Code",
    "Sender Country Code",
    "Sender Phone Number",
    "Recipient First Name",
    "Recipient Last Name",
    "Recipient Business Name",
    "Recipient Address Line 1",
    "Recipient Address Line 2",
    "Recipient Address Line 3",
    "RecipientInLineTranslationAddressLine1",
    "RecipientInLineTranslationAddressLine2",
    "Recipient City",
    "Recipient Province",
    "Recipient Postal Code",
    "Recipient Country Code",
    "Recipient Phone Number",
    "Recipient E-mail Address",
    "Package Weight",
    "Weight Unit",
    "Service Type",
    "Rate Type",
    "Package Type",
    "Package Physical Count",
    "PFC/EEL Code",
    "Item ID",
    "Item Description",
    "Unit Value (USD)",
    "Quantity",
    "Country Of Origin",
    "Country",
    "Weight",
    "Service",
    "Length",
    "Width",
    "Height",
    "DIM",
    "Account",
];

/// One CSV row, mapped by header label.
///
/// Missing columns default to empty so partial sheets (for example an import
/// file without the scan columns) still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOrder {
    #[serde(rename = "Package ID")]
    pub package_id: String,
    #[serde(rename = "Sender First Name")]
    pub sender_first_name: String,
    #[serde(rename = "Sender Last Name")]
    pub sender_last_name: String,
    #[serde(rename = "Sender Business Name")]
    pub sender_business_name: String,
    #[serde(rename = "Sender Address Line 1")]
    pub sender_address_line_1: String,
    #[serde(rename = "Sender Address Line 2")]
    pub sender_address_line_2: String,
    #[serde(rename = "Sender City")]
    pub sender_city: String,
    #[serde(rename = "Sender Province")]
    pub sender_province: String,
    #[serde(rename = "Sender Postal Code")]
    pub sender_postal_code: String,
    #[serde(rename = "Sender Country Code")]
    pub sender_country_code: String,
    #[serde(rename = "Sender Phone Number")]
    pub sender_phone_number: String,
    #[serde(rename = "Recipient First Name")]
    pub recipient_first_name: String,
    #[serde(rename = "Recipient Last Name")]
    pub recipient_last_name: String,
    #[serde(rename = "Recipient Business Name")]
    pub recipient_business_name: String,
    #[serde(rename = "Recipient Address Line 1")]
    pub recipient_address_line_1: String,
    #[serde(rename = "Recipient Address Line 2")]
    pub recipient_address_line_2: String,
    #[serde(rename = "Recipient Address Line 3")]
    pub recipient_address_line_3: String,
    #[serde(rename = "RecipientInLineTranslationAddressLine1")]
    pub recipient_in_line_translation_address_line_1: String,
    #[serde(rename = "RecipientInLineTranslationAddressLine2")]
    pub recipient_in_line_translation_address_line_2: String,
    #[serde(rename = "Recipient City")]
    pub recipient_city: String,
    #[serde(rename = "Recipient Province")]
    pub recipient_province: String,
    #[serde(rename = "Recipient Postal Code")]
    pub recipient_postal_code: String,
    #[serde(rename = "Recipient Country Code")]
    pub recipient_country_code: String,
    #[serde(rename = "Recipient Phone Number")]
    pub recipient_phone_number: String,
    #[serde(rename = "Recipient E-mail Address")]
    pub recipient_email_address: String,
    #[serde(rename = "Package Weight")]
    pub package_weight: String,
    #[serde(rename = "Weight Unit")]
    pub weight_unit: String,
    #[serde(rename = "Service Type")]
    pub service_type: String,
    #[serde(rename = "Rate Type")]
    pub rate_type: String,
    #[serde(rename = "Package Type")]
    pub package_type: String,
    #[serde(rename = "Package Physical Count")]
    pub package_physical_count: String,
    #[serde(rename = "PFC/EEL Code")]
    pub pfc_eel_code: String,
    #[serde(rename = "Item ID")]
    pub item_id: String,
    #[serde(rename = "Item Description")]
    pub item_description: String,
    #[serde(rename = "Unit Value (USD)")]
    pub unit_value_usd: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
    #[serde(rename = "Country Of Origin")]
    pub country_of_origin: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Weight")]
    pub weight: String,
    #[serde(rename = "Service")]
    pub service: String,
    #[serde(rename = "Length")]
    pub length: String,
    #[serde(rename = "Width")]
    pub width: String,
    #[serde(rename = "Height")]
    pub height: String,
    #[serde(rename = "DIM")]
    pub dim: String,
    #[serde(rename = "Account")]
    pub account: String,
}

impl From<CsvOrder> for Order {
    fn from(record: CsvOrder) -> Self {
        Order {
            package_id: record.package_id,
            sender_first_name: record.sender_first_name,
            sender_last_name: record.sender_last_name,
            sender_business_name: record.sender_business_name,
            sender_address_line_1: record.sender_address_line_1,
            sender_address_line_2: record.sender_address_line_2,
            sender_city: record.sender_city,
            sender_province: record.sender_province,
            sender_postal_code: record.sender_postal_code,
            sender_country_code: record.sender_country_code,
            sender_phone_number: record.sender_phone_number,
            recipient_first_name: record.recipient_first_name,
            recipient_last_name: record.recipient_last_name,
            recipient_business_name: record.recipient_business_name,
            recipient_address_line_1: record.recipient_address_line_1,
            recipient_address_line_2: record.recipient_address_line_2,
            recipient_address_line_3: record.recipient_address_line_3,
            recipient_in_line_translation_address_line_1: record
                .recipient_in_line_translation_address_line_1,
            recipient_in_line_translation_address_line_2: record
                .recipient_in_line_translation_address_line_2,
            recipient_city: record.recipient_city,
            recipient_province: record.recipient_province,
            recipient_postal_code: record.recipient_postal_code,
            recipient_country_code: record.recipient_country_code,
            recipient_phone_number: record.recipient_phone_number,
            recipient_email_address: record.recipient_email_address,
            package_weight: record.package_weight,
            weight_unit: record.weight_unit,
            service_type: record.service_type,
            rate_type: record.rate_type,
            package_type: record.package_type,
            package_physical_count: record.package_physical_count,
            pfc_eel_code: record.pfc_eel_code,
            item_id: record.item_id,
            item_description: record.item_description,
            unit_value_usd: record.unit_value_usd,
            quantity: record.quantity,
            country_of_origin: record.country_of_origin,
            country: record.country,
            weight: record.weight,
            service: record.service,
            length: record.length,
            width: record.width,
            height: record.height,
            dim: record.dim,
            account: record.account,
        }
    }
}

impl From<&Order> for CsvOrder {
    fn from(order: &Order) -> Self {
        CsvOrder {
            package_id: order.package_id.clone(),
            sender_first_name: order.sender_first_name.clone(),
            sender_last_name: order.sender_last_name.clone(),
            sender_business_name: order.sender_business_name.clone(),
            sender_address_line_1: order.sender_address_line_1.clone(),
            sender_address_line_2: order.sender_address_line_2.clone(),
            sender_city: order.sender_city.clone(),
            sender_province: order.sender_province.clone(),
            sender_postal_code: order.sender_postal_code.clone(),
            sender_country_code: order.sender_country_code.clone(),
            sender_phone_number: order.sender_phone_number.clone(),
            recipient_first_name: order.recipient_first_name.clone(),
            recipient_last_name: order.recipient_last_name.clone(),
            recipient_business_name: order.recipient_business_name.clone(),
            recipient_address_line_1: order.recipient_address_line_1.clone(),
            recipient_address_line_2: order.recipient_address_line_2.clone(),
            recipient_address_line_3: order.recipient_address_line_3.clone(),
            recipient_in_line_translation_address_line_1: order
                .recipient_in_line_translation_address_line_1
                .clone(),
            recipient_in_line_translation_address_line_2: order
                .recipient_in_line_translation_address_line_2
                .clone(),
            recipient_city: order.recipient_city.clone(),
            recipient_province: order.recipient_province.clone(),
            recipient_postal_code: order.recipient_postal_code.clone(),
            recipient_country_code: order.recipient_country_code.clone(),
            recipient_phone_number: order.recipient_phone_number.clone(),
            recipient_email_address: order.recipient_email_address.clone(),
            package_weight: order.package_weight.clone(),
            weight_unit: order.weight_unit.clone(),
            service_type: order.service_type.clone(),
            rate_type: order.rate_type.clone(),
            package_type: order.package_type.clone(),
            package_physical_count: order.package_physical_count.clone(),
            pfc_eel_code: order.pfc_eel_code.clone(),
            item_id: order.item_id.clone(),
            item_description: order.item_description.clone(),
            unit_value_usd: order.unit_value_usd.clone(),
            quantity: order.quantity.clone(),
            country_of_origin: order.country_of_origin.clone(),
            country: order.country.clone(),
            weight: order.weight.clone(),
            service: order.service.clone(),
            length: order.length.clone(),
            width: order.width.clone(),
            height: order.height.clone(),
            dim: order.dim.clone(),
            account: order.account.clone(),
        }
    }
}
