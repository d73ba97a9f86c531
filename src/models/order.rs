//! The shipment order record and its derived fields.
//!
//! An order is created only by bulk CSV import and keyed by its package
//! identifier. The shipping/customs fields are opaque strings populated at
//! import time; the scan workflow overwrites only the scan fields and the
//! derived dimensional weight.
//!
//! Every field is a string, including the numeric-looking ones: measurements
//! are stored and transmitted as decimal strings to tolerate unit ambiguity
//! and preserve the original formatting.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::models::scan::Scan;

/// Divisor for converting cubic dimensions into a billable dimensional weight.
const DIM_DIVISOR: f64 = 139.0;

/// Error raised when a populated dimension field does not parse as a number.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimError {
    #[error("unable to parse {0}")]
    Parse(&'static str),
}

/// A shipment order.
///
/// Serialized field names are camelCase — this is the persisted document
/// shape. The CSV wire format uses its own human-readable labels; see
/// [`crate::transfer::record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    /// Unique package identifier, used as the scan lookup key.
    #[validate(length(min = 1, message = "required"))]
    pub package_id: String,

    // Shipping and customs fields, populated only at import time.
    pub sender_first_name: String,
    pub sender_last_name: String,
    pub sender_business_name: String,
    pub sender_address_line_1: String,
    pub sender_address_line_2: String,
    pub sender_city: String,
    pub sender_province: String,
    pub sender_postal_code: String,
    pub sender_country_code: String,
    pub sender_phone_number: String,
    pub recipient_first_name: String,
    pub recipient_last_name: String,
    pub recipient_business_name: String,
    pub recipient_address_line_1: String,
    pub recipient_address_line_2: String,
    pub recipient_address_line_3: String,
    pub recipient_in_line_translation_address_line_1: String,
    pub recipient_in_line_translation_address_line_2: String,
    pub recipient_city: String,
    pub recipient_province: String,
    pub recipient_postal_code: String,
    pub recipient_country_code: String,
    pub recipient_phone_number: String,
    pub recipient_email_address: String,
    pub package_weight: String,
    pub weight_unit: String,
    pub service_type: String,
    pub rate_type: String,
    pub package_type: String,
    pub package_physical_count: String,
    pub pfc_eel_code: String,
    pub item_id: String,
    pub item_description: String,
    pub unit_value_usd: String,
    pub quantity: String,
    pub country_of_origin: String,

    // Scan-populated fields, empty until a scan occurs.
    pub country: String,
    pub weight: String,
    pub service: String,
    pub length: String,
    pub width: String,
    pub height: String,

    /// Derived dimensional weight, set by [`Order::calculate_dim`].
    pub dim: String,

    pub account: String,
}

/// A batch of orders, in whatever order the backing store returned them.
pub type Orders = Vec<Order>;

impl Order {
    /// Whether this order has been completed.
    ///
    /// Derived from the presence of a shipping service value recorded by a
    /// scan. Recomputed on every call, never cached as a stored flag.
    pub fn is_completed(&self) -> bool {
        !self.service.is_empty()
    }

    /// Compute and set the dimensional weight from the scanned measurements.
    ///
    /// A no-op while any of length/width/height is still empty — that models
    /// "not enough information yet", not a failure. Once all three are
    /// populated, each must parse as a base-10 float; the result is
    /// `(length * width * height) / 139` formatted with two fraction digits.
    pub fn calculate_dim(&mut self) -> Result<(), DimError> {
        if self.length.is_empty() || self.width.is_empty() || self.height.is_empty() {
            return Ok(());
        }

        let length: f64 = self.length.parse().map_err(|_| DimError::Parse("length"))?;
        let width: f64 = self.width.parse().map_err(|_| DimError::Parse("width"))?;
        let height: f64 = self.height.parse().map_err(|_| DimError::Parse("height"))?;

        self.dim = format!("{:.2}", (length * width * height) / DIM_DIVISOR);

        Ok(())
    }

    /// Merge a scan into this order.
    ///
    /// Overwrites the seven scan fields with the scan's values and recomputes
    /// the dimensional weight. No other field is touched, so applying the
    /// same scan twice yields the same order.
    pub fn apply_scan(&mut self, scan: &Scan) -> Result<(), DimError> {
        self.country = scan.country.clone();
        self.weight = scan.weight.clone();
        self.length = scan.length.clone();
        self.width = scan.width.clone();
        self.height = scan.height.clone();
        self.service = scan.service.clone();
        self.account = scan.account.clone();

        self.calculate_dim()
    }
}
