//! The scan input record and its validation rules.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Input captured at a warehouse scan station, used to update an order.
///
/// A transient record: it is validated, merged into the matching order via
/// [`crate::models::Order::apply_scan`], and never persisted on its own.
/// The barcode is upper-cased when the scan is built from form input, since
/// physical barcode labels are case-insensitive but stored keys are not.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct Scan {
    #[validate(length(min = 1, message = "required"))]
    pub barcode: String,

    #[validate(length(min = 1, message = "required"))]
    pub country: String,

    #[validate(custom(function = positive_number, message = "must be a number greater than zero"))]
    pub weight: String,

    #[validate(custom(function = positive_number, message = "must be a number greater than zero"))]
    pub length: String,

    #[validate(custom(function = positive_number, message = "must be a number greater than zero"))]
    pub width: String,

    #[validate(custom(function = positive_number, message = "must be a number greater than zero"))]
    pub height: String,

    /// Scan date. Required on input but not persisted onto the order.
    #[validate(length(min = 1, message = "required"))]
    pub date: String,

    #[validate(length(min = 1, message = "required"))]
    pub service: String,

    #[validate(length(min = 1, message = "required"))]
    pub account: String,

    /// Parsed from the form but not consulted by the update workflow.
    pub create_new: bool,
}

/// A measurement must parse as a base-10 number strictly greater than zero.
fn positive_number(value: &str) -> Result<(), ValidationError> {
    match value.parse::<f64>() {
        Ok(number) if number > 0.0 => Ok(()),
        _ => Err(ValidationError::new("positive_number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::violations;

    fn valid_scan() -> Scan {
        Scan {
            barcode: "PKG1".to_string(),
            country: "US".to_string(),
            weight: "2.5".to_string(),
            length: "12".to_string(),
            width: "10".to_string(),
            height: "8".to_string(),
            date: "2024-06-01".to_string(),
            service: "EXPRESS".to_string(),
            account: "ACCT-1".to_string(),
            create_new: false,
        }
    }

    #[test]
    fn valid_scan_passes() {
        assert!(valid_scan().validate().is_ok());
    }

    #[test]
    fn empty_barcode_is_rejected() {
        let scan = Scan {
            barcode: String::new(),
            ..valid_scan()
        };

        let errors = scan.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("barcode"));
    }

    #[test]
    fn non_positive_weight_is_rejected() {
        for bad in ["0", "-5", "abc", ""] {
            let scan = Scan {
                weight: bad.to_string(),
                ..valid_scan()
            };

            let errors = scan.validate().unwrap_err();
            assert!(
                errors.field_errors().contains_key("weight"),
                "weight={bad:?} should fail validation"
            );
        }
    }

    #[test]
    fn each_measurement_is_checked() {
        let scan = Scan {
            length: "0".to_string(),
            width: "-1".to_string(),
            height: "tall".to_string(),
            ..valid_scan()
        };

        let errors = scan.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("length"));
        assert!(fields.contains_key("width"));
        assert!(fields.contains_key("height"));
    }

    #[test]
    fn missing_date_is_rejected() {
        let scan = Scan {
            date: String::new(),
            ..valid_scan()
        };

        assert!(scan.validate().is_err());
    }

    #[test]
    fn violations_reports_one_message_per_field() {
        let scan = Scan {
            barcode: String::new(),
            weight: "0".to_string(),
            ..valid_scan()
        };

        let errors = scan.validate().unwrap_err();
        let mut reported = violations(&errors);
        reported.sort();

        let fields: Vec<&str> = reported.iter().map(|(field, _)| field.as_str()).collect();
        assert_eq!(fields, ["barcode", "weight"]);

        let rules: Vec<&str> = reported.iter().map(|(_, rule)| rule.as_str()).collect();
        assert_eq!(rules, ["required", "must be a number greater than zero"]);
    }

    #[test]
    fn positive_number_accepts_decimals() {
        assert!(positive_number("0.1").is_ok());
        assert!(positive_number("139").is_ok());
        assert!(positive_number("0").is_err());
        assert!(positive_number("-0.1").is_err());
        assert!(positive_number("12in").is_err());
    }
}
