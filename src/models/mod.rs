//! Domain records: the persisted order and the transient scan input.

pub mod order;
pub mod scan;

pub use order::{DimError, Order, Orders};
pub use scan::Scan;

use validator::ValidationErrors;

/// Flatten validation errors into `(field, rule)` pairs for reporting.
///
/// Each violated field contributes one pair per broken rule; the rule text is
/// the rule's message when one was declared, falling back to its code.
pub fn violations(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut reported = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let rule = error
                .message
                .as_ref()
                .map(|message| message.to_string())
                .unwrap_or_else(|| error.code.to_string());

            reported.push((field.to_string(), rule));
        }
    }

    reported
}
