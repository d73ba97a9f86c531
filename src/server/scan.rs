//! Scan form handlers and the scan-update workflow.
//!
//! A scan is a read-modify-write against a single order: validate the input,
//! look the order up by its upper-cased barcode, merge the scan fields,
//! recompute the dimensional weight, and write the order back in one store
//! call. No local state is mutated before the store round trip, so a write
//! timeout is the only point where intended and persisted state can diverge.
//!
//! Concurrent scans of the same barcode are last-write-wins: there is no
//! version compare at write time and a late arrival silently overwrites.

use axum::extract::{Form, State};
use axum::response::Response;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{self, DimError, Scan};
use crate::server::pages::{Page, render};
use crate::server::AppState;
use crate::storage::{OrderStore, StoreError};

/// Why a scan could not be applied.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The input failed validation; surfaced per field.
    #[error("scan input failed validation")]
    Validation(#[from] ValidationErrors),
    /// No order matches the scanned barcode.
    #[error("no order matches the scanned barcode")]
    NoMatch,
    /// The scanned measurements could not be processed.
    #[error(transparent)]
    Measurements(#[from] DimError),
    /// The store could not be reached or answered with an error.
    #[error(transparent)]
    Store(StoreError),
}

/// Raw key-value fields submitted by the scan form.
///
/// Checkbox fields arrive as a value when ticked and are absent otherwise,
/// hence `create_new` is an `Option`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanForm {
    pub barcode: String,
    pub country: String,
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub date: String,
    pub service: String,
    pub account: String,
    pub create_new: Option<String>,
}

impl ScanForm {
    /// Build a scan from the form, normalizing the barcode to upper case:
    /// physical barcode labels are case-insensitive, stored keys are not.
    pub fn into_scan(self) -> Scan {
        Scan {
            barcode: self.barcode.to_uppercase(),
            country: self.country,
            weight: self.weight,
            length: self.length,
            width: self.width,
            height: self.height,
            date: self.date,
            service: self.service,
            account: self.account,
            create_new: self.create_new.is_some(),
        }
    }
}

/// `GET /` - show the scan form.
pub async fn scan_form(State(state): State<AppState>) -> Response {
    let page = Page::new("Scan").with_content(&Scan::default());
    render(&state, "scan", page)
}

/// `POST /` - process a submitted scan.
///
/// The form is re-rendered with the submitted values either way, so the
/// station operator keeps their defaults between packages.
pub async fn scan_submit(State(state): State<AppState>, Form(form): Form<ScanForm>) -> Response {
    let scan = form.into_scan();
    let mut page = Page::new("Scan");

    match process_scan(state.store.as_ref(), &scan).await {
        Ok(()) => page.add_message("success", "Scan processed successfully."),
        Err(ScanError::Validation(errors)) => {
            for (field, rule) in models::violations(&errors) {
                page.add_message("danger", format!("{field} failed validation: {rule}"));
            }
        }
        Err(ScanError::NoMatch) => {
            page.add_message("danger", "Unable to match barcode to an order.");
        }
        Err(ScanError::Measurements(_)) => {
            page.add_message("danger", "Unable to process the scanned measurements.");
        }
        Err(ScanError::Store(_)) => {
            page.add_message("danger", "Unable to communicate with the database.");
        }
    }

    let page = page.with_content(&scan);
    render(&state, "scan", page)
}

/// Apply a scan to the matching order and persist it.
///
/// Store failures are logged here with full detail; callers surface only the
/// generic message. `NotFound` on lookup becomes [`ScanError::NoMatch`] so a
/// mistyped barcode reads as such, not as a storage problem.
pub async fn process_scan(store: &dyn OrderStore, scan: &Scan) -> Result<(), ScanError> {
    scan.validate()?;

    let mut order = match store.load_by_id(&scan.barcode).await {
        Ok(order) => order,
        Err(StoreError::NotFound) => return Err(ScanError::NoMatch),
        Err(error) => {
            tracing::error!(error = %error, barcode = %scan.barcode, "unable to load order for scan");
            return Err(ScanError::Store(error));
        }
    };

    order.apply_scan(scan)?;

    if let Err(error) = store.update_one(&order).await {
        tracing::error!(
            error = %error,
            package_id = %order.package_id,
            "unable to save scanned order"
        );
        return Err(ScanError::Store(error));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Order;
    use crate::storage::InMemoryOrderStore;

    fn stored_order(id: &str) -> Order {
        Order {
            package_id: id.to_string(),
            ..Order::default()
        }
    }

    fn valid_scan(barcode: &str) -> Scan {
        Scan {
            barcode: barcode.to_string(),
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

    #[tokio::test]
    async fn scan_updates_the_matching_order() {
        let store = InMemoryOrderStore::new();
        store
            .insert_many(&vec![stored_order("ABC123")])
            .await
            .unwrap();

        process_scan(&store, &valid_scan("ABC123")).await.unwrap();

        let order = store.load_by_id("ABC123").await.unwrap();
        assert_eq!(order.service, "EXPRESS");
        assert_eq!(order.dim, "6.91");
        assert!(order.is_completed());
    }

    #[tokio::test]
    async fn barcode_matching_is_case_insensitive_at_the_form_boundary() {
        let store = InMemoryOrderStore::new();
        store
            .insert_many(&vec![stored_order("ABC123")])
            .await
            .unwrap();

        let form = ScanForm {
            barcode: "abc123".to_string(),
            country: "US".to_string(),
            weight: "2.5".to_string(),
            length: "12".to_string(),
            width: "10".to_string(),
            height: "8".to_string(),
            date: "2024-06-01".to_string(),
            service: "EXPRESS".to_string(),
            account: "ACCT-1".to_string(),
            create_new: None,
        };

        process_scan(&store, &form.into_scan()).await.unwrap();

        assert!(store.load_by_id("ABC123").await.unwrap().is_completed());
    }

    #[tokio::test]
    async fn unknown_barcode_is_a_match_failure() {
        let store = InMemoryOrderStore::new();

        let result = process_scan(&store, &valid_scan("NOPE")).await;
        assert!(matches!(result, Err(ScanError::NoMatch)));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_store() {
        let store = InMemoryOrderStore::new();
        store
            .insert_many(&vec![stored_order("ABC123")])
            .await
            .unwrap();

        let mut scan = valid_scan("ABC123");
        scan.weight = "-5".to_string();

        let result = process_scan(&store, &scan).await;
        assert!(matches!(result, Err(ScanError::Validation(_))));

        let order = store.load_by_id("ABC123").await.unwrap();
        assert!(!order.is_completed(), "order must be untouched");
    }

    #[tokio::test]
    async fn create_new_flag_is_inert() {
        let store = InMemoryOrderStore::new();

        let mut scan = valid_scan("UNKNOWN");
        scan.create_new = true;

        let result = process_scan(&store, &scan).await;
        assert!(matches!(result, Err(ScanError::NoMatch)));
        assert_eq!(store.count_all().await.unwrap(), 0, "no order created");
    }

    #[tokio::test]
    async fn repeated_scans_are_idempotent() {
        let store = InMemoryOrderStore::new();
        store
            .insert_many(&vec![stored_order("ABC123")])
            .await
            .unwrap();

        let scan = valid_scan("ABC123");
        process_scan(&store, &scan).await.unwrap();
        let after_first = store.load_by_id("ABC123").await.unwrap();

        process_scan(&store, &scan).await.unwrap();
        let after_second = store.load_by_id("ABC123").await.unwrap();

        assert_eq!(after_first, after_second);
    }
}
