//! Database page handlers: aggregate counts, CSV upload, bulk deletes, and
//! CSV downloads.
//!
//! Store and parse failures are logged with full detail here and surfaced to
//! the operator only as generic messages; validation failures from the
//! import pipeline are the one category shown verbatim, since the operator
//! can fix the file and resubmit.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;

use crate::models::Orders;
use crate::server::pages::{Page, render};
use crate::server::AppState;
use crate::storage::{OrderStore, StoreError};
use crate::transfer::{self, ImportError};

/// Aggregate order counts shown on the database page.
///
/// Three independent round trips; no point-in-time consistency between them.
#[derive(Debug, Serialize)]
pub struct OrderStats {
    pub all: u64,
    pub completed: u64,
    pub incomplete: u64,
}

async fn order_stats(store: &dyn OrderStore) -> Result<OrderStats, StoreError> {
    let all = store.count_all().await.inspect_err(
        |error| tracing::error!(error = %error, "unable to count all orders"),
    )?;

    let completed = store.count_completed().await.inspect_err(
        |error| tracing::error!(error = %error, "unable to count completed orders"),
    )?;

    let incomplete = store.count_incomplete().await.inspect_err(
        |error| tracing::error!(error = %error, "unable to count incomplete orders"),
    )?;

    Ok(OrderStats {
        all,
        completed,
        incomplete,
    })
}

/// `GET /database` - order counts and the import/export controls.
pub async fn database_page(State(state): State<AppState>) -> Response {
    let mut page = Page::new("Database");

    match order_stats(state.store.as_ref()).await {
        Ok(stats) => page = page.with_content(&stats),
        Err(_) => page.add_message("danger", "Unable to communicate with the database."),
    }

    render(&state, "database", page)
}

/// `POST /database/upload` - bulk import a CSV of orders.
pub async fn database_upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    let mut page = Page::new("Database");

    match process_upload(state.store.as_ref(), multipart).await {
        Ok(added) => {
            tracing::info!(count = added, "imported orders into the database");
            page.add_message("success", format!("Added {added} orders to the database."));
        }
        Err(message) => page.add_message("danger", message),
    }

    render(&state, "text", page)
}

/// Pull the uploaded file out of the multipart body and run the import
/// pipeline. Returns the user-facing failure message on error; details are
/// logged here.
async fn process_upload(store: &dyn OrderStore, mut multipart: Multipart) -> Result<usize, String> {
    let mut upload = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("upload") => {
                match field.text().await {
                    Ok(text) => upload = Some(text),
                    Err(error) => {
                        tracing::error!(error = %error, "unable to read uploaded file");
                        return Err("Error reading the uploaded file.".to_string());
                    }
                }
                break;
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(error) => {
                tracing::error!(error = %error, "unable to read upload form");
                return Err("Error reading the uploaded file.".to_string());
            }
        }
    }

    let Some(text) = upload else {
        return Err("No file was uploaded.".to_string());
    };

    transfer::import_orders(store, &text)
        .await
        .map_err(|error| match error {
            ImportError::Validation { .. } => error.to_string(),
            ImportError::Transfer(error) => {
                tracing::error!(error = %error, "unable to parse uploaded orders");
                "Unable to process the uploaded file.".to_string()
            }
            ImportError::Store(error) => {
                tracing::error!(error = %error, "unable to save uploaded orders");
                "Unable to add orders to the database.".to_string()
            }
        })
}

/// `POST /database/delete/all` - delete every order.
pub async fn delete_all(State(state): State<AppState>) -> Response {
    let mut page = Page::new("Database");

    match state.store.delete_all().await {
        Ok(()) => {
            tracing::info!("deleted all orders from the database");
            page.add_message("success", "Database deleted.");
        }
        Err(error) => {
            tracing::error!(error = %error, "unable to delete all orders");
            page.add_message("danger", "Unable to delete the database.");
        }
    }

    render(&state, "text", page)
}

/// `POST /database/delete/complete` - delete completed orders.
pub async fn delete_completed(State(state): State<AppState>) -> Response {
    let mut page = Page::new("Database");

    match state.store.delete_completed().await {
        Ok(()) => {
            tracing::info!("deleted completed orders from the database");
            page.add_message("success", "Completed orders have been deleted.");
        }
        Err(error) => {
            tracing::error!(error = %error, "unable to delete completed orders");
            page.add_message("danger", "Unable to delete completed orders.");
        }
    }

    render(&state, "text", page)
}

/// `POST /database/download/all` - export every order as CSV.
pub async fn download_all(State(state): State<AppState>) -> Response {
    let loaded = state.store.load_all().await;
    serve_orders_csv(&state, loaded)
}

/// `POST /database/download/completed` - export completed orders as CSV.
pub async fn download_completed(State(state): State<AppState>) -> Response {
    let loaded = state.store.load_completed().await;
    serve_orders_csv(&state, loaded)
}

/// `POST /database/download/incomplete` - export incomplete orders as CSV.
pub async fn download_incomplete(State(state): State<AppState>) -> Response {
    let loaded = state.store.load_incomplete().await;
    serve_orders_csv(&state, loaded)
}

/// Serve a loaded batch as a CSV attachment, in whatever order the store
/// returned it.
fn serve_orders_csv(state: &AppState, loaded: Result<Orders, StoreError>) -> Response {
    let mut page = Page::new("Database");

    let orders = match loaded {
        Ok(orders) => orders,
        Err(error) => {
            tracing::error!(error = %error, "unable to load orders for export");
            page.add_message("danger", "Unable to load orders from the database.");
            return render(state, "text", page);
        }
    };

    match transfer::write_orders(&orders) {
        Ok(csv) => {
            let filename = format!("orders-{}.csv", Utc::now().format("%Y-%m-%d"));
            (
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{filename}\""),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!(error = %error, "unable to encode orders as CSV");
            page.add_message("danger", "Unable to process orders for export.");
            render(state, "text", page)
        }
    }
}
