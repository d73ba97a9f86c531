//! # packscan
//!
//! Warehouse scan station for shipment orders.
//!
//! Orders are bulk-imported from CSV, classified by completion status, and
//! updated one at a time when a physical package is scanned at a warehouse
//! station. A scan records the package's country, measurements, service and
//! account against the order matching its barcode, deriving the billable
//! dimensional weight from the measurements.
//!
//! ## Architecture
//!
//! - [`models`] - the order record, the transient scan input, and the
//!   derived-field computations.
//! - [`storage`] - the order store abstraction with its MongoDB and
//!   in-memory implementations; completion is a server-side query predicate,
//!   never a stored flag.
//! - [`transfer`] - the CSV codec and the validate-before-insert bulk import
//!   pipeline.
//! - [`server`] - axum handlers, routes, and the page model handed to the
//!   tera rendering layer.
//! - [`config`] - environment-driven configuration.

pub mod config;
pub mod models;
pub mod server;
pub mod storage;
pub mod transfer;
