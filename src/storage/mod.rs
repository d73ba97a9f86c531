//! Persistence abstraction for orders.
//!
//! The store is the sole owner of persisted order state; orders returned
//! from it are transient copies with no back-reference to storage. The
//! completed/incomplete classifications are server-side filters derived from
//! the service field, never stored flags, so the scalability of counts does
//! not depend on loading records into the application.

pub mod memory;
pub mod mongo;

pub use memory::InMemoryOrderStore;
pub use mongo::MongoOrderStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Order, Orders};

/// Errors that can occur during store operations.
///
/// `NotFound` and `Timeout` are distinct so callers can tell "the order does
/// not exist" from "could not determine whether it exists".
#[derive(Debug, Error)]
pub enum StoreError {
    /// A keyed lookup matched no order.
    #[error("order not found")]
    NotFound,
    /// The backend did not answer within the per-call deadline.
    #[error("store operation timed out")]
    Timeout,
    /// Any other backend communication or constraint failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Interface for order repositories.
///
/// Counts and loads are independent round trips: no point-in-time
/// consistency is implied between a count and a subsequent load.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Load the order with the given package identifier.
    async fn load_by_id(&self, id: &str) -> Result<Order, StoreError>;

    /// Load all orders.
    async fn load_all(&self) -> Result<Orders, StoreError>;

    /// Load orders with a recorded service value.
    async fn load_completed(&self) -> Result<Orders, StoreError>;

    /// Load orders still awaiting a scan.
    async fn load_incomplete(&self) -> Result<Orders, StoreError>;

    /// Delete every order. Irreversible.
    async fn delete_all(&self) -> Result<(), StoreError>;

    /// Delete completed orders. Irreversible.
    async fn delete_completed(&self) -> Result<(), StoreError>;

    /// Replace the stored order with the same package identifier.
    ///
    /// A silent no-op when the key does not exist; callers that must
    /// guarantee existence do a [`Self::load_by_id`] first, as the scan
    /// workflow does.
    async fn update_one(&self, order: &Order) -> Result<(), StoreError>;

    /// Insert a batch of new orders.
    ///
    /// No per-order existence check is made; duplicate-key behavior is
    /// delegated to the backing store.
    async fn insert_many(&self, orders: &Orders) -> Result<(), StoreError>;

    /// Count all orders.
    async fn count_all(&self) -> Result<u64, StoreError>;

    /// Count orders with a recorded service value.
    async fn count_completed(&self) -> Result<u64, StoreError>;

    /// Count orders still awaiting a scan.
    async fn count_incomplete(&self) -> Result<u64, StoreError>;
}
