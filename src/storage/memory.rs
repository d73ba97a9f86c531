//! In-memory order store for testing and development.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::models::{Order, Orders};
use crate::storage::{OrderStore, StoreError};

/// Order store held in process memory, keyed by package identifier.
///
/// Implements the same contract as the MongoDB store, with one deliberate
/// tightening: [`OrderStore::insert_many`] rejects a batch containing any
/// already-known or repeated key before mutating anything, so a failed
/// import never leaves partial state behind.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn load_by_id(&self, id: &str) -> Result<Order, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {e}")))?;

        orders.get(id).cloned().ok_or(StoreError::NotFound)
    }

    async fn load_all(&self) -> Result<Orders, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {e}")))?;

        Ok(orders.values().cloned().collect())
    }

    async fn load_completed(&self) -> Result<Orders, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {e}")))?;

        Ok(orders
            .values()
            .filter(|order| order.is_completed())
            .cloned()
            .collect())
    }

    async fn load_incomplete(&self) -> Result<Orders, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {e}")))?;

        Ok(orders
            .values()
            .filter(|order| !order.is_completed())
            .cloned()
            .collect())
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {e}")))?;

        orders.clear();

        Ok(())
    }

    async fn delete_completed(&self) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {e}")))?;

        orders.retain(|_, order| !order.is_completed());

        Ok(())
    }

    async fn update_one(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {e}")))?;

        if let Some(existing) = orders.get_mut(&order.package_id) {
            *existing = order.clone();
        }

        Ok(())
    }

    async fn insert_many(&self, batch: &Orders) -> Result<(), StoreError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| StoreError::Backend(format!("failed to acquire write lock: {e}")))?;

        let mut incoming = HashSet::new();
        for order in batch {
            if orders.contains_key(&order.package_id) || !incoming.insert(&order.package_id) {
                return Err(StoreError::Backend(format!(
                    "duplicate package identifier: {}",
                    order.package_id
                )));
            }
        }

        for order in batch {
            orders.insert(order.package_id.clone(), order.clone());
        }

        Ok(())
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {e}")))?;

        Ok(orders.len() as u64)
    }

    async fn count_completed(&self) -> Result<u64, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {e}")))?;

        Ok(orders.values().filter(|order| order.is_completed()).count() as u64)
    }

    async fn count_incomplete(&self) -> Result<u64, StoreError> {
        let orders = self
            .orders
            .read()
            .map_err(|e| StoreError::Backend(format!("failed to acquire read lock: {e}")))?;

        Ok(orders
            .values()
            .filter(|order| !order.is_completed())
            .count() as u64)
    }
}
