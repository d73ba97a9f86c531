//! MongoDB order store using the official async driver.
//!
//! # Storage model
//!
//! One document per order in an `orders` collection, keyed by the
//! `packageId` field (the package identifier from import data, not a
//! generated id). Field names are the camelCase serde renames on
//! [`Order`], so the driver's typed collection handles the document
//! translation directly.
//!
//! # Deadlines
//!
//! Every driver call is wrapped in a per-call deadline from
//! [`MongoConfig::timeout`]. Expiry surfaces as [`StoreError::Timeout`],
//! distinct from backend failures, so callers never mistake "could not ask"
//! for "does not exist".

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc, to_document};
use mongodb::{Client, Collection, Database};

use crate::config::MongoConfig;
use crate::models::{Order, Orders};
use crate::storage::{OrderStore, StoreError};

const COLLECTION_ORDERS: &str = "orders";

/// Order store backed by a MongoDB database.
///
/// The handle is cheap to clone and shared read-only across requests; it is
/// not mutated after [`MongoOrderStore::connect`].
#[derive(Clone, Debug)]
pub struct MongoOrderStore {
    database: Database,
    timeout: Duration,
    filter_completed: Document,
    filter_incomplete: Document,
}

impl MongoOrderStore {
    /// Connect to the configured deployment and ping it.
    ///
    /// The ping runs under the same per-call deadline as every other
    /// operation. A failure here is fatal to the caller: the process cannot
    /// serve requests without its store.
    pub async fn connect(config: &MongoConfig) -> Result<Self, StoreError> {
        let timeout = config.timeout();

        let connect = async {
            let client = Client::with_uri_str(&config.url).await?;
            let database = client.database(&config.database);
            database.run_command(doc! { "ping": 1 }).await?;
            Ok(database)
        };

        let database = guard(timeout, connect).await?;

        Ok(Self {
            database,
            timeout,
            filter_completed: doc! { "service": doc! { "$ne": "" } },
            filter_incomplete: doc! { "service": "" },
        })
    }

    fn collection(&self) -> Collection<Order> {
        self.database.collection(COLLECTION_ORDERS)
    }

    async fn load_with_filter(&self, filter: Document) -> Result<Orders, StoreError> {
        let collection = self.collection();

        guard(self.timeout, async move {
            collection.find(filter).await?.try_collect().await
        })
        .await
    }

    async fn delete_with_filter(&self, filter: Document) -> Result<(), StoreError> {
        let collection = self.collection();

        guard(self.timeout, async move {
            collection.delete_many(filter).await.map(|_| ())
        })
        .await
    }

    async fn count_with_filter(&self, filter: Document) -> Result<u64, StoreError> {
        let collection = self.collection();

        guard(self.timeout, async move {
            collection.count_documents(filter).await
        })
        .await
    }
}

/// Run a driver call under the per-call deadline.
async fn guard<T>(
    timeout: Duration,
    op: impl Future<Output = mongodb::error::Result<T>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(timeout, op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(StoreError::Backend(error.to_string())),
        Err(_) => Err(StoreError::Timeout),
    }
}

#[async_trait]
impl OrderStore for MongoOrderStore {
    async fn load_by_id(&self, id: &str) -> Result<Order, StoreError> {
        let collection = self.collection();
        let filter = doc! { "packageId": id };

        let found = guard(self.timeout, async move {
            collection.find_one(filter).await
        })
        .await?;

        found.ok_or(StoreError::NotFound)
    }

    async fn load_all(&self) -> Result<Orders, StoreError> {
        self.load_with_filter(doc! {}).await
    }

    async fn load_completed(&self) -> Result<Orders, StoreError> {
        self.load_with_filter(self.filter_completed.clone()).await
    }

    async fn load_incomplete(&self) -> Result<Orders, StoreError> {
        self.load_with_filter(self.filter_incomplete.clone()).await
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        self.delete_with_filter(doc! {}).await
    }

    async fn delete_completed(&self) -> Result<(), StoreError> {
        self.delete_with_filter(self.filter_completed.clone()).await
    }

    async fn update_one(&self, order: &Order) -> Result<(), StoreError> {
        let collection = self.collection();
        let filter = doc! { "packageId": &order.package_id };
        let document =
            to_document(order).map_err(|error| StoreError::Backend(error.to_string()))?;

        // A missing key matches zero documents, which is the contract's
        // silent no-op.
        guard(self.timeout, async move {
            collection
                .update_one(filter, doc! { "$set": document })
                .await
                .map(|_| ())
        })
        .await
    }

    async fn insert_many(&self, orders: &Orders) -> Result<(), StoreError> {
        // The driver rejects an empty batch outright.
        if orders.is_empty() {
            return Ok(());
        }

        let collection = self.collection();
        let batch = orders.clone();

        guard(self.timeout, async move {
            collection.insert_many(batch).await.map(|_| ())
        })
        .await
    }

    async fn count_all(&self) -> Result<u64, StoreError> {
        self.count_with_filter(doc! {}).await
    }

    async fn count_completed(&self) -> Result<u64, StoreError> {
        self.count_with_filter(self.filter_completed.clone()).await
    }

    async fn count_incomplete(&self) -> Result<u64, StoreError> {
        self.count_with_filter(self.filter_incomplete.clone()).await
    }
}
