//! Integration tests for the MongoDB order store.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a MongoDB container),
//!   which is why every test here is `#[ignore]`d by default.
//!
//! # Running
//!
//! ```sh
//! cargo test --test mongo_store_tests -- --ignored --test-threads=1
//! ```
//!
//! # Test isolation
//!
//! All tests share a single MongoDB container; each test connects to its own
//! database so they cannot interfere with each other.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use testcontainers::runners::AsyncRunner;
use testcontainers_modules::mongo::Mongo;

use packscan::config::MongoConfig;
use packscan::models::Order;
use packscan::storage::{MongoOrderStore, OrderStore, StoreError};

/// Holds the container handle (keeps it alive) and the connection URL.
struct MongoTestEnv {
    _container: testcontainers::ContainerAsync<Mongo>,
    connection_url: String,
}

static TEST_ENV: OnceLock<MongoTestEnv> = OnceLock::new();
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

async fn init_mongo_env() -> &'static MongoTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Mongo::default()
        .start()
        .await
        .expect("failed to start MongoDB container — is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(27017).await.unwrap();
    let url = format!("mongodb://{}:{}", host, port);

    let env = MongoTestEnv {
        _container: container,
        connection_url: url,
    };

    let _ = TEST_ENV.set(env);
    TEST_ENV.get().unwrap()
}

/// Connect a store against a fresh database for test isolation.
async fn fresh_store() -> MongoOrderStore {
    let env = init_mongo_env().await;
    let config = MongoConfig {
        url: env.connection_url.clone(),
        database: format!("scanner_test_{}", DB_COUNTER.fetch_add(1, Ordering::SeqCst)),
        timeout_secs: 5,
    };

    MongoOrderStore::connect(&config)
        .await
        .expect("should connect to the test container")
}

fn order(id: &str, service: &str) -> Order {
    Order {
        package_id: id.to_string(),
        service: service.to_string(),
        ..Order::default()
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn insert_load_and_count() {
    let store = fresh_store().await;

    store
        .insert_many(&vec![
            order("PKG1", "EXPRESS"),
            order("PKG2", ""),
            order("PKG3", "GROUND"),
        ])
        .await
        .unwrap();

    assert_eq!(store.count_all().await.unwrap(), 3);
    assert_eq!(store.count_completed().await.unwrap(), 2);
    assert_eq!(store.count_incomplete().await.unwrap(), 1);

    let loaded = store.load_by_id("PKG2").await.unwrap();
    assert_eq!(loaded.package_id, "PKG2");
    assert!(!loaded.is_completed());

    assert!(matches!(
        store.load_by_id("MISSING").await,
        Err(StoreError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn filters_are_applied_server_side() {
    let store = fresh_store().await;

    store
        .insert_many(&vec![order("PKG1", "EXPRESS"), order("PKG2", "")])
        .await
        .unwrap();

    let completed = store.load_completed().await.unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].package_id, "PKG1");

    let incomplete = store.load_incomplete().await.unwrap();
    assert_eq!(incomplete.len(), 1);
    assert_eq!(incomplete[0].package_id, "PKG2");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn update_one_replaces_by_key() {
    let store = fresh_store().await;

    store.insert_many(&vec![order("PKG1", "")]).await.unwrap();

    let mut updated = order("PKG1", "EXPRESS");
    updated.dim = "6.91".to_string();
    store.update_one(&updated).await.unwrap();

    let loaded = store.load_by_id("PKG1").await.unwrap();
    assert_eq!(loaded.service, "EXPRESS");
    assert_eq!(loaded.dim, "6.91");
    assert_eq!(store.count_all().await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn update_one_missing_key_is_silent_noop() {
    let store = fresh_store().await;

    store.update_one(&order("GHOST", "EXPRESS")).await.unwrap();

    assert_eq!(store.count_all().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn delete_completed_then_all() {
    let store = fresh_store().await;

    store
        .insert_many(&vec![
            order("PKG1", "EXPRESS"),
            order("PKG2", ""),
            order("PKG3", ""),
        ])
        .await
        .unwrap();

    store.delete_completed().await.unwrap();
    assert_eq!(store.count_all().await.unwrap(), 2);
    assert_eq!(store.count_completed().await.unwrap(), 0);

    store.delete_all().await.unwrap();
    assert_eq!(store.count_all().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn empty_insert_is_accepted() {
    let store = fresh_store().await;

    store.insert_many(&Vec::new()).await.unwrap();

    assert_eq!(store.count_all().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn zero_deadline_surfaces_as_timeout() {
    let env = init_mongo_env().await;
    let config = MongoConfig {
        url: env.connection_url.clone(),
        database: "scanner_timeout_test".to_string(),
        timeout_secs: 0,
    };

    let result = MongoOrderStore::connect(&config).await;
    assert!(matches!(result, Err(StoreError::Timeout)));
}
