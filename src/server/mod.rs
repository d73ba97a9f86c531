//! HTTP surface: application state, routes, handlers, and page rendering.

pub mod database;
pub mod pages;
pub mod router;
pub mod scan;

pub use pages::{Message, Page};
pub use router::build_router;

use std::sync::Arc;

use tera::Tera;

use crate::config::Config;
use crate::storage::OrderStore;

/// Shared state handed to every handler.
///
/// Built once at startup and cloned per request; nothing in it is mutated
/// afterwards. Templates are compiled once and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub templates: Arc<Tera>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn OrderStore>, templates: Tera, config: Config) -> Self {
        Self {
            store,
            templates: Arc::new(templates),
            config: Arc::new(config),
        }
    }
}
