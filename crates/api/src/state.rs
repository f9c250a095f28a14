use std::sync::Arc;

use infra::db::Db;
use infra::{BlogStore, PgStore};

/// Shared handle to the data store, cloned into every request's context.
///
/// Holds the store behind its contract trait so the GraphQL layer (and the
/// test suite) never depend on a concrete backend.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn BlogStore>,
}

impl AppState {
    pub fn new(db: Db) -> Self {
        Self {
            store: Arc::new(PgStore::new(db)),
        }
    }

    /// Build state over any store implementation. Used by the test suite
    /// to run the schema against an in-memory store.
    pub fn with_store(store: Arc<dyn BlogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn BlogStore {
        &*self.store
    }
}
