use std::path::Path;
use std::sync::Arc;

use gridcal_core::GridCalResult;

use crate::db::SqliteStore;

/// Shared application state: one store handle cloned into every route.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SqliteStore>,
}

impl AppState {
    pub fn new(path: &Path) -> GridCalResult<Self> {
        Ok(AppState {
            store: Arc::new(SqliteStore::open(path)?),
        })
    }

    /// In-memory database, used by the test suite.
    pub fn in_memory() -> GridCalResult<Self> {
        Ok(AppState {
            store: Arc::new(SqliteStore::open_in_memory()?),
        })
    }
}
