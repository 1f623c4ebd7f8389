//! # Store State
//!
//! Wraps the record [`Store`] for the commands. The store's tables are
//! `Arc<RwLock<_>>` internally, so the wrapper needs no lock of its own.

use tracing::info;

use multiluz_store::seed::demo_store;
use multiluz_store::Store;

use crate::error::ApiResult;
use crate::state::BackofficeConfig;

#[derive(Debug, Clone)]
pub struct StoreState {
    store: Store,
}

impl StoreState {
    pub fn new(store: Store) -> Self {
        StoreState { store }
    }

    /// Opens the store the configuration asks for: the demo data set
    /// anchored at the reference date, or an empty store.
    pub fn open(config: &BackofficeConfig) -> ApiResult<Self> {
        let store = if config.data.seed_demo {
            demo_store(config.today())?
        } else {
            info!("Starting with an empty record store");
            Store::new()
        };
        Ok(StoreState::new(store))
    }

    pub fn inner(&self) -> &Store {
        &self.store
    }
}
