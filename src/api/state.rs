use std::sync::Arc;

use crate::config::Config;
use crate::error::AppResult;
use crate::services::{CatalogSource, CatalogStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Current catalog snapshot, swapped atomically on reload
    pub catalog: CatalogStore,
    /// Where reloads read from
    pub source: Arc<dyn CatalogSource>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates state with an empty catalog; call [`AppState::load`] to fill it
    pub fn new(config: Config, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog: CatalogStore::new(),
            source,
            config: Arc::new(config),
        }
    }

    /// Creates state and performs the initial catalog load
    pub async fn load(config: Config, source: Arc<dyn CatalogSource>) -> AppResult<Self> {
        let state = Self::new(config, source);
        state.catalog.reload_from(state.source.as_ref()).await?;
        Ok(state)
    }
}
