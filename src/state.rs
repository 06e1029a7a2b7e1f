//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use crate::cache::{CacheConfig, InventoryCache};
use crate::clients::InventoryDataSource;
use crate::config::environment::EnvironmentConfig;
use crate::services::{BulkUpdateService, InventoryService};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub cache: InventoryCache,
    pub inventory: InventoryService,
    pub bulk: BulkUpdateService,
}

impl AppState {
    /// Armar el estado sobre una fuente de datos cualquiera
    pub fn new(
        config: EnvironmentConfig,
        source: Arc<dyn InventoryDataSource>,
        cache_config: CacheConfig,
    ) -> AppResult<Self> {
        let offset = config.timezone()?;
        let cache = InventoryCache::new(offset, cache_config);
        let inventory = InventoryService::new(source.clone(), cache.clone(), offset);
        let bulk = BulkUpdateService::new(source, cache.clone());

        Ok(Self {
            config,
            cache,
            inventory,
            bulk,
        })
    }
}
