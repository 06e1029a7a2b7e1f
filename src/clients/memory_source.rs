//! Fuente de datos en memoria
//!
//! Implementa `InventoryDataSource` sobre un `RawInventory` local. Se usa en
//! desarrollo sin backend y en los tests; permite simular fallas de lectura
//! y de actualización por id.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::analysis::RawInventory;
use crate::clients::InventoryDataSource;
use crate::models::{Container, NewTireStatus, StockEntry, StockEntryPatch, TireModel, TireStatus};
use crate::utils::errors::{not_found_error, AppError, AppResult};

#[derive(Default)]
pub struct InMemoryDataSource {
    data: RwLock<RawInventory>,
    failing_updates: RwLock<HashSet<String>>,
    fail_fetches: AtomicBool,
}

impl InMemoryDataSource {
    pub fn new(data: RawInventory) -> Self {
        Self {
            data: RwLock::new(data),
            ..Self::default()
        }
    }

    /// Hacer fallar las actualizaciones de un id
    pub async fn fail_updates_for(&self, id: &str) {
        self.failing_updates.write().await.insert(id.to_string());
    }

    /// Hacer fallar (o no) todas las lecturas
    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    pub async fn snapshot(&self) -> RawInventory {
        self.data.read().await.clone()
    }

    fn check_fetch(&self) -> AppResult<()> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(AppError::RemoteStatus {
                status: 503,
                body: "simulated outage".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryDataSource for InMemoryDataSource {
    async fn fetch_entries(&self) -> AppResult<Vec<StockEntry>> {
        self.check_fetch()?;
        Ok(self.data.read().await.entries.clone())
    }

    async fn fetch_containers(&self) -> AppResult<Vec<Container>> {
        self.check_fetch()?;
        Ok(self.data.read().await.containers.clone())
    }

    async fn fetch_models(&self) -> AppResult<Vec<TireModel>> {
        self.check_fetch()?;
        Ok(self.data.read().await.models.clone())
    }

    async fn fetch_statuses(&self) -> AppResult<Vec<TireStatus>> {
        self.check_fetch()?;
        Ok(self.data.read().await.statuses.clone())
    }

    async fn update_entry(&self, id: &str, patch: &StockEntryPatch) -> AppResult<()> {
        if self.failing_updates.read().await.contains(id) {
            return Err(AppError::RemoteStatus {
                status: 500,
                body: format!("simulated failure for {}", id),
            });
        }

        let mut data = self.data.write().await;
        let entry = data
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found_error("StockEntry", id))?;

        if let Some(status) = &patch.status {
            entry.status = Some(status.clone());
        }
        if let Some(container_id) = &patch.container_id {
            entry.container_id = container_id.clone();
        }
        if let Some(updated_at) = &patch.updated_at {
            entry.updated_at = Some(updated_at.clone());
        }
        Ok(())
    }

    async fn insert_status(&self, status: &NewTireStatus) -> AppResult<TireStatus> {
        let mut data = self.data.write().await;
        let inserted = TireStatus {
            id: uuid::Uuid::new_v4().to_string(),
            name: status.name.clone(),
            color: status.color.clone(),
            display_order: status.display_order,
            is_discard: status.is_discard,
        };
        data.statuses.push(inserted.clone());
        Ok(inserted)
    }
}
