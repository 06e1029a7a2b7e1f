//! Actualizaciones en lote
//!
//! Cada entrada se actualiza con su propio request, en secuencia. Una falla
//! no detiene el lote ni deshace lo ya aplicado: el resultado lista el
//! desenlace de cada item.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::analysis::is_discard_label;
use crate::cache::{DataChange, InventoryCache};
use crate::clients::InventoryDataSource;
use crate::models::StockEntryPatch;
use crate::utils::errors::{bad_request_error, not_found_error, AppError, AppResult};

/// Estado derivado de un lote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Empty,
    FullSuccess,
    PartialSuccess,
    FullFailure,
}

impl BatchStatus {
    fn from_counts(succeeded: usize, failed: usize) -> Self {
        match (succeeded, failed) {
            (0, 0) => BatchStatus::Empty,
            (_, 0) => BatchStatus::FullSuccess,
            (0, _) => BatchStatus::FullFailure,
            _ => BatchStatus::PartialSuccess,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemOutcome {
    pub entry_id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchUpdateResult {
    pub batch_id: Uuid,
    pub status: BatchStatus,
    /// Status canónico aplicado
    pub target_status: String,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchUpdateResult {
    fn new(target_status: String, outcomes: Vec<ItemOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.success).count();
        let failed = outcomes.len() - succeeded;
        Self {
            batch_id: Uuid::new_v4(),
            status: BatchStatus::from_counts(succeeded, failed),
            target_status,
            succeeded,
            failed,
            outcomes,
        }
    }

    pub fn succeeded_ids(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .filter(|o| o.success)
            .map(|o| o.entry_id.clone())
            .collect()
    }
}

#[derive(Clone)]
pub struct BulkUpdateService {
    source: Arc<dyn InventoryDataSource>,
    cache: InventoryCache,
}

impl BulkUpdateService {
    pub fn new(source: Arc<dyn InventoryDataSource>, cache: InventoryCache) -> Self {
        Self { source, cache }
    }

    /// Cambiar el status de varias entradas.
    ///
    /// El status debe estar registrado (o ser un label de descarte). Pasar a
    /// descarte también libera el container.
    pub async fn bulk_update_status(&self, entry_ids: &[String], status: &str) -> AppResult<BatchUpdateResult> {
        let dataset = self.cache.current().await;
        let registry = dataset.registry();

        let target = status.trim();
        if target.is_empty() {
            return Err(bad_request_error("Target status cannot be empty"));
        }
        let canonical = match registry.get(target) {
            Some(registered) => registered.name.clone(),
            None if is_discard_label(target) => target.to_string(),
            None => return Err(not_found_error("TireStatus", target)),
        };
        let discarding = registry.is_discard(&canonical);

        let mut seen = HashSet::new();
        let ids: Vec<&String> = entry_ids
            .iter()
            .filter(|id| !id.trim().is_empty() && seen.insert(id.as_str()))
            .collect();

        log::info!(
            "📝 Lote de {} entradas -> '{}' (descarte: {})",
            ids.len(),
            canonical,
            discarding
        );

        let mut outcomes = Vec::with_capacity(ids.len());
        for id in ids {
            let mut patch = StockEntryPatch::status(canonical.clone());
            if discarding {
                patch.container_id = Some(None);
            }

            match self.source.update_entry(id, &patch.touched()).await {
                Ok(()) => outcomes.push(ItemOutcome {
                    entry_id: id.clone(),
                    success: true,
                    error: None,
                }),
                Err(e) => {
                    log::warn!("⚠️ Falló la actualización de la entrada {}: {}", id, e);
                    outcomes.push(ItemOutcome {
                        entry_id: id.clone(),
                        success: false,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let result = BatchUpdateResult::new(canonical, outcomes);
        match result.status {
            BatchStatus::FullSuccess => log::info!("✅ Lote {} aplicado ({} entradas)", result.batch_id, result.succeeded),
            BatchStatus::Empty => log::info!("ℹ️ Lote {} vacío", result.batch_id),
            _ => log::warn!(
                "⚠️ Lote {} con fallas: {} ok, {} con error",
                result.batch_id,
                result.succeeded,
                result.failed
            ),
        }

        if result.succeeded > 0 {
            self.cache.publish(DataChange::EntriesUpdated { ids: result.succeeded_ids() });
        }
        Ok(result)
    }

    /// Mover una entrada a otro container (o dejarla sin container)
    pub async fn reassign_container(&self, entry_id: &str, container_id: Option<&str>) -> AppResult<()> {
        let dataset = self.cache.current().await;

        let entry = dataset
            .find_entry(entry_id)
            .ok_or_else(|| not_found_error("StockEntry", entry_id))?;
        if !entry.is_active() {
            return Err(AppError::BadRequest(format!(
                "Entry {} is discarded and cannot be assigned to a container",
                entry_id
            )));
        }

        let container_id = container_id.map(str::trim).filter(|id| !id.is_empty());
        if let Some(id) = container_id {
            if dataset.container(id).is_none() {
                return Err(not_found_error("Container", id));
            }
        }

        let patch = StockEntryPatch::container(container_id.map(str::to_string)).touched();
        self.source.update_entry(entry_id, &patch).await?;

        log::info!(
            "📦 Entrada {} movida a {}",
            entry_id,
            container_id.unwrap_or("(sin container)")
        );
        self.cache.publish(DataChange::EntriesUpdated { ids: vec![entry_id.to_string()] });
        Ok(())
    }
}
