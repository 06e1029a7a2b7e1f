//! Ingesta de datos crudos
//!
//! Las filas del backend se normalizan una sola vez: se descartan códigos de
//! barras corruptos, se canonicaliza el status y se interpretan los
//! timestamps. Todas las agregaciones trabajan sobre `InventoryDataset`.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::analysis::status_resolver::StatusRegistry;
use crate::models::{
    Container, DataQualityReport, StockEntry, TireModel, TireStatus, TireType,
};
use crate::utils::validation::{is_valid_barcode, parse_timestamp};

/// Las cuatro tablas tal como llegan del backend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawInventory {
    pub entries: Vec<StockEntry>,
    pub containers: Vec<Container>,
    pub models: Vec<TireModel>,
    pub statuses: Vec<TireStatus>,
}

/// Entrada validada con sus campos derivados
#[derive(Debug, Clone)]
pub struct IngestedEntry {
    pub entry: StockEntry,
    /// Nombre canónico del status (`None` si vino vacío)
    pub status_key: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub is_discard: bool,
    pub tire_type: Option<TireType>,
}

impl IngestedEntry {
    pub fn is_active(&self) -> bool {
        !self.is_discard
    }

    pub fn container_id(&self) -> Option<&str> {
        self.entry.container_id.as_deref()
    }

    pub fn model_id(&self) -> Option<&str> {
        self.entry.model_id.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct InventoryDataset {
    entries: Vec<IngestedEntry>,
    containers: Vec<Container>,
    models: Vec<TireModel>,
    container_index: HashMap<String, usize>,
    model_index: HashMap<String, usize>,
    registry: StatusRegistry,
    quality: DataQualityReport,
    offset: FixedOffset,
}

impl InventoryDataset {
    pub fn empty(offset: FixedOffset) -> Self {
        Self::ingest(RawInventory::default(), offset)
    }

    pub fn ingest(raw: RawInventory, offset: FixedOffset) -> Self {
        let registry = StatusRegistry::new(raw.statuses);

        let model_index: HashMap<String, usize> = raw
            .models
            .iter()
            .enumerate()
            .map(|(idx, model)| (model.id.clone(), idx))
            .collect();
        let container_index: HashMap<String, usize> = raw
            .containers
            .iter()
            .enumerate()
            .map(|(idx, container)| (container.id.clone(), idx))
            .collect();

        let mut quality = DataQualityReport {
            raw_entries: raw.entries.len() as u64,
            ..DataQualityReport::default()
        };
        let mut entries = Vec::with_capacity(raw.entries.len());

        for entry in raw.entries {
            if !is_valid_barcode(&entry.barcode) {
                log::debug!("🚫 Entrada {} con código de barras corrupto: '{}'", entry.id, entry.barcode);
                quality.corrupted_barcodes += 1;
                continue;
            }

            let created_at = entry
                .created_at
                .as_deref()
                .and_then(|raw| parse_timestamp(raw, offset));
            if created_at.is_none() {
                quality.unparsable_timestamps += 1;
            }

            let model = entry
                .model_id
                .as_deref()
                .and_then(|id| model_index.get(id))
                .map(|&idx| &raw.models[idx]);
            if model.is_none() {
                quality.unresolved_models += 1;
            }

            if let Some(container_id) = entry.container_id.as_deref() {
                if !container_index.contains_key(container_id) {
                    quality.unresolved_containers += 1;
                }
            }

            let status_key = registry.canonical_name(entry.status.as_deref());
            if let Some(name) = status_key.as_deref() {
                if registry.get(name).is_none() {
                    quality.unregistered_statuses += 1;
                }
            }
            let is_discard = status_key
                .as_deref()
                .map(|name| registry.is_discard(name))
                .unwrap_or(false);

            entries.push(IngestedEntry {
                tire_type: model.and_then(TireModel::tire_type),
                entry,
                status_key,
                created_at,
                is_discard,
            });
        }

        if quality.corrupted_barcodes > 0 {
            log::warn!(
                "⚠️ {} de {} entradas excluidas por código de barras inválido",
                quality.corrupted_barcodes,
                quality.raw_entries
            );
        }

        Self {
            entries,
            containers: raw.containers,
            models: raw.models,
            container_index,
            model_index,
            registry,
            quality,
            offset,
        }
    }

    /// Entradas válidas (activas y descartadas)
    pub fn entries(&self) -> &[IngestedEntry] {
        &self.entries
    }

    pub fn all(&self) -> Vec<&IngestedEntry> {
        self.entries.iter().collect()
    }

    pub fn active(&self) -> Vec<&IngestedEntry> {
        self.entries.iter().filter(|e| e.is_active()).collect()
    }

    pub fn discarded(&self) -> Vec<&IngestedEntry> {
        self.entries.iter().filter(|e| !e.is_active()).collect()
    }

    pub fn find_entry(&self, id: &str) -> Option<&IngestedEntry> {
        self.entries.iter().find(|e| e.entry.id == id)
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn models(&self) -> &[TireModel] {
        &self.models
    }

    pub fn container(&self, id: &str) -> Option<&Container> {
        self.container_index.get(id).map(|&idx| &self.containers[idx])
    }

    pub fn model(&self, id: &str) -> Option<&TireModel> {
        self.model_index.get(id).map(|&idx| &self.models[idx])
    }

    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    pub fn quality(&self) -> &DataQualityReport {
        &self.quality
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }
}
