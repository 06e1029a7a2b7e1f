//! Store reactivo del inventario
//!
//! Guarda la última copia ingerida de las tablas y notifica a los
//! suscriptores registrados cuando algo cambia. Reemplaza la señal global de
//! "datos cambiaron": quien muta publica un `DataChange`, quien depende de
//! los datos se suscribe explícitamente.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info};

use super::CacheConfig;
use crate::analysis::InventoryDataset;

/// Evento de cambio de datos
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataChange {
    /// Dataset recargado desde el backend
    Refreshed { entries: usize },
    /// Entradas modificadas (status o container)
    EntriesUpdated { ids: Vec<String> },
    /// Nuevo status registrado
    StatusRegistered { name: String },
    /// La recarga falló y se mantuvo la copia anterior
    RefreshFailed { message: String },
}

impl DataChange {
    /// ¿El evento exige recargar desde el backend?
    pub fn requires_reload(&self) -> bool {
        matches!(self, DataChange::EntriesUpdated { .. } | DataChange::StatusRegistered { .. })
    }
}

#[derive(Clone)]
pub struct InventoryCache {
    dataset: Arc<RwLock<Arc<InventoryDataset>>>,
    last_refresh: Arc<RwLock<Option<DateTime<Utc>>>>,
    events: broadcast::Sender<DataChange>,
    config: CacheConfig,
}

impl InventoryCache {
    /// Store vacío (sin datos hasta la primera carga)
    pub fn new(offset: FixedOffset, config: CacheConfig) -> Self {
        let (events, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            dataset: Arc::new(RwLock::new(Arc::new(InventoryDataset::empty(offset)))),
            last_refresh: Arc::new(RwLock::new(None)),
            events,
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Copia actual (barata: `Arc`)
    pub async fn current(&self) -> Arc<InventoryDataset> {
        self.dataset.read().await.clone()
    }

    /// Reemplazar el dataset; la última respuesta en llegar gana
    pub async fn replace(&self, dataset: InventoryDataset) {
        let entries = dataset.entries().len();
        *self.dataset.write().await = Arc::new(dataset);
        *self.last_refresh.write().await = Some(Utc::now());
        info!("💾 Inventario en cache actualizado ({} entradas válidas)", entries);
        self.publish(DataChange::Refreshed { entries });
    }

    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.read().await
    }

    /// Registrar un suscriptor
    pub fn subscribe(&self) -> broadcast::Receiver<DataChange> {
        self.events.subscribe()
    }

    /// Publicar un cambio; sin suscriptores el evento se descarta
    pub fn publish(&self, change: DataChange) {
        match self.events.send(change) {
            Ok(receivers) => debug!("📣 Cambio publicado a {} suscriptores", receivers),
            Err(broadcast::error::SendError(change)) => {
                debug!("📣 Cambio sin suscriptores: {:?}", change)
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RawInventory;
    use crate::utils::validation::offset_from_hours;

    #[tokio::test]
    async fn test_replace_notifies_subscribers() {
        let offset = offset_from_hours(-3).unwrap();
        let cache = InventoryCache::new(offset, CacheConfig::default());
        let mut rx = cache.subscribe();

        assert!(cache.last_refresh().await.is_none());
        assert_eq!(cache.current().await.entries().len(), 0);

        cache
            .replace(InventoryDataset::ingest(RawInventory::default(), offset))
            .await;

        assert_eq!(rx.recv().await.unwrap(), DataChange::Refreshed { entries: 0 });
        assert!(cache.last_refresh().await.is_some());
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let cache = InventoryCache::new(offset_from_hours(0).unwrap(), CacheConfig::default());
        assert_eq!(cache.subscriber_count(), 0);
        cache.publish(DataChange::StatusRegistered { name: "Novo".into() });
    }

    #[test]
    fn test_requires_reload() {
        assert!(DataChange::EntriesUpdated { ids: vec![] }.requires_reload());
        assert!(!DataChange::Refreshed { entries: 1 }.requires_reload());
    }
}
