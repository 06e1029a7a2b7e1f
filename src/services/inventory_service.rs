//! Servicio de inventario
//!
//! Carga las tablas del backend, mantiene el store y calcula el dashboard.
//! Una falla de lectura nunca vacía la pantalla: se conserva la copia
//! anterior (o el dataset vacío) y se registra el error.

use std::sync::Arc;

use chrono::FixedOffset;
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use validator::Validate;

use crate::analysis::{build_snapshot_now, is_discard_label, InventoryDataset};
use crate::cache::{DataChange, InventoryCache};
use crate::clients::InventoryDataSource;
use crate::models::{DashboardSnapshot, NewTireStatus, TireStatus, ViewParams};
use crate::utils::errors::{AppError, AppResult};

/// Resultado de una recarga
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RefreshOutcome {
    Loaded { entries: usize, corrupted: u64 },
    KeptCached { error: String },
}

#[derive(Clone)]
pub struct InventoryService {
    source: Arc<dyn InventoryDataSource>,
    cache: InventoryCache,
    offset: FixedOffset,
}

impl InventoryService {
    pub fn new(source: Arc<dyn InventoryDataSource>, cache: InventoryCache, offset: FixedOffset) -> Self {
        Self { source, cache, offset }
    }

    /// Recargar las cuatro tablas; sin reintento automático
    pub async fn refresh(&self) -> RefreshOutcome {
        log::info!("🔄 Recargando inventario desde el backend");

        match self.source.fetch_all().await {
            Ok(raw) => {
                let dataset = InventoryDataset::ingest(raw, self.offset);
                let entries = dataset.entries().len();
                let corrupted = dataset.quality().corrupted_barcodes;
                self.cache.replace(dataset).await;
                RefreshOutcome::Loaded { entries, corrupted }
            }
            Err(e) => {
                log::error!("❌ Error cargando inventario, se mantiene la copia en cache: {}", e);
                let error = e.to_string();
                self.cache.publish(DataChange::RefreshFailed { message: error.clone() });
                RefreshOutcome::KeptCached { error }
            }
        }
    }

    pub async fn dataset(&self) -> Arc<InventoryDataset> {
        self.cache.current().await
    }

    /// Dashboard completo para los parámetros dados
    pub async fn snapshot(&self, view: &ViewParams) -> DashboardSnapshot {
        let dataset = self.dataset().await;
        build_snapshot_now(&dataset, view)
    }

    /// Resolver un status crudo contra el registro actual
    pub async fn resolve_status(&self, raw: Option<&str>) -> TireStatus {
        self.dataset().await.registry().resolve(raw)
    }

    /// Registrar un status nuevo.
    ///
    /// La bandera de descarte se fija aquí, una vez, a partir del pedido o
    /// de los labels de descarte conocidos.
    pub async fn register_status(&self, mut request: NewTireStatus) -> AppResult<TireStatus> {
        request.name = request.name.trim().to_string();
        request.validate()?;

        let dataset = self.dataset().await;
        if let Some(existing) = dataset.registry().get(&request.name) {
            return Err(AppError::BadRequest(format!(
                "Status '{}' already registered as '{}'",
                request.name, existing.name
            )));
        }

        request.is_discard = request.is_discard || is_discard_label(&request.name);
        let inserted = self.source.insert_status(&request).await?;

        log::info!("🏷️ Status '{}' registrado (descarte: {})", inserted.name, request.is_discard);
        self.cache.publish(DataChange::StatusRegistered { name: inserted.name.clone() });
        Ok(inserted)
    }

    /// Suscriptor que recarga el store cuando otro componente muta datos.
    ///
    /// Con `auto_refresh_secs` también recarga periódicamente.
    pub fn spawn_refresher(&self) -> JoinHandle<()> {
        let service = self.clone();
        let mut events = self.cache.subscribe();
        let period = self
            .cache
            .config()
            .auto_refresh_secs
            .map(std::time::Duration::from_secs);

        tokio::spawn(async move {
            let mut ticker = period.map(tokio::time::interval);
            if let Some(ticker) = ticker.as_mut() {
                // El primer tick es inmediato; la carga inicial ya la hace main
                ticker.tick().await;
            }

            loop {
                let reload = tokio::select! {
                    event = events.recv() => match event {
                        Ok(change) => change.requires_reload(),
                        Err(RecvError::Lagged(skipped)) => {
                            log::warn!("⚠️ Refresher atrasado, {} eventos perdidos", skipped);
                            true
                        }
                        Err(RecvError::Closed) => break,
                    },
                    _ = async {
                        match ticker.as_mut() {
                            Some(ticker) => { ticker.tick().await; }
                            None => futures::future::pending::<()>().await,
                        }
                    } => true,
                };

                if reload {
                    service.refresh().await;
                }
            }

            log::info!("🛑 Refresher detenido");
        })
    }
}
