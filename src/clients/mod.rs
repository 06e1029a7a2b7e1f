//! Clients - acceso al backend de datos
//!
//! Este módulo contiene el cliente HTTP del backend-as-a-service y la
//! abstracción `InventoryDataSource` que consumen los servicios.

pub mod memory_source;
pub mod supabase_client;

pub use memory_source::InMemoryDataSource;
pub use supabase_client::{SelectQuery, SupabaseClient};

use async_trait::async_trait;

use crate::analysis::RawInventory;
use crate::models::{Container, NewTireStatus, StockEntry, StockEntryPatch, TireModel, TireStatus};
use crate::utils::errors::AppResult;

/// Fuente remota de las tablas del inventario
#[async_trait]
pub trait InventoryDataSource: Send + Sync {
    async fn fetch_entries(&self) -> AppResult<Vec<StockEntry>>;

    async fn fetch_containers(&self) -> AppResult<Vec<Container>>;

    async fn fetch_models(&self) -> AppResult<Vec<TireModel>>;

    async fn fetch_statuses(&self) -> AppResult<Vec<TireStatus>>;

    /// Actualizar una entrada; `NotFound` si el id no existe
    async fn update_entry(&self, id: &str, patch: &StockEntryPatch) -> AppResult<()>;

    async fn insert_status(&self, status: &NewTireStatus) -> AppResult<TireStatus>;

    /// Las cuatro tablas en paralelo
    async fn fetch_all(&self) -> AppResult<RawInventory> {
        let (entries, containers, models, statuses) = tokio::try_join!(
            self.fetch_entries(),
            self.fetch_containers(),
            self.fetch_models(),
            self.fetch_statuses(),
        )?;

        Ok(RawInventory {
            entries,
            containers,
            models,
            statuses,
        })
    }
}
