//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: carga del
//! inventario, cálculo del dashboard y mutaciones sobre el backend.

pub mod bulk_update_service;
pub mod inventory_service;

pub use bulk_update_service::{BatchStatus, BatchUpdateResult, BulkUpdateService, ItemOutcome};
pub use inventory_service::{InventoryService, RefreshOutcome};
