//! Cache
//!
//! Este módulo contiene el store en memoria del inventario y su configuración.

pub mod cache_config;
pub mod inventory_cache;

pub use cache_config::CacheConfig;
pub use inventory_cache::{DataChange, InventoryCache};
