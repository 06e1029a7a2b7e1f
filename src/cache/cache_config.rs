//! Configuración de cache
//!
//! Este módulo contiene la configuración del store en memoria del inventario.

use serde::{Deserialize, Serialize};

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Capacidad del canal de eventos de cambio
    pub channel_capacity: usize,
    /// Recarga periódica (segundos); `None` desactiva
    pub auto_refresh_secs: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
            auto_refresh_secs: None,
        }
    }
}
