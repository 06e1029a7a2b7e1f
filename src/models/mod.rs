//! Modelos del sistema
//!
//! Este módulo contiene los modelos que mapean las filas del backend
//! (estoque, containers, modelos y status) y los registros derivados
//! del dashboard.

pub mod container;
pub mod dashboard;
pub mod stock_entry;
pub mod tire_model;
pub mod tire_status;

pub use container::Container;
pub use dashboard::*;
pub use stock_entry::{StockEntry, StockEntryPatch};
pub use tire_model::{TireModel, TireType};
pub use tire_status::{NewTireStatus, TireStatus, NEUTRAL_GRAY};

/// Deserializadores tolerantes para identificadores.
///
/// El backend devuelve ids como uuid (string) o como entero según la tabla.
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
    }

    impl From<RawId> for String {
        fn from(raw: RawId) -> Self {
            match raw {
                RawId::Text(s) => s,
                RawId::Int(n) => n.to_string(),
            }
        }
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        RawId::deserialize(deserializer).map(String::from)
    }

    /// Id opcional: `null` y `""` se tratan como ausencia de referencia
    pub fn opt_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<RawId>::deserialize(deserializer)?;
        Ok(raw
            .map(String::from)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }
}
