//! Motor de agregación del dashboard
//!
//! Funciones puras sobre el inventario ingerido: clasificación de
//! descartes, resolución de status, agrupaciones, series temporales y
//! ocupación de containers.

pub mod colors;
pub mod dataset;
pub mod discard;
pub mod grouping;
pub mod occupancy;
pub mod snapshot;
pub mod status_resolver;
pub mod time_series;

pub use dataset::{IngestedEntry, InventoryDataset, RawInventory};
pub use discard::{is_discard_label, DISCARD_LABELS};
pub use snapshot::{build_snapshot, build_snapshot_now};
pub use status_resolver::{resolve_status, StatusRegistry};
