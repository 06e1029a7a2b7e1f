//! Modelos del dashboard
//!
//! Registros derivados (nunca persistidos) que se recalculan en cada cambio
//! de datos o de parámetros de visualización.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Ventana de tiempo de las series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimeRange {
    #[serde(rename = "7")]
    #[default]
    Last7Days,
    #[serde(rename = "30")]
    Last30Days,
    #[serde(rename = "monthly")]
    Monthly,
}

impl TimeRange {
    /// Número de buckets de la ventana
    pub fn bucket_count(&self) -> u32 {
        match self {
            TimeRange::Last7Days => 7,
            TimeRange::Last30Days => 30,
            TimeRange::Monthly => 6,
        }
    }
}

/// Dimensión de agrupación de las tablas de detalle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Status,
    Model,
    Container,
}

/// Sub-dimensión de las series temporales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SeriesSplit {
    /// Slick / Wet
    #[default]
    Type,
    /// Un contador por nombre de modelo
    Model,
}

/// Parámetros de visualización
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewParams {
    #[serde(default)]
    pub time_range: TimeRange,
    #[serde(default)]
    pub selected_dimension: Option<String>,
    #[serde(default)]
    pub group_by: GroupBy,
    #[serde(default)]
    pub split: SeriesSplit,
}

/// Punto genérico consumido por gráficos y tablas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDatum {
    pub label: String,
    pub value: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_values: Option<BTreeMap<String, u64>>,
}

/// Fila de una tabla agrupada
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCount {
    /// Clave normalizada (nombre de status, id de modelo o de container)
    pub key: String,
    pub label: String,
    pub count: u64,
    pub color: Option<String>,
    /// Containers distintos referenciados por las entradas del grupo
    pub distinct_containers: u64,
}

impl From<&GroupCount> for ChartDatum {
    fn from(group: &GroupCount) -> Self {
        let mut secondary = BTreeMap::new();
        secondary.insert("containers".to_string(), group.distinct_containers);

        Self {
            label: group.label.clone(),
            value: group.count,
            color: group.color.clone(),
            secondary_values: Some(secondary),
        }
    }
}

/// Punto de una serie temporal
///
/// Se serializa como `{ "date": "17/10", "total": 3, "slick": 2, "wet": 1 }`.
/// Una clave ausente equivale a cero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBucketPoint {
    #[serde(rename = "date")]
    pub label: String,
    #[serde(skip)]
    pub start: Option<DateTime<FixedOffset>>,
    #[serde(skip)]
    pub end: Option<DateTime<FixedOffset>>,
    pub total: u64,
    #[serde(flatten)]
    pub counts: BTreeMap<String, u64>,
}

impl TimeBucketPoint {
    pub fn count_for(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }
}

/// Nivel de ocupación (solo afecta al color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyLevel {
    Normal,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerOccupancy {
    pub container_id: String,
    pub name: String,
    pub location: Option<String>,
    pub capacity: i64,
    pub active_count: u64,
    pub percentage: u32,
    pub level: OccupancyLevel,
    pub color: String,
}

/// Calidad de los datos recibidos del backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataQualityReport {
    pub raw_entries: u64,
    pub corrupted_barcodes: u64,
    pub unparsable_timestamps: u64,
    pub unresolved_models: u64,
    pub unresolved_containers: u64,
    pub unregistered_statuses: u64,
}

/// Cards del topo del dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCards {
    pub total_active: u64,
    pub total_discarded: u64,
    pub total_entries: u64,
    pub unassigned_active: u64,
    pub slick_active: u64,
    pub wet_active: u64,
    pub corrupted_entries: u64,
}

/// Payload completo del dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub view: ViewParams,
    pub summary: SummaryCards,
    pub status_breakdown: Vec<ChartDatum>,
    pub detail: Vec<GroupCount>,
    pub occupancy: Vec<ContainerOccupancy>,
    pub timeline: Vec<TimeBucketPoint>,
    /// Color de cada clave de `timeline`
    pub series_colors: BTreeMap<String, String>,
    pub data_quality: DataQualityReport,
}
