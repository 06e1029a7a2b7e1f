use serde::{Deserialize, Serialize};

use crate::models::{GroupBy, SeriesSplit, TimeRange, ViewParams};

// Query string del dashboard; todo es opcional
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub time_range: Option<TimeRange>,
    pub group_by: Option<GroupBy>,
    pub selected_dimension: Option<String>,
    pub split: Option<SeriesSplit>,
}

impl From<DashboardQuery> for ViewParams {
    fn from(query: DashboardQuery) -> Self {
        ViewParams {
            time_range: query.time_range.unwrap_or_default(),
            selected_dimension: query
                .selected_dimension
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            group_by: query.group_by.unwrap_or_default(),
            split: query.split.unwrap_or_default(),
        }
    }
}

// Query de resolución de status
#[derive(Debug, Deserialize)]
pub struct ResolveStatusQuery {
    pub name: Option<String>,
}

// Respuesta de recarga
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub refreshed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(flatten)]
    pub outcome: crate::services::RefreshOutcome,
}
