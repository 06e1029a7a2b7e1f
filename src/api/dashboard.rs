//! Endpoints del dashboard
//!
//! Todos los cálculos corren sobre la copia en cache; ninguno consulta el
//! backend salvo `/refresh`.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;

use crate::analysis::occupancy::container_occupancy;
use crate::analysis::snapshot::{detail_breakdown, summary_cards};
use crate::analysis::time_series::build_time_series;
use crate::dto::{DashboardQuery, RefreshResponse};
use crate::models::{
    ChartDatum, ContainerOccupancy, DashboardSnapshot, SummaryCards, TimeBucketPoint, ViewParams,
};
use crate::state::AppState;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/summary", get(get_summary))
        .route("/breakdown", get(get_breakdown))
        .route("/occupancy", get(get_occupancy))
        .route("/timeline", get(get_timeline))
        .route("/refresh", post(refresh))
}

/// Dashboard completo
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<DashboardSnapshot> {
    let view: ViewParams = query.into();
    log::debug!("📊 Dashboard solicitado: {:?}", view);
    Json(state.inventory.snapshot(&view).await)
}

async fn get_summary(State(state): State<AppState>) -> Json<SummaryCards> {
    let dataset = state.inventory.dataset().await;
    Json(summary_cards(&dataset))
}

/// Tabla de detalle como datos de gráfico
async fn get_breakdown(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<Vec<ChartDatum>> {
    let view: ViewParams = query.into();
    let dataset = state.inventory.dataset().await;
    let rows = detail_breakdown(&dataset, &view);
    Json(rows.iter().map(ChartDatum::from).collect())
}

async fn get_occupancy(State(state): State<AppState>) -> Json<Vec<ContainerOccupancy>> {
    let dataset = state.inventory.dataset().await;
    Json(container_occupancy(&dataset))
}

async fn get_timeline(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Json<Vec<TimeBucketPoint>> {
    let view: ViewParams = query.into();
    let dataset = state.inventory.dataset().await;
    let now = Utc::now().with_timezone(&dataset.offset());
    Json(build_time_series(&dataset, view.time_range, view.split, now))
}

/// Recarga manual desde el backend
async fn refresh(State(state): State<AppState>) -> Json<RefreshResponse> {
    let outcome = state.inventory.refresh().await;
    Json(RefreshResponse {
        refreshed_at: state.cache.last_refresh().await,
        outcome,
    })
}
