//! Endpoints de status

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::dto::{ApiResponse, ResolveStatusQuery};
use crate::models::{NewTireStatus, TireStatus};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_statuses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_status))
        .route("/resolve", get(resolve_status))
}

/// Resolver un status crudo (nunca falla: cae en el default o en el placeholder)
async fn resolve_status(
    State(state): State<AppState>,
    Query(query): Query<ResolveStatusQuery>,
) -> Json<TireStatus> {
    Json(state.inventory.resolve_status(query.name.as_deref()).await)
}

async fn register_status(
    State(state): State<AppState>,
    Json(request): Json<NewTireStatus>,
) -> AppResult<(StatusCode, Json<ApiResponse<TireStatus>>)> {
    let status = state.inventory.register_status(request).await?;
    let message = format!("Status '{}' registrado", status.name);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(status, message)),
    ))
}
