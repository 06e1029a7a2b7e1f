//! Endpoints de mutación del estoque

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{post, put},
    Router,
};
use validator::Validate;

use crate::dto::{
    ApiResponse, BulkStatusRequest, ContainerAssignmentRequest, ContainerAssignmentResponse,
};
use crate::services::BatchUpdateResult;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn create_stock_router() -> Router<AppState> {
    Router::new()
        .route("/bulk-status", post(bulk_update_status))
        .route("/:id/container", put(reassign_container))
}

/// Cambio de status en lote; las fallas parciales viajan en el cuerpo
async fn bulk_update_status(
    State(state): State<AppState>,
    Json(request): Json<BulkStatusRequest>,
) -> AppResult<Json<BatchUpdateResult>> {
    request.validate()?;
    let result = state
        .bulk
        .bulk_update_status(&request.entry_ids, &request.status)
        .await?;
    Ok(Json(result))
}

async fn reassign_container(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ContainerAssignmentRequest>,
) -> AppResult<Json<ApiResponse<ContainerAssignmentResponse>>> {
    state
        .bulk
        .reassign_container(&id, request.container_id.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(ContainerAssignmentResponse {
        entry_id: id,
        container_id: request.container_id,
    })))
}
