//! API endpoints
//!
//! Este módulo contiene los endpoints de la API.

pub mod dashboard;
pub mod statuses;
pub mod stock;

use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api/dashboard", dashboard::create_dashboard_router())
        .nest("/api/statuses", statuses::create_statuses_router())
        .nest("/api/stock", stock::create_stock_router())
}

/// Health check con el estado del cache
async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let dataset = state.inventory.dataset().await;
    Json(json!({
        "status": "healthy",
        "service": "tire-inventory",
        "entries": dataset.entries().len(),
        "last_refresh": state.cache.last_refresh().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
