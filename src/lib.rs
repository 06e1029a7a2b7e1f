//! Tire inventory dashboard
//!
//! Agregación del inventario de pneus (status, modelos, containers, series
//! temporales y ocupación) sobre un backend PostgREST, expuesta por HTTP.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod clients;
pub mod config;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_for;
use crate::state::AppState;

/// Router completo con sus capas
pub fn build_app(state: AppState) -> Router {
    let cors = cors_for(&state.config.cors_origins);

    api::create_api_router()
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
