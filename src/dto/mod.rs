//! DTOs de la API HTTP

pub mod api_response;
pub mod dashboard_dto;
pub mod stock_dto;

pub use api_response::ApiResponse;
pub use dashboard_dto::*;
pub use stock_dto::*;
