//! System endpoints: health check, region catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::RegionDto;
use crate::app_state::AppState;
use crate::domain::Platform;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    persistence: &'static str,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, current timestamp and the active persistence backend.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            persistence: state.summoner_service.store().backend(),
        }),
    )
}

/// `GET /config/regions` — List supported platforms.
#[utoipa::path(
    get,
    path = "/config/regions",
    tag = "System",
    summary = "List supported regions",
    description = "Returns every platform code accepted in summoner routes together with the routing region used for its match history.",
    responses(
        (status = 200, description = "Region catalog", body = Vec<RegionDto>),
    )
)]
pub async fn regions_handler() -> impl IntoResponse {
    let regions: Vec<RegionDto> = Platform::ALL
        .into_iter()
        .map(|p| RegionDto {
            platform: p.as_str(),
            routing_region: p.routing_region().as_str(),
        })
        .collect();
    (StatusCode::OK, Json(regions))
}

/// System routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/regions", get(regions_handler))
}
