//! Summoner lookup and refresh handlers.

use axum::extract::{Path, State};
use axum::http::HeaderName;
use axum::http::header::HeaderValue;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{SummonerResponse, cache_header_value};
use crate::app_state::AppState;
use crate::domain::{Platform, SummonerIdentity};
use crate::error::{ErrorResponse, GatewayError};
use crate::service::SummonerLookup;

/// Response header reporting whether the cache served the request.
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// `GET /summoners/{region}/{name}` — Cached summoner lookup.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRegion`] for unknown platform codes and
/// the upstream-derived error when a cold fetch fails.
#[utoipa::path(
    get,
    path = "/summoners/{region}/{name}",
    tag = "Summoners",
    summary = "Look up a summoner",
    description = "Serves the stored aggregate when one exists, regardless of age. Otherwise fetches profile, rank and recent ranked matches upstream and caches them.",
    params(
        ("region" = String, Path, description = "Platform code, e.g. `euw1`"),
        ("name" = String, Path, description = "Summoner name"),
    ),
    responses(
        (status = 200, description = "Summoner aggregate", body = SummonerResponse,
            headers(("x-cache" = String, description = "`hit`, `miss` or `miss-unsaved`"))),
        (status = 400, description = "Unknown region", body = ErrorResponse),
        (status = 404, description = "Summoner not found upstream", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn get_summoner(
    State(state): State<AppState>,
    Path((region, name)): Path<(String, String)>,
) -> Result<impl IntoResponse, GatewayError> {
    let identity = identity_from_path(&region, name)?;
    let lookup = state.summoner_service.lookup(&identity).await?;
    Ok(respond(lookup))
}

/// `GET /summoners/{region}/{name}/update` — Force a re-fetch.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRegion`] for unknown platform codes and
/// the upstream-derived error when the fetch fails. A failed refresh
/// leaves any stored record untouched.
#[utoipa::path(
    get,
    path = "/summoners/{region}/{name}/update",
    tag = "Summoners",
    summary = "Refresh a summoner",
    description = "Bypasses the cache, fetches the summoner upstream and overwrites the stored record.",
    params(
        ("region" = String, Path, description = "Platform code, e.g. `euw1`"),
        ("name" = String, Path, description = "Summoner name"),
    ),
    responses(
        (status = 200, description = "Freshly fetched aggregate", body = SummonerResponse,
            headers(("x-cache" = String, description = "`miss` or `miss-unsaved`"))),
        (status = 400, description = "Unknown region", body = ErrorResponse),
        (status = 404, description = "Summoner not found upstream", body = ErrorResponse),
        (status = 502, description = "Upstream failure", body = ErrorResponse),
    )
)]
pub async fn refresh_summoner(
    State(state): State<AppState>,
    Path((region, name)): Path<(String, String)>,
) -> Result<impl IntoResponse, GatewayError> {
    let identity = identity_from_path(&region, name)?;
    let lookup = state.summoner_service.refresh(&identity).await?;
    Ok(respond(lookup))
}

fn identity_from_path(region: &str, name: String) -> Result<SummonerIdentity, GatewayError> {
    let platform: Platform = region.parse()?;
    Ok(SummonerIdentity::new(name, platform))
}

fn respond(lookup: SummonerLookup) -> impl IntoResponse {
    tracing::debug!(
        name = %lookup.summoner.identity.name,
        region = %lookup.summoner.identity.platform,
        origin = ?lookup.origin,
        "Summoner served"
    );
    let cache = HeaderValue::from_static(cache_header_value(lookup.origin));
    ([(X_CACHE, cache)], Json(SummonerResponse::from(lookup)))
}

/// Summoner routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/summoners/{region}/{name}", get(get_summoner))
        .route("/summoners/{region}/{name}/update", get(refresh_summoner))
}
