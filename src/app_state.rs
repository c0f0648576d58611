//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::SummonerService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Summoner service for lookups and refreshes.
    pub summoner_service: Arc<SummonerService>,
}
