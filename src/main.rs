//! summoner-gateway server entry point.
//!
//! Starts the Axum HTTP server and the daily expiry sweeper.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use summoner_gateway::api;
use summoner_gateway::app_state::AppState;
use summoner_gateway::background::ExpirySweeper;
use summoner_gateway::config::{GatewayConfig, LogFormat};
use summoner_gateway::persistence::{
    InMemorySummonerStore, PostgresSummonerStore, SummonerStore,
};
use summoner_gateway::service::SummonerService;
use summoner_gateway::upstream::{RiotClient, SummonerSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = GatewayConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting summoner-gateway");

    // Build persistence layer
    let store: Arc<dyn SummonerStore> = if config.persistence_enabled {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await?;
        let store = PostgresSummonerStore::new(pool);
        store.migrate().await?;
        Arc::new(store)
    } else {
        tracing::warn!("persistence disabled, using in-memory store");
        Arc::new(InMemorySummonerStore::new())
    };

    // Build upstream client
    let source: Arc<dyn SummonerSource> = Arc::new(RiotClient::new(
        config.riot_api_key.clone(),
        config.riot_api_base_url.clone(),
        config.upstream_timeout,
        config.match_window,
    )?);

    // Build service layer
    let summoner_service = Arc::new(SummonerService::new(Arc::clone(&store), source));

    // Start background jobs
    let cancel = CancellationToken::new();
    let sweeper = if config.sweep_enabled {
        let sweeper = ExpirySweeper::new(store, config.sweep_policy);
        Some(tokio::spawn(sweeper.run(cancel.clone())))
    } else {
        tracing::info!("expiry sweeper disabled");
        None
    };

    // Build router
    let app = Router::new()
        .merge(api::build_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { summoner_service });

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await?;

    cancel.cancel();
    if let Some(handle) = sweeper {
        let _ = handle.await;
    }
    tracing::info!("shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C and cancels background jobs.
async fn shutdown_signal(cancel: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
    cancel.cancel();
}
