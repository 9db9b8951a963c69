/// Main application entry point
mod clients;
mod config;
mod domain;
mod errors;
mod handlers;
mod repo;
mod routes;
mod services;
mod utils;

use crate::clients::UsgsClient;
use crate::config::AppConfig;
use crate::handlers::AppState;
use crate::repo::{init_db, FeedCacheRepo};
use crate::routes::build_router;
use crate::services::EarthquakeService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load configuration
    let config = AppConfig::from_env()?;
    info!("Configuration loaded successfully");

    // Initialize database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    info!("Database connection pool established");

    // Initialize cache schema
    init_db(&pool).await?;
    info!("Cache schema initialized");

    // Wire the cache, origin client, and orchestrator
    let cache_repo = FeedCacheRepo::new(pool);
    let usgs_client = UsgsClient::new(config.usgs_base_url.clone())?;
    let earthquake_service = Arc::new(EarthquakeService::new(
        Arc::new(cache_repo),
        Arc::new(usgs_client),
        config.cache_namespace.clone(),
        config.cache_ttl_seconds,
    ));

    let state = AppState { earthquake_service };

    // Build router
    let app = build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("quake-feed service listening on {}", addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
