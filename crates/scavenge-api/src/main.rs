//! Scavenge API server entry point.

use std::error::Error;
use std::sync::{Arc, Mutex};

use axum::http::HeaderValue;
use scavenge_api::config::AppConfig;
use scavenge_api::error::AppError;
use scavenge_api::routes;
use scavenge_api::state::{AppState, HuntSettings};
use scavenge_api::telemetry;
use scavenge_core::clock::{Clock, SystemClock};
use scavenge_core::repository::HuntStore;
use scavenge_core::rng::{DeterministicRng, SystemRng};
use scavenge_store::{InMemoryHuntStore, MIGRATOR, PgHuntStore};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting Scavenge API server");

    let store = build_store(&config).await?;
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(SystemClock);
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(SystemRng::new()));
    let app_state = AppState::new(clock, rng, store, HuntSettings::from(&config));

    let app = routes::router()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config)?)
        .with_state(app_state);

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider {
        provider.shutdown()?;
    }

    Ok(())
}

/// `PostgreSQL` when `DATABASE_URL` is set, otherwise an in-memory store.
async fn build_store(config: &AppConfig) -> Result<Arc<dyn HuntStore>, AppError> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, using in-memory store");
        return Ok(Arc::new(InMemoryHuntStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    MIGRATOR.run(&pool).await?;

    Ok(Arc::new(PgHuntStore::new(pool)))
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer, AppError> {
    let Some(origin) = &config.cors_origin else {
        return Ok(CorsLayer::permissive());
    };
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| AppError::Config(format!("CORS_ORIGIN is not a valid header value: {e}")))?;
    Ok(CorsLayer::permissive().allow_origin(origin))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
