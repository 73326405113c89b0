mod ai;
mod auth;
mod config;
mod errors;
mod interview;
mod models;
mod resume;
mod routes;
mod state;
mod store;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai::service::AiService;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::MemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mockboard API v{}", env!("CARGO_PKG_VERSION"));

    if config.jwt_secret == config::DEV_JWT_SECRET {
        warn!("JWT_SECRET is not set; using the development default");
    }

    // All records live in process memory; a restart discards them.
    let store = Arc::new(MemoryStore::new());
    info!("In-memory record store initialized");

    let ai = Arc::new(AiService::new(config.anthropic_api_key.clone()));
    if ai.is_live() {
        info!("AI credential configured (model: {})", ai::MODEL);
    } else {
        warn!("ANTHROPIC_API_KEY not set; serving deterministic canned content");
    }

    // Build app state
    let state = AppState {
        store,
        ai,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(config.cors_allowed_origin.as_deref())?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Restricts CORS to the configured frontend origin; permissive when none is
/// configured (local development).
fn build_cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer> {
    use axum::http::{header, HeaderValue, Method};

    Ok(match allowed_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(
                origin
                    .parse::<HeaderValue>()
                    .context("CORS_ALLOWED_ORIGIN is not a valid origin")?,
            )
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        None => CorsLayer::permissive(),
    })
}
