use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    http::{HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use once_cell::sync::Lazy;
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod config;
pub mod controllers;
pub mod db;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use config::{Config, StoreBackend};
use db::{DocumentStore, MemoryStore, MongoStore};
use state::AppState;
use utils::error::{AppError, AppResult};

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

fn cors_layer(origin: Option<&str>) -> AppResult<CorsLayer> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let headers = [
        axum::http::header::CONTENT_TYPE,
        axum::http::header::ACCEPT,
        axum::http::header::AUTHORIZATION,
        axum::http::header::COOKIE,
    ];

    let cors = match origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .map_err(|_| AppError::Config(format!("Failed to parse CORS origin: {}", origin)))?;
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(methods)
                .allow_headers(headers)
                .allow_credentials(true)
        }
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers),
    };

    Ok(cors)
}

/// The full HTTP surface over `state`.
pub fn app(state: AppState) -> AppResult<Router> {
    let cors = cors_layer(state.config.cors_origin.as_deref())?;

    Ok(Router::new()
        .route("/", get(root))
        .nest("/api/events", routes::event_routes::event_routes(state.clone()))
        .nest("/api/polls", routes::poll_routes::poll_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

pub async fn start_server() -> AppResult<()> {
    Lazy::force(&START_TIME);

    let config = Config::load()?;

    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Mongo => Arc::new(MongoStore::new(db::connection::init_db(&config).await?)),
        StoreBackend::Memory => {
            info!("using in-memory store, nothing will be persisted");
            Arc::new(MemoryStore::new())
        }
    };

    let addr = config.server_addr;
    let app = app(AppState::new(store, config))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to address {}: {}", addr, e)))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

/// From the largest non-zero unit down, e.g. `1d 2h 0m 5s`, `3m 7s`, `42s`.
fn format_uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let units = [
        (total / 86_400, "d"),
        (total / 3_600 % 24, "h"),
        (total / 60 % 60, "m"),
        (total % 60, "s"),
    ];

    let first = units
        .iter()
        .position(|(value, _)| *value > 0)
        .unwrap_or(units.len() - 1);

    units[first..]
        .iter()
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect::<Vec<_>>()
        .join(" ")
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "uptime": format_uptime(START_TIME.elapsed()),
    }))
}
