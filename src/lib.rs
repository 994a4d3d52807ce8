pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
pub mod journal;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

use axum::{Router, middleware as axum_middleware};
use middleware::{cors_layer, create_global_rate_limiter, rate_limit_middleware};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    db::PgStore,
    errors::AppError,
    services::{ocr::MockMenuOcr, places::GooglePlaces},
    state::AppState,
};

/// The full application router with rate limiting and CORS applied.
pub fn build_app(state: AppState) -> Router {
    let global_rate_limiter = create_global_rate_limiter();
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { "404 Not Found" })
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to connect to Postgres: {}", e)))?;

    let store = PgStore::new(pool);
    store.migrate().await?;

    let state = AppState {
        store: Arc::new(store),
        places: Arc::new(GooglePlaces::new(config.google_maps_api_key.clone())),
        ocr: Arc::new(MockMenuOcr::new(config.ocr_delay)),
        config: Arc::new(config),
    };

    let port = state.config.port;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {port}: {e}")))?;

    tracing::info!("Menu journal server running at http://127.0.0.1:{port}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Server error: {}", e);
        AppError::InternalError
    })
}
