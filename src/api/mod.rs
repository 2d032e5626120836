pub mod error;
pub mod handlers;
pub mod queries;
pub mod types;

use axum::routing::{get, post};
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::risk::engine::RiskEngine;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub engine: RiskEngine,
}

pub fn router(pool: PgPool, engine: RiskEngine) -> Router {
    let state = Arc::new(AppState { pool, engine });

    Router::new()
        .route("/api/v1/health", get(handlers::health))
        .route("/api/v1/health/db", get(handlers::health_db))
        .route("/api/v1/classify", post(handlers::classify))
        .route("/api/v1/reports", post(handlers::create_report))
        .route("/api/v1/number/{number}", get(handlers::number_risk))
        .route(
            "/api/v1/suspicious-activity/{number}",
            get(handlers::suspicious_activity),
        )
        .route("/api/v1/trending", get(handlers::trending))
        .route("/api/v1/dashboard", get(handlers::dashboard))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(pool: PgPool, engine: RiskEngine, host: &str, port: u16) -> eyre::Result<()> {
    let app = router(pool, engine);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, stopping API server");
        })
        .await?;
    Ok(())
}
