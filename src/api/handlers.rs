use axum::extract::{Path, Query, State};
use axum::Json;
use std::sync::Arc;

use super::error::ApiError;
use super::queries;
use super::types::*;
use super::AppState;
use crate::report::classify::score_message;
use crate::risk::types::{round3, RiskAssessment};

type ApiResult<T> = Result<Json<T>, ApiError>;

const CLASSIFIER_MODEL: &str = "keyword-heuristic";

const MAX_TRENDING_LIMIT: i64 = 100;

// ============================================================
// Health
// ============================================================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Degraded rather than failing: an unreachable store is reported as a
/// well-formed body, not a 5xx from the handler.
pub async fn health_db(State(state): State<Arc<AppState>>) -> Json<DbHealthResponse> {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => Json(DbHealthResponse {
            status: "ok",
            db: "connected",
        }),
        Err(err) => {
            tracing::warn!(error = %err, "Database health check failed");
            Json(DbHealthResponse {
                status: "degraded",
                db: "unreachable",
            })
        }
    }
}

// ============================================================
// Classification
// ============================================================

pub async fn classify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClassifyRequest>,
) -> Json<ClassifyResponse> {
    let score = score_message(&req.message);
    Json(ClassifyResponse {
        scam_probability: round3(score),
        risk_level: state.engine.risk_level(score),
        model: CLASSIFIER_MODEL,
    })
}

// ============================================================
// Reports & Risk
// ============================================================

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ReportIn>,
) -> ApiResult<ReportResponse> {
    payload.validate()?;
    let response = queries::create_report(
        &state.pool,
        payload.number.trim(),
        payload.category.trim(),
        payload.message.trim(),
    )
    .await?;
    Ok(Json(response))
}

pub async fn number_risk(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> ApiResult<RiskAssessment> {
    let assessment = queries::get_risk_assessment(&state.pool, &state.engine, &number).await?;
    Ok(Json(assessment))
}

pub async fn suspicious_activity(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> ApiResult<SuspiciousActivityResponse> {
    let response = queries::get_suspicious_activity(&state.pool, &state.engine, &number).await?;
    Ok(Json(response))
}

// ============================================================
// Aggregation
// ============================================================

pub async fn trending(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TrendingParams>,
) -> ApiResult<TrendingResponse> {
    let limit = params.limit.unwrap_or(10).clamp(1, MAX_TRENDING_LIMIT);
    let response = queries::get_trending(&state.pool, limit).await?;
    Ok(Json(response))
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> ApiResult<DashboardResponse> {
    let response = queries::get_dashboard(&state.pool).await?;
    Ok(Json(response))
}
