use chrono::Utc;
use sqlx::PgPool;

use super::types::*;
use crate::db::repository;
use crate::report::classify::score_message;
use crate::report::normalize::normalize_number;
use crate::risk::engine::RiskEngine;
use crate::risk::types::{round3, RiskAssessment};

/// Normalize, score, and persist a validated report. The probability is
/// computed exactly once here; it is never recomputed for a stored row.
pub async fn create_report(
    pool: &PgPool,
    number: &str,
    category: &str,
    message: &str,
) -> eyre::Result<ReportResponse> {
    let normalized = normalize_number(number);
    let scam_probability = score_message(message);

    let report =
        repository::insert_report(pool, &normalized, category, message, scam_probability).await?;

    tracing::info!(
        number = %report.number,
        category = %report.category,
        scam_probability = report.scam_probability,
        "Report stored"
    );

    Ok(ReportResponse {
        number: report.number,
        category: report.category,
        message: report.message,
        created_at: report.created_at,
        scam_probability: round3(report.scam_probability),
    })
}

/// One history fetch, then pure computation in the risk engine.
pub async fn get_risk_assessment(
    pool: &PgPool,
    engine: &RiskEngine,
    number: &str,
) -> eyre::Result<RiskAssessment> {
    let normalized = normalize_number(number);
    let history = repository::find_by_number(pool, &normalized).await?;
    Ok(engine.assess(&normalized, &history, Utc::now()))
}

pub async fn get_suspicious_activity(
    pool: &PgPool,
    engine: &RiskEngine,
    number: &str,
) -> eyre::Result<SuspiciousActivityResponse> {
    let normalized = normalize_number(number);
    let history = repository::find_by_number(pool, &normalized).await?;
    let activity = engine.suspicious_activity(&history, Utc::now());
    Ok(SuspiciousActivityResponse {
        number: normalized,
        activity,
    })
}

pub async fn get_trending(pool: &PgPool, limit: i64) -> eyre::Result<TrendingResponse> {
    let items = repository::group_by_number(pool, limit)
        .await?
        .into_iter()
        .map(|(number, reports)| TrendingEntry { number, reports })
        .collect();
    Ok(TrendingResponse { items, limit })
}

pub async fn get_dashboard(pool: &PgPool) -> eyre::Result<DashboardResponse> {
    let total_reports = repository::count_all(pool).await?;
    let category_distribution = repository::group_by_category(pool)
        .await?
        .into_iter()
        .collect();
    let trending = repository::group_by_number(pool, 10)
        .await?
        .into_iter()
        .map(|(number, reports)| TrendingEntry { number, reports })
        .collect();

    Ok(DashboardResponse {
        total_reports,
        category_distribution,
        trending,
    })
}
