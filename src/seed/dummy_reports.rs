use chrono::{Duration, Utc};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::repository::{self, ReportRow};
use crate::report::classify::score_message;
use crate::report::normalize::normalize_number;

#[derive(Debug, Deserialize)]
struct SeedReport {
    number: String,
    category: String,
    message: String,
    /// Precomputed probability (e.g. from an upstream extraction path);
    /// scored from the message when absent.
    scam_probability: Option<f64>,
    /// Backdates the report relative to load time.
    hours_ago: Option<i64>,
}

/// Seed sample reports from a JSON file. Numbers are normalized and
/// unscored messages run through the shared scorer, same as live ingest.
/// Appends only; existing rows are left untouched.
pub async fn seed_reports(pool: &PgPool, path: &str) -> eyre::Result<u64> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("Failed to read seed reports file '{}': {}", path, e))?;

    let seeds: Vec<SeedReport> = serde_json::from_str(&content)
        .map_err(|e| eyre::eyre!("Failed to parse seed reports JSON: {}", e))?;

    let now = Utc::now();
    let rows: Vec<ReportRow> = seeds
        .into_iter()
        .map(|seed| {
            let scam_probability = seed
                .scam_probability
                .unwrap_or_else(|| score_message(&seed.message));
            ReportRow {
                number: normalize_number(&seed.number),
                category: seed.category,
                message: seed.message,
                scam_probability,
                created_at: now - Duration::hours(seed.hours_ago.unwrap_or(0)),
            }
        })
        .collect();

    let count = repository::insert_reports_batch(pool, &rows).await?;
    tracing::info!(count, "Seed reports loaded from JSON");
    Ok(count)
}
