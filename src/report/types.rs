use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored scam report. Immutable once inserted; `number` is always the
/// normalized form.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: i64,
    pub number: String,
    pub category: String,
    pub message: String,
    pub scam_probability: f64,
    pub created_at: DateTime<Utc>,
}
