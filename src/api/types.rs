use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::risk::types::{RiskLevel, SuspiciousActivity};

// ============================================================
// Requests
// ============================================================

#[derive(Debug, Deserialize)]
pub struct ReportIn {
    pub number: String,
    pub category: String,
    pub message: String,
}

impl ReportIn {
    /// Bounds-check the trimmed fields; the number itself stays lenient
    /// beyond its length (normalization never rejects).
    pub fn validate(&self) -> Result<(), ApiError> {
        let number_len = self.number.trim().chars().count();
        if !(7..=20).contains(&number_len) {
            return Err(ApiError::validation(
                "number",
                "must be between 7 and 20 characters",
            ));
        }
        let category_len = self.category.trim().chars().count();
        if !(2..=40).contains(&category_len) {
            return Err(ApiError::validation(
                "category",
                "must be between 2 and 40 characters",
            ));
        }
        let message_len = self.message.trim().chars().count();
        if !(4..=2000).contains(&message_len) {
            return Err(ApiError::validation(
                "message",
                "must be between 4 and 2000 characters",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TrendingParams {
    pub limit: Option<i64>,
}

// ============================================================
// Responses
// ============================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DbHealthResponse {
    pub status: &'static str,
    pub db: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub scam_probability: f64,
    pub risk_level: RiskLevel,
    pub model: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub number: String,
    pub category: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub scam_probability: f64,
}

#[derive(Debug, Serialize)]
pub struct TrendingEntry {
    pub number: String,
    pub reports: i64,
}

#[derive(Debug, Serialize)]
pub struct TrendingResponse {
    pub items: Vec<TrendingEntry>,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub total_reports: i64,
    pub category_distribution: BTreeMap<String, i64>,
    pub trending: Vec<TrendingEntry>,
}

/// The suspicious-activity result merged with the normalized number it
/// was computed for.
#[derive(Debug, Serialize)]
pub struct SuspiciousActivityResponse {
    pub number: String,
    #[serde(flatten)]
    pub activity: SuspiciousActivity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(number: &str, category: &str, message: &str) -> ReportIn {
        ReportIn {
            number: number.to_string(),
            category: category.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_report_passes() {
        let p = payload("9841234567", "OTP Theft Attempt", "Send me the OTP now");
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_number_length_bounds() {
        assert!(payload("123456", "Scam", "long enough").validate().is_err());
        assert!(payload(&"9".repeat(21), "Scam", "long enough")
            .validate()
            .is_err());
        assert!(payload("1234567", "Scam", "long enough").validate().is_ok());
    }

    #[test]
    fn test_category_length_bounds() {
        assert!(payload("9841234567", "X", "long enough").validate().is_err());
        assert!(payload("9841234567", &"c".repeat(41), "long enough")
            .validate()
            .is_err());
    }

    #[test]
    fn test_message_length_bounds() {
        assert!(payload("9841234567", "Scam", "abc").validate().is_err());
        assert!(payload("9841234567", "Scam", &"m".repeat(2001))
            .validate()
            .is_err());
        assert!(payload("9841234567", "Scam", "abcd").validate().is_ok());
    }

    #[test]
    fn test_validation_reports_the_field() {
        let err = payload("123", "Scam", "long enough").validate().unwrap_err();
        match err {
            ApiError::Validation { field, .. } => assert_eq!(field, "number"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_does_not_satisfy_minimums() {
        // Trimmed length is what counts.
        assert!(payload("9841234567", "Scam", "  ab  ").validate().is_err());
    }
}
