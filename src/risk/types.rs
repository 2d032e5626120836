use chrono::{DateTime, Utc};
use serde::Serialize;

/// Short-window (60 min) behavioral flags for one number.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct AnomalyFlags {
    pub spike: bool,
    pub burst: bool,
    pub repeated_message: bool,
}

impl AnomalyFlags {
    /// Names of the active flags, for the assessment's `anomalies` list.
    pub fn active_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.spike {
            names.push("spike".to_string());
        }
        if self.burst {
            names.push("burst".to_string());
        }
        if self.repeated_message {
            names.push("repeated_message".to_string());
        }
        names
    }
}

/// The five independent 48-hour signals behind the suspicious-activity
/// verdict.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SuspiciousSignals {
    pub recent_surge: bool,
    pub otp_focus: bool,
    pub high_prob_cluster: bool,
    pub victim_self_report: bool,
    pub multi_category_attack: bool,
}

impl SuspiciousSignals {
    /// The vote table: signal name paired with whether it fired. The
    /// verdict counts true votes against a configured quorum rather than
    /// hard-coding any single trigger.
    pub fn votes(&self) -> [(&'static str, bool); 5] {
        [
            ("recent_surge", self.recent_surge),
            ("otp_focus", self.otp_focus),
            ("high_prob_cluster", self.high_prob_cluster),
            ("victim_self_report", self.victim_self_report),
            ("multi_category_attack", self.multi_category_attack),
        ]
    }

    pub fn active_count(&self) -> usize {
        self.votes().iter().filter(|(_, fired)| *fired).count()
    }
}

/// Majority-of-signals verdict over the last 48 hours of a number's
/// reports. Behavioral inference only; carries its own disclaimer.
#[derive(Debug, Clone, Serialize)]
pub struct SuspiciousActivity {
    pub suspicious_activity_detected: bool,
    pub confidence: Confidence,
    pub likely_scenario: String,
    pub flags: SuspiciousSignals,
    pub recent_report_count: usize,
    pub otp_proportion: f64,
    pub unique_categories: Vec<String>,
    pub disclaimer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
}

/// Three-tier risk label shared by every scoring surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Trailing display summary of one report inside a risk assessment.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub scam_probability: f64,
}

/// Full per-number risk verdict: score, level, anomaly names, the
/// suspicious-activity result, and the most recent report summaries.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub number: String,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub report_count: usize,
    pub anomalies: Vec<String>,
    pub suspicious_activity: SuspiciousActivity,
    pub recent_reports: Vec<ReportSummary>,
}

/// Round to three decimals for response payloads.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
