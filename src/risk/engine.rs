use chrono::{DateTime, Duration, Utc};

use crate::config::RiskConfig;
use crate::report::classify::score_message;
use crate::report::types::Report;

use super::rules;
use super::types::{
    round3, AnomalyFlags, Confidence, ReportSummary, RiskAssessment, RiskLevel,
    SuspiciousActivity, SuspiciousSignals,
};

const DISCLAIMER: &str =
    "This is behavioral analysis from user reports, not telecom-level SIM swap detection.";

const MAX_RECENT_SUMMARIES: usize = 10;

/// The risk engine. Turns one number's report history into anomaly flags,
/// a suspicious-activity verdict, and an aggregate risk assessment.
///
/// Pure compute over an in-memory history slice (most recent first); the
/// caller fetches the history once per request.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Short-window flags from the most recent 60 minutes (configurable).
    pub fn anomaly_flags(&self, history: &[Report], now: DateTime<Utc>) -> AnomalyFlags {
        let recent = rules::recent_window(
            history,
            now,
            Duration::minutes(self.config.flag_window_minutes),
        );
        AnomalyFlags {
            spike: recent.len() >= self.config.spike_min_reports,
            burst: recent.len() >= self.config.burst_min_reports,
            repeated_message: rules::check_repeated_message(&recent),
        }
    }

    /// Majority-of-signals verdict over the last 48 hours (configurable).
    /// No single signal decides on its own; the quorum keeps one noisy
    /// signal from flagging a number.
    pub fn suspicious_activity(
        &self,
        history: &[Report],
        now: DateTime<Utc>,
    ) -> SuspiciousActivity {
        let recent = rules::recent_window(
            history,
            now,
            Duration::hours(self.config.suspicious_window_hours),
        );

        let (otp_focus, otp_proportion) = rules::check_otp_focus(&recent);
        let flags = SuspiciousSignals {
            recent_surge: rules::check_recent_surge(&recent),
            otp_focus,
            high_prob_cluster: rules::check_high_prob_cluster(&recent),
            victim_self_report: rules::check_victim_self_report(&recent),
            multi_category_attack: rules::check_multi_category_attack(&recent),
        };

        let detected = flags.active_count() >= self.config.min_suspicious_signals;
        let likely_scenario = if detected {
            "Possible post-SIM-swap scam or coordinated attack"
        } else {
            "Normal activity"
        };

        SuspiciousActivity {
            suspicious_activity_detected: detected,
            confidence: if detected {
                Confidence::Medium
            } else {
                Confidence::Low
            },
            likely_scenario: likely_scenario.to_string(),
            flags,
            recent_report_count: recent.len(),
            otp_proportion: round3(otp_proportion),
            unique_categories: rules::distinct_categories(&recent),
            disclaimer: DISCLAIMER.to_string(),
        }
    }

    /// Aggregate risk for a number from its full history (most recent
    /// first): latest-message probability, log-scaled report volume, and
    /// additive anomaly bonuses, capped at 0.99.
    pub fn assess(&self, number: &str, history: &[Report], now: DateTime<Utc>) -> RiskAssessment {
        let count = history.len();
        let latest_prob = history
            .first()
            .map(|r| score_message(&r.message))
            .unwrap_or(0.0);

        let flags = self.anomaly_flags(history, now);
        let suspicious = self.suspicious_activity(history, now);

        let mut bonus = 0.0;
        if flags.spike {
            bonus += self.config.spike_bonus;
        }
        if flags.burst {
            bonus += self.config.burst_bonus;
        }
        if flags.repeated_message {
            bonus += self.config.repeated_message_bonus;
        }
        if suspicious.suspicious_activity_detected {
            bonus += self.config.suspicious_activity_bonus;
        }

        // Volume raises risk with diminishing returns so sheer report count
        // cannot dominate without corroborating signals.
        let volume = self.config.volume_weight * (1.0 + count as f64).ln();
        let score = (latest_prob + volume + bonus).min(0.99);

        let recent_reports = history
            .iter()
            .take(MAX_RECENT_SUMMARIES)
            .map(|r| ReportSummary {
                category: r.category.clone(),
                created_at: r.created_at,
                scam_probability: round3(r.scam_probability),
            })
            .collect();

        RiskAssessment {
            number: number.to_string(),
            risk_score: round3(score),
            risk_level: self.risk_level(score),
            report_count: count,
            anomalies: flags.active_names(),
            suspicious_activity: suspicious,
            recent_reports,
        }
    }

    /// The system-wide three-tier label. The classify endpoint and the
    /// aggregator both use this so thresholds cannot drift apart.
    pub fn risk_level(&self, score: f64) -> RiskLevel {
        if score > self.config.high_threshold {
            RiskLevel::High
        } else if score > self.config.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> RiskEngine {
        RiskEngine::new(RiskConfig::default())
    }

    fn report(category: &str, message: &str, prob: f64, minutes_ago: i64, now: DateTime<Utc>) -> Report {
        Report {
            id: 0,
            number: "+9779841234567".to_string(),
            category: category.to_string(),
            message: message.to_string(),
            scam_probability: prob,
            created_at: now - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_spike_without_burst_at_three_reports() {
        let now = Utc::now();
        let history = vec![
            report("A", "m1", 0.1, 5, now),
            report("A", "m2", 0.1, 20, now),
            report("A", "m3", 0.1, 40, now),
        ];
        let flags = engine().anomaly_flags(&history, now);
        assert!(flags.spike);
        assert!(!flags.burst);
    }

    #[test]
    fn test_burst_at_five_reports() {
        let now = Utc::now();
        let history: Vec<Report> = (0..5)
            .map(|i| report("A", &format!("m{}", i), 0.1, i * 10, now))
            .collect();
        let flags = engine().anomaly_flags(&history, now);
        assert!(flags.spike);
        assert!(flags.burst);
    }

    #[test]
    fn test_old_reports_do_not_count_toward_flags() {
        let now = Utc::now();
        let history = vec![
            report("A", "m1", 0.1, 90, now),
            report("A", "m2", 0.1, 120, now),
            report("A", "m3", 0.1, 600, now),
        ];
        let flags = engine().anomaly_flags(&history, now);
        assert!(!flags.spike);
        assert!(!flags.repeated_message);
    }

    #[test]
    fn test_verdict_requires_two_signals() {
        let now = Utc::now();
        // Four reports in 48h (recent_surge), one a victim self-report:
        // exactly two signals.
        let history = vec![
            report("Loan Scam", "message one", 0.1, 60, now),
            report("Loan Scam", "message two", 0.1, 600, now),
            report("Loan Scam", "someone using my number", 0.1, 1200, now),
            report("Loan Scam", "message four", 0.1, 2400, now),
        ];
        let result = engine().suspicious_activity(&history, now);
        assert_eq!(result.flags.active_count(), 2);
        assert!(result.suspicious_activity_detected);
        assert_eq!(result.confidence, Confidence::Medium);

        // Drop the victim phrase: only recent_surge remains.
        let history = vec![
            report("Loan Scam", "message one", 0.1, 60, now),
            report("Loan Scam", "message two", 0.1, 600, now),
            report("Loan Scam", "message three", 0.1, 1200, now),
            report("Loan Scam", "message four", 0.1, 2400, now),
        ];
        let result = engine().suspicious_activity(&history, now);
        assert_eq!(result.flags.active_count(), 1);
        assert!(!result.suspicious_activity_detected);
        assert_eq!(result.confidence, Confidence::Low);
        assert_eq!(result.likely_scenario, "Normal activity");
    }

    #[test]
    fn test_suspicious_activity_empty_history() {
        let now = Utc::now();
        let result = engine().suspicious_activity(&[], now);
        assert!(!result.suspicious_activity_detected);
        assert_eq!(result.recent_report_count, 0);
        assert_eq!(result.otp_proportion, 0.0);
        assert!(result.unique_categories.is_empty());
    }

    #[test]
    fn test_suspicious_activity_reports_window_stats() {
        let now = Utc::now();
        let history = vec![
            report("OTP Theft Attempt", "share the otp", 0.7, 30, now),
            report("Impersonation (Bank)", "your bank account is blocked", 0.7, 120, now),
            report("Lottery Scam", "you won a prize", 0.7, 240, now),
            // Outside 48h, must not show up in the stats.
            report("Loan Scam", "instant loan", 0.1, 60 * 72, now),
        ];
        let result = engine().suspicious_activity(&history, now);
        assert_eq!(result.recent_report_count, 3);
        assert_eq!(result.otp_proportion, 0.667);
        assert_eq!(
            result.unique_categories,
            vec!["Impersonation (Bank)", "Lottery Scam", "OTP Theft Attempt"]
        );
        // otp_focus + high_prob_cluster fire.
        assert!(result.suspicious_activity_detected);
    }

    #[test]
    fn test_assess_empty_history() {
        let now = Utc::now();
        let assessment = engine().assess("+9779841234567", &[], now);
        assert_eq!(assessment.risk_score, 0.0);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.report_count, 0);
        assert!(assessment.anomalies.is_empty());
        assert!(assessment.recent_reports.is_empty());
        assert!(!assessment.suspicious_activity.suspicious_activity_detected);
    }

    #[test]
    fn test_assess_single_report_score() {
        let now = Utc::now();
        let msg = "Your OTP is required, bank verify now";
        let history = vec![report("OTP Theft Attempt", msg, 0.63, 10, now)];
        let assessment = engine().assess("+9779841234567", &history, now);

        // One report: no anomaly bonuses, just message prob + volume term.
        let expected = score_message(msg) + 0.1 * 2.0_f64.ln();
        assert_eq!(assessment.risk_score, round3(expected));
        assert_eq!(assessment.report_count, 1);
        assert!(assessment.anomalies.is_empty());
    }

    #[test]
    fn test_assess_score_capped_at_099() {
        let now = Utc::now();
        // A flood of identical keyword-heavy reports: every bonus accrues
        // and the cap must bind.
        let msg = "otp khalti esewa bank prize reward verify blocked";
        let history: Vec<Report> = (0..40)
            .map(|i| report("OTP Theft Attempt", msg, 0.9, i, now))
            .collect();
        let assessment = engine().assess("+9779841234567", &history, now);
        assert_eq!(assessment.risk_score, 0.99);
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert_eq!(
            assessment.anomalies,
            vec!["spike", "burst", "repeated_message"]
        );
        assert!(assessment.suspicious_activity.suspicious_activity_detected);
    }

    #[test]
    fn test_assess_truncates_recent_reports_to_ten() {
        let now = Utc::now();
        let history: Vec<Report> = (0..15)
            .map(|i| report("A", &format!("m{}", i), 0.1, i * 100, now))
            .collect();
        let assessment = engine().assess("+9779841234567", &history, now);
        assert_eq!(assessment.report_count, 15);
        assert_eq!(assessment.recent_reports.len(), 10);
        // Most recent first.
        assert_eq!(assessment.recent_reports[0].created_at, history[0].created_at);
    }

    #[test]
    fn test_risk_level_thresholds() {
        let e = engine();
        assert_eq!(e.risk_level(0.0), RiskLevel::Low);
        assert_eq!(e.risk_level(0.33), RiskLevel::Low);
        assert_eq!(e.risk_level(0.34), RiskLevel::Medium);
        assert_eq!(e.risk_level(0.66), RiskLevel::Medium);
        assert_eq!(e.risk_level(0.67), RiskLevel::High);
        assert_eq!(e.risk_level(0.99), RiskLevel::High);
    }
}
