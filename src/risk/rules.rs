use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};

use crate::report::types::Report;

/// Categories that indicate account-takeover attempts when they dominate
/// a number's recent reports.
const OTP_FOCUS_CATEGORIES: [&str; 2] = ["OTP Theft Attempt", "Impersonation (Bank)"];

/// Phrases a victim uses when reporting their own hijacked number.
const VICTIM_PHRASES: [&str; 6] = [
    "hacked",
    "not me",
    "someone using",
    "stolen",
    "hijacked",
    "unauthorized",
];

const OTP_FOCUS_MIN_PROPORTION: f64 = 0.5;
const OTP_FOCUS_MIN_REPORTS: usize = 2;
const HIGH_PROB_THRESHOLD: f64 = 0.6;
const HIGH_PROB_MIN_REPORTS: usize = 3;
const MULTI_CATEGORY_MIN_DISTINCT: usize = 3;
const MULTI_CATEGORY_MIN_REPORTS: usize = 4;
const SURGE_MIN_REPORTS: usize = 4;

/// Reports whose `created_at` falls within `window` of `now`.
pub fn recent_window<'a>(
    history: &'a [Report],
    now: DateTime<Utc>,
    window: Duration,
) -> Vec<&'a Report> {
    let cutoff = now - window;
    history.iter().filter(|r| r.created_at >= cutoff).collect()
}

/// True when half or more of the recent messages are duplicates of each
/// other (lowercased, trimmed). Exactly half counts as triggering; only
/// evaluated for more than one report.
pub fn check_repeated_message(recent: &[&Report]) -> bool {
    if recent.len() <= 1 {
        return false;
    }
    let distinct: BTreeSet<String> = recent
        .iter()
        .map(|r| r.message.to_lowercase().trim().to_string())
        .collect();
    distinct.len() * 2 <= recent.len()
}

/// OTP-takeover focus: the share of recent reports in OTP-like categories.
/// Returns the flag and the proportion (0 for an empty window).
pub fn check_otp_focus(recent: &[&Report]) -> (bool, f64) {
    if recent.is_empty() {
        return (false, 0.0);
    }
    let otp_count = recent
        .iter()
        .filter(|r| OTP_FOCUS_CATEGORIES.contains(&r.category.as_str()))
        .count();
    let proportion = otp_count as f64 / recent.len() as f64;
    let flagged = proportion >= OTP_FOCUS_MIN_PROPORTION && recent.len() >= OTP_FOCUS_MIN_REPORTS;
    (flagged, proportion)
}

/// Three or more recent reports already scored above the high-probability
/// threshold at ingest time.
pub fn check_high_prob_cluster(recent: &[&Report]) -> bool {
    recent
        .iter()
        .filter(|r| r.scam_probability > HIGH_PROB_THRESHOLD)
        .count()
        >= HIGH_PROB_MIN_REPORTS
}

/// At least one recent message reads like the number's owner reporting a
/// hijack.
pub fn check_victim_self_report(recent: &[&Report]) -> bool {
    recent.iter().any(|r| {
        let text = r.message.to_lowercase();
        VICTIM_PHRASES.iter().any(|phrase| text.contains(phrase))
    })
}

/// Multiple scam categories hitting one number at once.
pub fn check_multi_category_attack(recent: &[&Report]) -> bool {
    distinct_categories(recent).len() >= MULTI_CATEGORY_MIN_DISTINCT
        && recent.len() >= MULTI_CATEGORY_MIN_REPORTS
}

/// Report volume alone: 4+ reports inside the window.
pub fn check_recent_surge(recent: &[&Report]) -> bool {
    recent.len() >= SURGE_MIN_REPORTS
}

/// Distinct categories seen in the window, sorted for stable output.
pub fn distinct_categories(recent: &[&Report]) -> Vec<String> {
    let set: BTreeSet<&str> = recent.iter().map(|r| r.category.as_str()).collect();
    set.into_iter().map(|c| c.to_string()).collect()
}
