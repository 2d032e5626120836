/// Keyword list for the heuristic scorer. Case-insensitive substring hits.
const SCAM_KEYWORDS: [&str; 8] = [
    "otp", "khalti", "esewa", "bank", "prize", "reward", "verify", "blocked",
];

const LENGTH_WEIGHT_CAP: f64 = 0.3;
const KEYWORD_HIT_WEIGHT: f64 = 0.15;
const KEYWORD_WEIGHT_CAP: f64 = 0.6;
const SCORE_CAP: f64 = 0.95;

/// Heuristic scam probability for a message, in [0, 0.95].
///
/// This is the single scoring function used both at report ingestion and
/// when recomputing risk from a number's latest message; the classify
/// endpoint calls it too.
pub fn score_message(message: &str) -> f64 {
    let text_lower = message.to_lowercase();

    let mut score = (message.chars().count() as f64 / 200.0).min(LENGTH_WEIGHT_CAP);

    let hits = SCAM_KEYWORDS
        .iter()
        .filter(|k| text_lower.contains(*k))
        .count();
    score += (hits as f64 * KEYWORD_HIT_WEIGHT).min(KEYWORD_WEIGHT_CAP);

    score.clamp(0.0, SCORE_CAP)
}
