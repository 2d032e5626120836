/// National country code assumed for bare 10-digit subscriber numbers.
const COUNTRY_CODE: &str = "977";

/// Canonicalize a raw phone-number string into the `+`-prefixed form used
/// as the join key across all reports.
///
/// Deliberately lenient: malformed input still yields a string (possibly a
/// nonsensical one) rather than an error, so a report is never rejected
/// over its number field.
pub fn normalize_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 {
        return format!("+{}{}", COUNTRY_CODE, digits);
    }
    if digits.starts_with(COUNTRY_CODE) && digits.len() == 13 {
        return format!("+{}", digits);
    }
    // Fallback: best-effort, no length validation.
    format!("+{}", digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ten_digit_gets_country_code() {
        assert_eq!(normalize_number("9841234567"), "+9779841234567");
        assert_eq!(normalize_number("984-123-4567"), "+9779841234567");
        assert_eq!(normalize_number("(984) 123 4567"), "+9779841234567");
    }

    #[test]
    fn test_thirteen_digits_with_country_code() {
        assert_eq!(normalize_number("9779841234567"), "+9779841234567");
        assert_eq!(normalize_number("+9779841234567"), "+9779841234567");
        assert_eq!(normalize_number("+977-984-123-4567"), "+9779841234567");
    }

    #[test]
    fn test_fallback_keeps_whatever_digits_remain() {
        assert_eq!(normalize_number("12345"), "+12345");
        assert_eq!(normalize_number("no digits at all"), "+");
        assert_eq!(normalize_number("977123"), "+977123");
    }

    #[test]
    fn test_idempotent_on_canonical_forms() {
        for raw in ["9841234567", "9779841234567", "12345", "98410001111"] {
            let once = normalize_number(raw);
            assert_eq!(normalize_number(&once), once);
        }
    }
}
