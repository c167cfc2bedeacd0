//! Amount text parsing with the page-to-export sign flip.

use regex::Regex;
use std::sync::LazyLock;

/// Anything larger is a mis-parse (e.g. two numbers run together).
pub const MAX_ABS_AMOUNT: f64 = 1_000_000.0;

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\$?\(?([\d,]+\.\d{2})\)?").unwrap());
static CURRENCY_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?[\d,]+\.\d{2}").unwrap());

/// Parse page amount text into the export convention.
///
/// The page shows spend as `$50.00` and credits as `-$12.34` or `(12.34)`;
/// the export wants spend negative, so the sign is inverted.
pub fn parse_amount(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let caps = AMOUNT_RE.captures(trimmed)?;
    let magnitude: f64 = caps[1].replace(',', "").parse().ok()?;
    let negative_on_page = trimmed.contains('-') || trimmed.contains('(');

    Some(if negative_on_page { magnitude } else { -magnitude })
}

/// First currency-shaped token in free text ("Coffee$4.50Dining" -> "$4.50").
pub fn find_currency_token(text: &str) -> Option<&str> {
    CURRENCY_TOKEN_RE.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_flip() {
        assert_eq!(parse_amount("$50.00"), Some(-50.00));
        assert_eq!(parse_amount("-$12.34"), Some(12.34));
        assert_eq!(parse_amount("(12.34)"), Some(12.34));
        assert_eq!(parse_amount("  $1,234.56 "), Some(-1234.56));
        assert_eq!(parse_amount("7.10"), Some(-7.10));
    }

    #[test]
    fn test_rejects_non_currency() {
        assert_eq!(parse_amount("+120 pts"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("$5"), None);
    }

    #[test]
    fn test_currency_token_scan() {
        assert_eq!(find_currency_token("Corner Deli$12.00Dining"), Some("$12.00"));
        assert_eq!(find_currency_token("Refund 1,020.30"), Some("1,020.30"));
        assert_eq!(find_currency_token("no money here"), None);
    }
}
