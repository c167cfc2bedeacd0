//! Denylist of payee text that the activity feed shows but which is not spending:
//! points, bonuses, fees, transfers, statuses.

use anyhow::{Context, Result};
use regex::Regex;

/// Observed non-transaction labels, matched case-insensitively against trimmed payee text.
pub const DEFAULT_NON_TRANSACTION_PATTERNS: &[&str] = &[
    r"^points?$",
    r"^bilt\s+(mastercard|cash)",
    r"^2x\s+points",
    r"^additional\s+\dx",
    r"^earn\s+bilt",
    r"^pending$",
    r"^housing\s+points$",
    r"^rakuten\s+points",
    r"^expires",
    r"^received",
    r"^palladium",
    r"rent\s+day",
    r"bonus\s+\dx",
    r"^transfer",
    r"^payment",
    r"^credit",
    r"^adjustment",
    r"^refund",
    r"^redemption",
    r"^reward",
    r"^member\s+reward",
    r"^annual\s+fee",
    r"^fee\s+waived",
    r"^interest\s+charge",
    r"^late\s+fee",
    r"^overlimit\s+fee",
];

/// Ordered pattern list; the first match wins.
#[derive(Debug, Clone)]
pub struct NonTransactionPatterns {
    patterns: Vec<Regex>,
}

impl NonTransactionPatterns {
    pub fn from_sources<S: AsRef<str>>(sources: &[S]) -> Result<Self> {
        let patterns = sources
            .iter()
            .map(|s| {
                let s = s.as_ref();
                Regex::new(&format!("(?i){s}"))
                    .with_context(|| format!("invalid non-transaction pattern `{s}`"))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn is_non_transaction(&self, text: &str) -> bool {
        let normalized = text.trim().to_lowercase();
        if normalized.is_empty() {
            return true;
        }
        self.patterns.iter().any(|re| re.is_match(&normalized))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for NonTransactionPatterns {
    fn default() -> Self {
        Self::from_sources(DEFAULT_NON_TRANSACTION_PATTERNS)
            .expect("built-in non-transaction patterns compile")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_denylist() {
        let p = NonTransactionPatterns::default();
        assert_eq!(p.len(), DEFAULT_NON_TRANSACTION_PATTERNS.len());
        for text in [
            "2x Points",
            "Rakuten Points",
            "Annual Fee",
            "Points",
            "Bilt Mastercard",
            "  pending ",
            "Additional 3x on dining",
            "Rent Day Bonus 2x",
            "Payment received - thank you",
            "",
        ] {
            assert!(p.is_non_transaction(text), "{text:?} should be filtered");
        }
    }

    #[test]
    fn test_real_merchants_pass() {
        let p = NonTransactionPatterns::default();
        for text in ["Coffee Shop", "Whole Foods Market", "Shell Oil 5732", "Pendleton Grill"] {
            assert!(!p.is_non_transaction(text), "{text:?} should pass");
        }
    }

    #[test]
    fn test_custom_patterns() {
        let p = NonTransactionPatterns::from_sources(&["^venmo"]).unwrap();
        assert!(p.is_non_transaction("VENMO *friend"));
        assert!(!p.is_non_transaction("2x Points"));
        assert!(NonTransactionPatterns::from_sources(&["(unclosed"]).is_err());
    }
}
