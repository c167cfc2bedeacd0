//! Export filename helpers.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::time::year_month;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static ILLEGAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[<>"/\\|?*]"#).unwrap());
static HYPHENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Turn a label like "February, 2026" into "February-2026".
///
/// Empty input, or input that sanitises to nothing, becomes "YYYY-MM" of `today`.
pub fn sanitize_filename(text: &str, today: NaiveDate) -> String {
    let s = text.trim().replace(',', "-");
    let s = WHITESPACE_RE.replace_all(&s, "-");
    let s = ILLEGAL_RE.replace_all(&s, "");
    let s = HYPHENS_RE.replace_all(&s, "-");
    let s = s.trim_matches('-');

    if s.is_empty() {
        year_month(today)
    } else {
        s.to_string()
    }
}

/// `bilt-transactions-<suffix>.csv`; the suffix is the filter label or today's ISO date.
pub fn export_filename(filter_selection: Option<&str>, today: NaiveDate) -> String {
    let suffix = match filter_selection.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => today.format("%Y-%m-%d").to_string(),
    };
    format!("bilt-transactions-{suffix}.csv")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 19).unwrap()
    }

    #[test]
    fn test_sanitize_labels() {
        assert_eq!(sanitize_filename("February, 2026", today()), "February-2026");
        assert_eq!(sanitize_filename("All Time", today()), "All-Time");
        assert_eq!(sanitize_filename("  Jan / Feb? <2026>  ", today()), "Jan-Feb-2026");
        assert_eq!(sanitize_filename("--a,,b--", today()), "a-b");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename("", today()), "2026-02");
        assert_eq!(sanitize_filename(" ?*| ", today()), "2026-02");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(
            export_filename(Some("February-2026"), today()),
            "bilt-transactions-February-2026.csv"
        );
        assert_eq!(export_filename(None, today()), "bilt-transactions-2026-02-19.csv");
        assert_eq!(export_filename(Some(""), today()), "bilt-transactions-2026-02-19.csv");
    }
}
