//! Date utilities: the activity feed's section-header grammar and "today" resolution.

use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

// "Today", "Yesterday", "February 1", "February 1, 2026"
static DATE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?:(?P<relative>today|yesterday)|",
        r"(?P<month>january|february|march|april|may|june|july|august|september|october|november|december)",
        r"\s+(?P<day>\d{1,2})(?:(?:,\s*|\s+)(?P<year>\d{4}))?)$"
    ))
    .unwrap()
});

/// Current date, either in the machine's local zone or in an IANA zone like "America/Chicago".
pub fn today_in(timezone: Option<&str>) -> Result<NaiveDate> {
    match timezone {
        None => Ok(Local::now().date_naive()),
        Some(tz) => {
            let tz: Tz = tz
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))?;
            Ok(Utc::now().with_timezone(&tz).date_naive())
        }
    }
}

/// Drop a trailing annotation such as "• Rent Day".
pub fn strip_annotation(text: &str) -> &str {
    text.split('•').next().unwrap_or(text).trim()
}

/// Whether already-stripped text reads as a section header.
pub fn is_date_header(clean_text: &str) -> bool {
    DATE_HEADER_RE.is_match(clean_text)
}

/// Resolve header text to a calendar date.
///
/// Relative tokens resolve against `today`, a missing year takes `today`'s
/// year, and anything else (including impossible dates) falls back to `today`.
pub fn parse_date_header(text: &str, today: NaiveDate) -> NaiveDate {
    use chrono::Datelike;

    let clean = strip_annotation(text);
    let Some(caps) = DATE_HEADER_RE.captures(clean) else {
        return today;
    };

    if let Some(rel) = caps.name("relative") {
        if rel.as_str().eq_ignore_ascii_case("yesterday") {
            return today.pred_opt().unwrap_or(today);
        }
        return today;
    }

    let month = caps
        .name("month")
        .and_then(|m| {
            let m = m.as_str().to_lowercase();
            MONTHS.iter().position(|name| *name == m)
        })
        .map(|i| i as u32 + 1);
    let day: Option<u32> = caps.name("day").and_then(|d| d.as_str().parse().ok());
    let year: i32 = caps
        .name("year")
        .and_then(|y| y.as_str().parse().ok())
        .unwrap_or_else(|| today.year());

    match (month, day) {
        (Some(m), Some(d)) => NaiveDate::from_ymd_opt(year, m, d).unwrap_or(today),
        _ => today,
    }
}

/// "YYYY-MM", used when the page offers no filter label.
pub fn year_month(today: NaiveDate) -> String {
    today.format("%Y-%m").to_string()
}
