//! Date-range filter label ("February, 2026", "All Time"), used to name the export file.

use bilt_core::{sanitize_filename, year_month};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::markers::CompiledProbe;
use crate::page::{text_of, Page};

static SYMBOLS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s,\-]").unwrap());

/// Filename-safe filter label; "YYYY-MM" of `today` when no probe finds one.
pub fn filter_selection(page: &Page, probes: &[CompiledProbe], today: NaiveDate) -> String {
    for (i, probe) in probes.iter().enumerate() {
        let Some(el) = page.select_first(&probe.selector) else {
            continue;
        };
        let target = probe
            .inner
            .as_ref()
            .and_then(|inner| el.select(inner).next())
            .unwrap_or(el);

        let mut text = text_of(target);
        if probe.strip_symbols {
            text = SYMBOLS_RE.replace_all(&text, "").trim().to_string();
        }
        if text.is_empty() || probe.max_len.is_some_and(|max| text.chars().count() >= max) {
            continue;
        }

        debug!(probe = i, label = %text, "filter label");
        return sanitize_filename(&text, today);
    }

    year_month(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::PageMarkers;

    fn label(html: &str) -> String {
        let markers = PageMarkers::default().compile().unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 2, 19).unwrap();
        filter_selection(&Page::parse(html), &markers.filter_labels, today)
    }

    #[test]
    fn test_combobox_nested_span() {
        let html = r#"<button role="combobox"><span><span><span>February, 2026</span></span></span>▾</button>"#;
        assert_eq!(label(html), "February-2026");
    }

    #[test]
    fn test_combobox_own_text_without_glyphs() {
        let html = r#"<button role="combobox">All Time ▾</button>"#;
        assert_eq!(label(html), "All-Time");
    }

    #[test]
    fn test_later_probes_and_fallback() {
        assert_eq!(label(r#"<div class="sc-iitTBb x">Last 30 days</div>"#), "Last-30-days");
        let long = format!(r#"<div class="filter-bar">{}</div>"#, "word ".repeat(20));
        assert_eq!(label(&long), "2026-02");
        assert_eq!(label("<p>nothing</p>"), "2026-02");
    }
}
