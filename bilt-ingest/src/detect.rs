//! Date-section marker detection.
//!
//! Strategies run in priority order; their candidates are merged by node
//! identity (first strategy wins) and sorted by document position.

use bilt_core::{is_date_header, parse_date_header, strip_annotation};
use chrono::NaiveDate;
use scraper::ElementRef;
use std::collections::HashSet;
use tracing::debug;

use crate::markers::CompiledMarkers;
use crate::page::{has_class_fragment, is_inside_row, text_of};

/// Longer texts are paragraphs, not headers.
const MAX_HEADER_LEN: usize = 100;
/// How far up to look for an enclosing transaction row.
const ROW_ANCESTOR_DEPTH: usize = 5;

/// A located date heading.
#[derive(Debug, Clone)]
pub struct DateMarker<'a> {
    pub element: ElementRef<'a>,
    /// Index in the document-order element enumeration
    pub position: usize,
    pub date: NaiveDate,
    /// Header text with any "• ..." annotation removed
    pub text: String,
}

/// Inputs shared by every strategy for one extraction pass.
pub struct DetectContext<'p, 'a> {
    pub elements: &'p [ElementRef<'a>],
    pub markers: &'p CompiledMarkers,
    pub today: NaiveDate,
}

pub trait MarkerStrategy {
    fn name(&self) -> &'static str;
    fn detect<'a>(&self, ctx: &DetectContext<'_, 'a>) -> Vec<DateMarker<'a>>;
}

/// Heading element with the expected class, under a parent with the expected class.
pub struct StableHeadingStrategy;

impl MarkerStrategy for StableHeadingStrategy {
    fn name(&self) -> &'static str {
        "stable-heading"
    }

    fn detect<'a>(&self, ctx: &DetectContext<'_, 'a>) -> Vec<DateMarker<'a>> {
        ctx.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| ctx.markers.heading.matches(el))
            .filter(|(_, el)| {
                el.parent()
                    .and_then(ElementRef::wrap)
                    .is_some_and(|p| has_class_fragment(p, &ctx.markers.heading_parent_classes))
            })
            .filter_map(|(position, el)| candidate(*el, position, &text_of(*el), ctx))
            .collect()
    }
}

/// Any element whose own text reads as a date header.
///
/// When a wrapper's text is exactly its child's text, only the innermost
/// element is reported.
pub struct FreeTextStrategy;

impl MarkerStrategy for FreeTextStrategy {
    fn name(&self) -> &'static str {
        "free-text"
    }

    fn detect<'a>(&self, ctx: &DetectContext<'_, 'a>) -> Vec<DateMarker<'a>> {
        let mut out = Vec::new();
        for (position, el) in ctx.elements.iter().enumerate() {
            let text = text_of(*el);
            let Some(marker) = candidate(*el, position, &text, ctx) else {
                continue;
            };
            let wrapper = el
                .children()
                .filter_map(ElementRef::wrap)
                .any(|child| text_of(child) == text);
            if !wrapper {
                out.push(marker);
            }
        }
        out
    }
}

pub fn default_strategies() -> Vec<Box<dyn MarkerStrategy>> {
    vec![Box::new(StableHeadingStrategy), Box::new(FreeTextStrategy)]
}

/// Run strategies in order, merge by node identity, sort by position.
pub fn detect_markers<'a>(
    strategies: &[Box<dyn MarkerStrategy>],
    ctx: &DetectContext<'_, 'a>,
) -> Vec<DateMarker<'a>> {
    let mut seen = HashSet::new();
    let mut markers = Vec::new();

    for strategy in strategies {
        let before = markers.len();
        for marker in strategy.detect(ctx) {
            if seen.insert(marker.element.id()) {
                markers.push(marker);
            }
        }
        debug!(
            strategy = strategy.name(),
            added = markers.len() - before,
            "date marker strategy"
        );
    }

    markers.sort_by_key(|m| m.position);
    markers
}

fn candidate<'a>(
    el: ElementRef<'a>,
    position: usize,
    text: &str,
    ctx: &DetectContext<'_, 'a>,
) -> Option<DateMarker<'a>> {
    if text.is_empty() || text.chars().count() > MAX_HEADER_LEN || text.contains('$') {
        return None;
    }
    let clean = strip_annotation(text);
    if !is_date_header(clean) {
        return None;
    }
    if is_inside_row(el, &ctx.markers.row_container_classes, ROW_ANCESTOR_DEPTH) {
        return None;
    }

    Some(DateMarker {
        element: el,
        position,
        date: parse_date_header(clean, ctx.today),
        text: clean.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::PageMarkers;
    use crate::page::Page;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 19).unwrap()
    }

    fn run(html: &str, strategies: &[Box<dyn MarkerStrategy>]) -> Vec<(String, NaiveDate)> {
        let page = Page::parse(html);
        let elements = page.elements();
        let markers = PageMarkers::default().compile().unwrap();
        let ctx = DetectContext {
            elements: &elements,
            markers: &markers,
            today: today(),
        };
        detect_markers(strategies, &ctx)
            .into_iter()
            .map(|m| (m.text, m.date))
            .collect()
    }

    const PAGE: &str = r#"<html><body>
        <div class="sc-ksXGtu"><p class="sc-mHBLV">Today</p></div>
        <div class="plain"><div><p>February 1, 2026 • Rent Day</p></div></div>
        <div class="sc-gDxZeH"><span>Yesterday</span></div>
        <p>Total spent on January 3, 2026 was $40.00</p>
        <p>January 5, 2026</p>
    </body></html>"#;

    #[test]
    fn test_merges_strategies_in_page_order() {
        let found = run(PAGE, &default_strategies());
        assert_eq!(
            found,
            vec![
                ("Today".to_string(), today()),
                ("February 1, 2026".to_string(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()),
                ("January 5, 2026".to_string(), NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()),
            ]
        );
    }

    #[test]
    fn test_stable_strategy_alone_needs_parent_class() {
        let stable: Vec<Box<dyn MarkerStrategy>> = vec![Box::new(StableHeadingStrategy)];
        let found = run(PAGE, &stable);
        assert_eq!(found, vec![("Today".to_string(), today())]);
    }

    #[test]
    fn test_rejects_long_text() {
        let long = format!("<html><body><p>Today{}</p></body></html>", " ".repeat(120));
        // trimmed text is short, so this still counts
        assert_eq!(run(&long, &default_strategies()).len(), 1);

        let long = format!("<html><body><p>Today • {}</p></body></html>", "x".repeat(120));
        assert!(run(&long, &default_strategies()).is_empty());
    }
}
