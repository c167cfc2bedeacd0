//! Read-only document snapshot and the element helpers the extractor walks it with.

use scraper::{ElementRef, Html, Selector};

/// A parsed, already-rendered page.
pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Every element in document order. The index is only an ordering key.
    pub fn elements(&self) -> Vec<ElementRef<'_>> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect()
    }

    pub fn select_first(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }
}

/// textContent, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Class attribute contains any of the fragments (styled-components hashes are matched by substring).
pub fn has_class_fragment(el: ElementRef<'_>, fragments: &[String]) -> bool {
    el.value().attr("class").is_some_and(|class| {
        fragments
            .iter()
            .any(|f| !f.is_empty() && class.contains(f.as_str()))
    })
}

/// The element itself or one of its descendants matches.
pub fn matches_or_contains(el: ElementRef<'_>, selector: &Selector) -> bool {
    selector.matches(&el) || el.select(selector).next().is_some()
}

pub fn count_matches(el: ElementRef<'_>, selector: &Selector) -> usize {
    usize::from(selector.matches(&el)) + el.select(selector).count()
}

pub fn next_element_siblings<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// Whether one of the `depth` nearest ancestors is a transaction row.
pub fn is_inside_row(el: ElementRef<'_>, row_classes: &[String], depth: usize) -> bool {
    el.ancestors()
        .take(depth)
        .filter_map(ElementRef::wrap)
        .any(|a| has_class_fragment(a, row_classes))
}
