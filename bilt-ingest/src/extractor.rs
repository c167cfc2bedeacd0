//! The activity-page extractor.
//!
//! One synchronous pass over a page snapshot: locate date markers, find each
//! marker's transaction container, read card rows inside it, validate, dedup.
//! All state (visited nodes, dedup keys) lives for a single call.

use anyhow::{bail, Result};
use bilt_core::{today_in, NonTransactionPatterns, TransactionRecord};
use chrono::NaiveDate;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::amount::{find_currency_token, parse_amount, MAX_ABS_AMOUNT};
use crate::detect::{default_strategies, detect_markers, DetectContext, MarkerStrategy};
use crate::filter::filter_selection;
use crate::markers::{CompiledMarkers, PageMarkers};
use crate::page::{
    count_matches, has_class_fragment, matches_or_contains, next_element_siblings, text_of, Page,
};

const MIN_PAYEE_LEN: usize = 2;

const NO_DATE_HEADERS: &str =
    "No date headers found. Make sure transactions are visible on the page.";
const NO_TRANSACTIONS: &str = "No transactions found";

/// Outcome of one extraction call, in the shape the popup/exporter consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub success: bool,
    pub transactions: Vec<TransactionRecord>,
    pub count: usize,
    /// Filename-safe filter label (advisory)
    pub filter_selection: String,
    pub error: Option<String>,
}

impl ExtractionResult {
    fn from_transactions(transactions: Vec<TransactionRecord>, filter_selection: String) -> Self {
        let count = transactions.len();
        Self {
            success: count > 0,
            error: (count == 0).then(|| NO_TRANSACTIONS.to_string()),
            transactions,
            count,
            filter_selection,
        }
    }

    fn failure(filter_selection: String, error: impl Into<String>) -> Self {
        Self {
            success: false,
            transactions: Vec::new(),
            count: 0,
            filter_selection,
            error: Some(error.into()),
        }
    }
}

pub struct Extractor {
    markers: CompiledMarkers,
    patterns: NonTransactionPatterns,
    strategies: Vec<Box<dyn MarkerStrategy>>,
    today: NaiveDate,
    max_abs_amount: f64,
}

impl Extractor {
    pub fn new(markers: &PageMarkers, patterns: NonTransactionPatterns) -> Result<Self> {
        Ok(Self {
            markers: markers.compile()?,
            patterns,
            strategies: default_strategies(),
            today: today_in(None)?,
            max_abs_amount: MAX_ABS_AMOUNT,
        })
    }

    /// Date that "Today"/"Yesterday" and the fallbacks resolve against.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn with_max_abs_amount(mut self, max: f64) -> Self {
        self.max_abs_amount = max;
        self
    }

    /// Replace the marker strategy chain (highest priority first).
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn MarkerStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn extract_html(&self, html: &str) -> ExtractionResult {
        self.extract(&Page::parse(html))
    }

    /// Never fails: problems are reported through `success`/`error`.
    pub fn extract(&self, page: &Page) -> ExtractionResult {
        info!("starting extraction");
        let filter = filter_selection(page, &self.markers.filter_labels, self.today);
        debug!(filter = %filter, "filter selection");

        match self.scan(page) {
            Ok(transactions) => {
                info!(count = transactions.len(), "unique transactions");
                ExtractionResult::from_transactions(transactions, filter)
            }
            Err(e) => {
                warn!(error = %e, "extraction failed");
                ExtractionResult::failure(filter, e.to_string())
            }
        }
    }

    fn scan(&self, page: &Page) -> Result<Vec<TransactionRecord>> {
        let elements = page.elements();
        let ctx = DetectContext {
            elements: &elements,
            markers: &self.markers,
            today: self.today,
        };
        let markers = detect_markers(&self.strategies, &ctx);
        info!(
            count = markers.len(),
            dates = %markers.iter().map(|m| m.date.to_string()).collect::<Vec<_>>().join(", "),
            "found date headers"
        );
        if markers.is_empty() {
            bail!(NO_DATE_HEADERS);
        }

        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for marker in &markers {
            let Some(container) = self.find_container(marker.element) else {
                debug!(date = %marker.date, position = marker.position, "no transaction container");
                continue;
            };

            let section = self.extract_section(container, marker.date);
            debug!(date = %marker.date, position = marker.position, found = section.len(), "date section");

            for record in section {
                if seen.insert(record.dedup_key()) {
                    debug!(date = %record.date, payee = %record.payee, amount = record.amount, "extracted");
                    out.push(record);
                } else {
                    debug!(key = %record.dedup_key(), "duplicate row skipped");
                }
            }
        }

        Ok(out)
    }

    /// First following sibling that is a transaction container. When the
    /// header text sits in an inner element, wrappers carrying the same text
    /// are tried from the inside out.
    fn find_container<'a>(&self, heading: ElementRef<'a>) -> Option<ElementRef<'a>> {
        let text = text_of(heading);
        let wrappers = heading
            .ancestors()
            .filter_map(ElementRef::wrap)
            .take_while(|el| text_of(*el) == text);

        std::iter::once(heading).chain(wrappers).find_map(|el| {
            next_element_siblings(el)
                .find(|s| has_class_fragment(*s, &self.markers.transaction_container_classes))
        })
    }

    fn extract_section(&self, container: ElementRef<'_>, date: NaiveDate) -> Vec<TransactionRecord> {
        let mut processed = HashSet::new();
        let mut out = Vec::new();

        for node in container.descendants().skip(1).filter_map(ElementRef::wrap) {
            // false when an earlier row already consumed this node
            if !processed.insert(node.id()) || !self.is_transaction_row(node) {
                continue;
            }
            if let Some(record) = self.read_row(node, date) {
                out.push(record);
            }
            processed.extend(node.descendants().skip(1).map(|n| n.id()));
        }

        out
    }

    /// Exactly one card marker and no points marker. An element holding
    /// several card markers is a wrapper around rows, not a row.
    fn is_transaction_row(&self, el: ElementRef<'_>) -> bool {
        count_matches(el, &self.markers.card_marker) == 1
            && !matches_or_contains(el, &self.markers.points_marker)
    }

    fn read_row(&self, row: ElementRef<'_>, date: NaiveDate) -> Option<TransactionRecord> {
        let Some(payee) = self.row_payee(row) else {
            debug!("row without payee");
            return None;
        };
        let Some(amount_text) = self.row_amount_text(row) else {
            debug!(payee = %payee, "row without amount");
            return None;
        };
        let Some(amount) = parse_amount(&amount_text) else {
            debug!(payee = %payee, text = %amount_text, "unparsable amount");
            return None;
        };
        if !self.is_valid(&payee, amount) {
            debug!(payee = %payee, amount, "rejected row");
            return None;
        }

        Some(TransactionRecord::new(date, payee, amount))
    }

    /// Payee label, else the first text among the card icon's following siblings.
    fn row_payee(&self, row: ElementRef<'_>) -> Option<String> {
        if let Some(label) = row.select(&self.markers.payee_label).next() {
            let text = text_of(label);
            if text.chars().count() >= MIN_PAYEE_LEN {
                return Some(text);
            }
        }

        let icon = row.select(&self.markers.card_marker).next()?;
        next_element_siblings(icon)
            .map(text_of)
            .find(|t| t.chars().count() >= MIN_PAYEE_LEN)
    }

    fn row_amount_text(&self, row: ElementRef<'_>) -> Option<String> {
        if let Some(label) = row.select(&self.markers.amount_label).next() {
            let text = text_of(label);
            if !text.is_empty() {
                return Some(text);
            }
        }
        find_currency_token(&text_of(row)).map(str::to_string)
    }

    fn is_valid(&self, payee: &str, amount: f64) -> bool {
        payee.trim().chars().count() >= MIN_PAYEE_LEN
            && !self.patterns.is_non_transaction(payee)
            && amount.is_finite()
            && amount.abs() <= self.max_abs_amount
    }
}
