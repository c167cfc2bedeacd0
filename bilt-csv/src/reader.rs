//! CSV parsing and header validation. Neither ever fails on malformed input.

use bilt_core::TransactionRecord;
use chrono::{Local, NaiveDate};
use csv::StringRecord;
use serde::Serialize;
use tracing::warn;

use crate::fields::{Field, REQUIRED_FIELDS};

/// Result of checking a document's header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Lowercased header names, when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
}

impl Validation {
    fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            headers: None,
        }
    }
}

/// Non-blank records, header first. Quoted commas, newlines and doubled quotes are honoured.
fn records(text: &str) -> Vec<StringRecord> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    rdr.records()
        .filter_map(|r| match r {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed CSV line");
                None
            }
        })
        .filter(|record| record.iter().any(|f| !f.is_empty()))
        .collect()
}

/// Parse a document produced by [`crate::generate`] (or any file with a compatible header).
///
/// One record per data line. Missing columns become empty strings,
/// unparsable amounts become 0 and dates that are not YYYY-MM-DD become today.
pub fn parse(text: &str) -> Vec<TransactionRecord> {
    parse_with_today(text, Local::now().date_naive())
}

/// [`parse`] with an explicit fallback date.
pub fn parse_with_today(text: &str, today: NaiveDate) -> Vec<TransactionRecord> {
    let mut rows = records(text).into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let columns: Vec<Option<Field>> = header.iter().map(Field::from_header).collect();

    rows.map(|row| to_record(&columns, &row, today)).collect()
}

fn to_record(columns: &[Option<Field>], row: &StringRecord, today: NaiveDate) -> TransactionRecord {
    // later duplicate columns win
    let get = |field: Field| {
        columns
            .iter()
            .rposition(|c| *c == Some(field))
            .and_then(|i| row.get(i))
            .unwrap_or("")
    };

    let date = NaiveDate::parse_from_str(get(Field::Date), "%Y-%m-%d").unwrap_or_else(|_| {
        warn!(date = get(Field::Date), fallback = %today, "unparsable date");
        today
    });
    let amount: f64 = get(Field::Amount)
        .replace(['$', ','], "")
        .parse()
        .unwrap_or(0.0);

    TransactionRecord {
        date,
        payee: get(Field::Payee).to_string(),
        amount,
        category: get(Field::Category).to_string(),
        memo: get(Field::Memo).to_string(),
    }
}

/// Check that the document has a header with date, payee (or description) and amount.
pub fn validate(text: &str) -> Validation {
    let rows = records(text);
    let Some(header) = rows.first() else {
        return Validation::invalid("Empty CSV");
    };

    let names: Vec<String> = header.iter().map(|h| h.to_lowercase()).collect();
    let present: Vec<Option<Field>> = names.iter().map(|h| Field::from_header(h)).collect();
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .filter(|f| !present.contains(&Some(**f)))
        .map(|f| f.name())
        .collect();

    if !missing.is_empty() {
        return Validation::invalid(format!("Missing required fields: {}", missing.join(", ")));
    }

    Validation {
        valid: true,
        error: None,
        headers: Some(names),
    }
}
