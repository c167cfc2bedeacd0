//! CSV generation.

use anyhow::{anyhow, ensure, Context, Result};
use bilt_core::TransactionRecord;

use crate::fields::{CsvOptions, Field};

/// Header line plus one line per record, joined with `\n` (no trailing newline).
///
/// Fields containing a comma, quote, CR or LF are quoted with inner quotes
/// doubled; everything else is written raw. Amounts always carry two decimals.
pub fn generate(records: &[TransactionRecord], options: &CsvOptions) -> Result<String> {
    ensure!(!options.headers.is_empty(), "CSV needs at least one header");

    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    wtr.write_record(&options.headers)
        .context("writing CSV header")?;

    let columns: Vec<Option<Field>> = options
        .headers
        .iter()
        .map(|h| Field::from_header(h))
        .collect();

    for record in records {
        wtr.write_record(columns.iter().map(|c| render(record, *c)))
            .with_context(|| format!("writing CSV row for {}", record.payee))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow!("flushing CSV buffer: {}", e.error()))?;
    let mut out = String::from_utf8(bytes).context("CSV output is not UTF-8")?;
    if out.ends_with('\n') {
        out.pop();
    }
    Ok(out)
}

fn render(record: &TransactionRecord, column: Option<Field>) -> String {
    match column {
        Some(Field::Date) => record.date.format("%Y-%m-%d").to_string(),
        Some(Field::Payee) => record.payee.clone(),
        Some(Field::Amount) => format!("{:.2}", record.amount),
        Some(Field::Category) => record.category.clone(),
        Some(Field::Memo) => record.memo.clone(),
        Some(Field::Currency) => "USD".to_string(),
        None => String::new(),
    }
}
