//! Terminal preview of extracted transactions.

use bilt_core::TransactionRecord;

/// "-$1,234.56" / "$12.34"
pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_num::format_num!(",.2f", amount.abs()))
}

/// First `limit` rows as an aligned table, with a "... and N more" line when truncated.
pub fn render_preview(txns: &[TransactionRecord], limit: usize) -> String {
    let shown = &txns[..txns.len().min(limit)];
    let payee_width = shown
        .iter()
        .map(|t| t.payee.chars().count())
        .max()
        .unwrap_or(0)
        .max("Payee".len());

    let mut s = String::new();
    s.push_str(&format!("{:<10}  {:<payee_width$}  {:>12}\n", "Date", "Payee", "Amount"));
    for t in shown {
        s.push_str(&format!(
            "{:<10}  {:<payee_width$}  {:>12}\n",
            t.date.to_string(),
            t.payee,
            format_usd(t.amount)
        ));
    }
    if txns.len() > shown.len() {
        s.push_str(&format!("... and {} more transactions\n", txns.len() - shown.len()));
    }
    s
}
