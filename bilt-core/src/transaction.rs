//! Transaction record exchanged between the extractor and the CSV codec

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One exported transaction.
///
/// Amounts follow the budgeting-import convention: expenses negative,
/// credits and refunds positive. The activity page shows the opposite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// Date of the section the row was found under (YYYY-MM-DD)
    pub date: NaiveDate,
    pub payee: String,
    pub amount: f64,
    /// Empty at extraction time; filled by downstream categorization
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub memo: String,
}

impl TransactionRecord {
    pub fn new(date: NaiveDate, payee: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            payee: payee.into(),
            amount,
            category: String::new(),
            memo: String::new(),
        }
    }

    /// Key used to drop rows the page renders twice.
    pub fn dedup_key(&self) -> String {
        format!("{}|{}|{:.2}", self.date, self.payee, self.amount)
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}
