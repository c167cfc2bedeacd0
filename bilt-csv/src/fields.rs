//! Header names and the record fields they map to.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HEADERS: [&str; 5] = ["Date", "Payee", "Amount", "Category", "Memo"];

/// Columns an import file must have (payee may appear as "Description").
pub const REQUIRED_FIELDS: [Field; 3] = [Field::Date, Field::Payee, Field::Amount];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Payee,
    Amount,
    Category,
    Memo,
    Currency,
}

impl Field {
    /// Case-insensitive header lookup, including the aliases importers use.
    pub fn from_header(header: &str) -> Option<Field> {
        match header.trim().to_lowercase().as_str() {
            "date" => Some(Field::Date),
            "payee" | "description" => Some(Field::Payee),
            "amount" => Some(Field::Amount),
            "category" => Some(Field::Category),
            "memo" | "notes" => Some(Field::Memo),
            "currency" => Some(Field::Currency),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Payee => "payee",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Memo => "memo",
            Field::Currency => "currency",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Output columns, in order. Unknown names produce empty columns.
    pub headers: Vec<String>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            headers: DEFAULT_HEADERS.iter().map(|h| h.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_aliases() {
        assert_eq!(Field::from_header(" Description "), Some(Field::Payee));
        assert_eq!(Field::from_header("NOTES"), Some(Field::Memo));
        assert_eq!(Field::from_header("Amount"), Some(Field::Amount));
        assert_eq!(Field::from_header("Reference"), None);
    }
}
