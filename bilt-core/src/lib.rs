//! bilt-core: record types and text utilities shared by the extractor and the CSV codec

pub mod filename;
pub mod patterns;
pub mod time;
pub mod transaction;

pub use filename::{export_filename, sanitize_filename};
pub use patterns::{NonTransactionPatterns, DEFAULT_NON_TRANSACTION_PATTERNS};
pub use time::{is_date_header, parse_date_header, strip_annotation, today_in, year_month};
pub use transaction::TransactionRecord;
