//! bilt-csv: CSV codec for budgeting-app imports (generate, parse, validate)

pub mod fields;
pub mod reader;
pub mod writer;

pub use fields::{CsvOptions, Field, DEFAULT_HEADERS};
pub use reader::{parse, parse_with_today, validate, Validation};
pub use writer::generate;
