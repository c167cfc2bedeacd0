//! bilt-ingest: rendered activity-page extraction (HTML snapshot -> transaction records).

pub mod amount;
pub mod detect;
pub mod extractor;
pub mod filter;
pub mod markers;
pub mod page;

pub use detect::{DateMarker, FreeTextStrategy, MarkerStrategy, StableHeadingStrategy};
pub use extractor::{ExtractionResult, Extractor};
pub use markers::{CompiledMarkers, LabelProbe, PageMarkers};
pub use page::Page;
