//! Diagnostic summaries of curated data.

mod describe;

pub use describe::{describe, DescribeSummary, SeriesCount};
