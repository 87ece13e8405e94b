//! Grouped descriptive statistics over curated contact tables.

mod full;
mod stats;

pub use full::{aggregate_full, AggregateRow, AggregateTable, Stat};
pub use stats::{kurtosis, mean, median, quantile, sample_std, skewness};
