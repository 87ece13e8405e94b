//! Curation of membrane contact-site measurement tables.
//!
//! This library ingests per-cell CSV tables produced by an upstream
//! contact-site detector, removes vesicle artifacts, and aggregates the
//! remaining contacts into per-(celltype, serie, replicate, experiment)
//! descriptive statistics.
//!
//! # Overview
//!
//! The library is organized into composable modules:
//!
//! - **data**: Core data structures (ContactRecord, ContactTable)
//! - **load**: Directory discovery and multi-file CSV loading
//! - **filter**: Vesicle filtering and celltype selection
//! - **aggregate**: Grouped descriptive statistics
//! - **report**: Diagnostic summaries of the collected data
//! - **pipeline**: End-to-end run orchestration
//!
//! # Example
//!
//! ```no_run
//! use contact_curate::prelude::*;
//! use std::path::PathBuf;
//!
//! let config = RunConfig {
//!     input_dir: PathBuf::from("detector_output/experimentA"),
//!     output_dir: PathBuf::from("curated"),
//!     ln_size: 9.0,
//!     mito_intensity: 0.2,
//!     alpha: 0.05,
//! };
//! let artifacts = contact_curate::pipeline::run(&config).unwrap();
//! println!("{} contacts survived filtering", artifacts.n_filtered);
//! ```
//!
//! The pipeline is a linear batch process: every stage consumes an owned
//! table and returns a new one, so no stage observes another stage's
//! mutations. Ratios with zero denominators propagate as NaN into the
//! output rather than being trapped.

pub mod aggregate;
pub mod data;
pub mod error;
pub mod filter;
pub mod load;
pub mod logging;
pub mod pipeline;
pub mod report;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::aggregate::{aggregate_full, AggregateRow, AggregateTable, Stat};
    pub use crate::data::{ContactRecord, ContactTable, REQUIRED_COLUMNS};
    pub use crate::error::{CurateError, Result};
    pub use crate::filter::{
        filter_celltypes, filter_vesicles, FilterMode, FilterOutcome, VesicleParams,
    };
    pub use crate::load::{discover, load_contacts, LeafCsv};
    pub use crate::pipeline::{run, RunArtifacts, RunConfig};
    pub use crate::report::{describe, DescribeSummary, SeriesCount};
}
