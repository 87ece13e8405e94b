//! Filtering primitives for contact tables.

mod celltype;
mod vesicle;

pub use celltype::filter_celltypes;
pub use vesicle::{filter_vesicles, FilterMode, FilterOutcome, VesicleParams};
