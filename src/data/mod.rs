//! Data structures for contact-site curation.

mod record;
mod table;

pub use record::{ContactRecord, RawMeasurement, REQUIRED_COLUMNS};
pub use table::ContactTable;
