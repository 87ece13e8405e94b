//! Row selection by celltype membership.

use crate::data::ContactTable;

/// Keep only rows whose celltype is in `selected`.
pub fn filter_celltypes<S: AsRef<str>>(table: &ContactTable, selected: &[S]) -> ContactTable {
    let kept = table
        .iter()
        .filter(|r| selected.iter().any(|s| s.as_ref() == r.celltype))
        .cloned()
        .collect();
    ContactTable::from_records(kept)
}
