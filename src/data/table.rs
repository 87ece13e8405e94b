//! Owned, ordered collection of contact records.

use crate::data::ContactRecord;
use crate::error::Result;
use std::path::Path;

/// An in-memory table of contact-site measurements.
///
/// Pipeline stages consume a table and return a new one; there is no shared
/// mutable aliasing between stages.
#[derive(Debug, Clone, Default)]
pub struct ContactTable {
    records: Vec<ContactRecord>,
}

impl ContactTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from records.
    pub fn from_records(records: Vec<ContactRecord>) -> Self {
        Self { records }
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the table holds no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Row slice.
    #[inline]
    pub fn records(&self) -> &[ContactRecord] {
        &self.records
    }

    /// Iterate over rows.
    pub fn iter(&self) -> std::slice::Iter<'_, ContactRecord> {
        self.records.iter()
    }

    /// Append a row.
    pub fn push(&mut self, record: ContactRecord) {
        self.records.push(record);
    }

    /// Append all rows of `other` (row-wise union; the column set is fixed by
    /// the record type, so concatenation cannot mismatch).
    pub fn extend(&mut self, other: ContactTable) {
        self.records.extend(other.records);
    }

    /// Set the experiment label on every row.
    pub fn set_experiment(&mut self, experiment: &str) {
        for r in &mut self.records {
            r.experiment = experiment.to_string();
        }
    }

    /// Recompute the derived columns (`rmv`, `ls`, `LV`, `c_to_m`) on every
    /// row. See [`ContactRecord::recompute_derived`].
    pub fn recompute_derived(&mut self) {
        for r in &mut self.records {
            r.recompute_derived();
        }
    }

    /// Replace NaN with `value` in every numeric column of every row.
    pub fn fill_nan(&mut self, value: f64) {
        for r in &mut self.records {
            r.fill_nan(value);
        }
    }

    /// Drop rows whose `skeletonsurface` is not strictly positive.
    pub fn retain_positive_skeleton(&mut self) {
        self.records.retain(|r| r.skeletonsurface > 0.0);
    }

    /// Load a table from a curated CSV artifact (the format written by
    /// [`write_csv`]).
    ///
    /// [`write_csv`]: ContactTable::write_csv
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(Self { records })
    }

    /// Write the table to a CSV file with the canonical column order.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        for r in &self.records {
            writer.serialize(r)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ContactTable {
    type Item = &'a ContactRecord;
    type IntoIter = std::slice::Iter<'a, ContactRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
