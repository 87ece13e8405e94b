//! Multi-file loader: reads every discovered leaf CSV into one table.

use crate::data::{ContactRecord, ContactTable, RawMeasurement, REQUIRED_COLUMNS};
use crate::error::{CurateError, Result};
use crate::load::walk::{discover, LeafCsv};
use std::path::Path;
use tracing::info;

/// Load every eroded CSV under `root` matching `alpha` into a single curated
/// table.
///
/// Per-row processing after concatenation, in order:
/// 1. attach `experiment` (final path component of `root`) to every row,
/// 2. recompute the derived columns,
/// 3. fill NaN with 0 (upstream kurtosis over short series yields NaN),
/// 4. drop rows with non-positive `skeletonsurface`.
///
/// Zero loaded tables is fatal: an empty result here is treated as a broken
/// run, not a valid empty dataset.
pub fn load_contacts(root: &Path, alpha: f64) -> Result<ContactTable> {
    let leaves = discover(root, alpha)?;

    let mut tables = Vec::with_capacity(leaves.len());
    for leaf in &leaves {
        tables.push(read_leaf(leaf)?);
    }
    info!("Have a total of {} tables", tables.len());
    if tables.is_empty() {
        return Err(CurateError::EmptyData(format!(
            "no eroded CSV tables found under {}",
            root.display()
        )));
    }

    let mut combined = ContactTable::new();
    for table in tables {
        combined.extend(table);
    }

    let experiment = root
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CurateError::MalformedPath {
            path: root.to_path_buf(),
            reason: "input root has no usable experiment name".to_string(),
        })?;
    combined.set_experiment(experiment);
    combined.recompute_derived();
    combined.fill_nan(0.0);
    combined.retain_positive_skeleton();

    info!(
        "Loaded {} contacts for experiment {}",
        combined.len(),
        experiment
    );
    Ok(combined)
}

/// Read one leaf CSV and attach its provenance.
///
/// The header is checked against [`REQUIRED_COLUMNS`] before any row is
/// parsed, so a truncated or foreign CSV fails with the offending column name
/// rather than a generic deserialization error.
fn read_leaf(leaf: &LeafCsv) -> Result<ContactTable> {
    let mut reader = csv::Reader::from_path(&leaf.path)?;

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CurateError::SchemaMismatch {
                path: leaf.path.clone(),
                column: column.to_string(),
            });
        }
    }

    let mut table = ContactTable::new();
    for row in reader.deserialize::<RawMeasurement>() {
        table.push(ContactRecord::from_raw(
            row?,
            leaf.replicate,
            leaf.serie,
            &leaf.celltype,
            leaf.alpha,
        ));
    }
    Ok(table)
}
