//! Vesicle filtering.
//!
//! Vesicles are objects in the mitochondria channel that are small
//! (`ls <= LS`, natural-log scale) and faint (`rmv <= RMV`) — likely
//! segmentation artifacts rather than genuine contact biology. The filter
//! either keeps only those (for inspecting the artifact population) or drops
//! them and keeps contacts adjacent to large-or-bright mitochondria.

use crate::data::ContactTable;
use crate::error::{CurateError, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Thresholds for vesicle filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VesicleParams {
    /// Minimum contact volume (K); rows at or below are not candidates.
    pub min_contact_volume: f64,
    /// Size threshold for adjacent mitochondria (LS, natural-log scale).
    pub ln_size: f64,
    /// Relative intensity threshold for adjacent mitochondria (RMV).
    pub mito_intensity: f64,
    /// Noise floor for kept vesicles; only rows with
    /// `ls > ln(min_vesicle_size)` count as vesicles.
    pub min_vesicle_size: f64,
}

impl Default for VesicleParams {
    fn default() -> Self {
        Self {
            min_contact_volume: 2.0,
            ln_size: 9.0,
            mito_intensity: 0.2,
            min_vesicle_size: 8.0,
        }
    }
}

/// Whether to keep only vesicles or to drop them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterMode {
    /// Keep only small-and-faint objects above the noise floor.
    KeepVesicles,
    /// Keep contacts adjacent to mitochondria that are large or bright.
    DropVesicles,
}

/// Counts describing one filter application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterOutcome {
    /// Rows entering the filter (after the skeletonsurface guard).
    pub n_input: usize,
    /// Rows passing the `volume > K` candidate cut.
    pub n_candidates: usize,
    /// Rows kept by the mode predicate.
    pub n_kept: usize,
    /// Percentage dropped relative to the candidate subset, not the full
    /// input table. NaN when there were no candidates.
    pub dropped_pct: f64,
}

impl std::fmt::Display for FilterOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vesicle Filter Outcome")?;
        writeln!(f, "  Input rows:      {}", self.n_input)?;
        writeln!(f, "  Candidate rows:  {}", self.n_candidates)?;
        writeln!(f, "  Kept rows:       {}", self.n_kept)?;
        writeln!(f, "  Dropped:         {:.2} %", self.dropped_pct)?;
        Ok(())
    }
}

/// Filter a contact table for vesicles.
///
/// The `skeletonsurface > 0` precondition is reasserted by re-dropping
/// offending rows, and all derived columns are recomputed before any
/// predicate runs, shadowing whatever a previous stage left in them. Rows
/// with a zero adjacent-mitochondria volume get NaN derived values; NaN
/// compares false against every threshold, so those rows fall out of both
/// modes — that is propagation, not an error.
pub fn filter_vesicles(
    table: ContactTable,
    params: &VesicleParams,
    mode: FilterMode,
) -> Result<(ContactTable, FilterOutcome)> {
    if !(params.min_vesicle_size > 0.0) {
        return Err(CurateError::InvalidParameter(
            "min_vesicle_size must be positive".to_string(),
        ));
    }

    info!(
        "Filtering ... Keeping vesicles = {} Size of mito {} Intensity {} Size of contact {}",
        mode == FilterMode::KeepVesicles,
        params.ln_size,
        params.mito_intensity,
        params.min_contact_volume
    );

    let mut table = table;
    table.retain_positive_skeleton();
    table.recompute_derived();
    let n_input = table.len();

    let candidates: Vec<_> = table
        .records()
        .iter()
        .filter(|r| r.volume > params.min_contact_volume)
        .cloned()
        .collect();
    let n_candidates = candidates.len();

    let floor = params.min_vesicle_size.ln();
    let kept: Vec<_> = candidates
        .into_iter()
        .filter(|r| match mode {
            FilterMode::KeepVesicles => {
                r.ls <= params.ln_size && r.rmv <= params.mito_intensity && r.ls > floor
            }
            FilterMode::DropVesicles => r.ls > params.ln_size || r.rmv > params.mito_intensity,
        })
        .collect();

    let outcome = FilterOutcome {
        n_input,
        n_candidates,
        n_kept: kept.len(),
        dropped_pct: (1.0 - kept.len() as f64 / n_candidates as f64) * 100.0,
    };
    if mode == FilterMode::DropVesicles {
        info!("{:.2} % dropped", outcome.dropped_pct);
    }

    Ok((ContactTable::from_records(kept), outcome))
}
