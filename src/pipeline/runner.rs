//! Pipeline driver: load, filter, aggregate, persist.

use crate::aggregate::aggregate_full;
use crate::error::Result;
use crate::filter::{filter_vesicles, FilterMode, VesicleParams};
use crate::load::load_contacts;
use crate::report::describe;
use std::path::PathBuf;
use tracing::info;

/// Minimum contact volume (K) applied by every run.
const MIN_CONTACT_VOLUME: f64 = 2.0;
/// Noise floor for the vesicle predicate.
const MIN_VESICLE_SIZE: f64 = 8.0;

/// Configuration of one curation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Root of the detector output tree (the experiment directory).
    pub input_dir: PathBuf,
    /// Directory receiving the three CSV artifacts.
    pub output_dir: PathBuf,
    /// Size threshold of adjacent mitochondria (natural-log scale).
    pub ln_size: f64,
    /// Relative intensity threshold of adjacent mitochondria.
    pub mito_intensity: f64,
    /// Alpha value of the detector runs to load.
    pub alpha: f64,
}

/// Where the artifacts went and how big they are.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    pub unfiltered_path: PathBuf,
    pub filtered_path: PathBuf,
    pub aggregated_path: PathBuf,
    pub n_unfiltered: usize,
    pub n_filtered: usize,
    pub n_groups: usize,
}

/// Run the full curation pipeline.
///
/// Writes `contacts_unfiltered.csv`, `contacts_filtered_novesicles.csv` and
/// `contacts_aggregated.csv` under the output directory. There is no
/// rollback: artifacts written before a failure stay on disk.
pub fn run(config: &RunConfig) -> Result<RunArtifacts> {
    let table = load_contacts(&config.input_dir, config.alpha)?;

    let params = VesicleParams {
        min_contact_volume: MIN_CONTACT_VOLUME,
        ln_size: config.ln_size,
        mito_intensity: config.mito_intensity,
        min_vesicle_size: MIN_VESICLE_SIZE,
    };
    let n_unfiltered = table.len();

    info!(
        "Data has been loaded ... saving to {}",
        config.output_dir.display()
    );
    let unfiltered_path = config.output_dir.join("contacts_unfiltered.csv");
    table.write_csv(&unfiltered_path)?;

    let (filtered, outcome) = filter_vesicles(table, &params, FilterMode::DropVesicles)?;
    info!("{}", outcome);
    let filtered_path = config.output_dir.join("contacts_filtered_novesicles.csv");
    filtered.write_csv(&filtered_path)?;

    info!("Aggregating per cell --> mean, Q95 volume and so on ...");
    let aggregated = aggregate_full(&filtered);
    describe(&aggregated);

    let aggregated_path = config.output_dir.join("contacts_aggregated.csv");
    info!("Saving to {}", aggregated_path.display());
    aggregated.write_csv(&aggregated_path)?;
    info!("Done");

    Ok(RunArtifacts {
        unfiltered_path,
        filtered_path,
        aggregated_path,
        n_unfiltered,
        n_filtered: filtered.len(),
        n_groups: aggregated.len(),
    })
}
