//! curate - contact-site curation CLI
//!
//! Processes the output tree of the upstream contact-site detector into
//! three curated CSV artifacts.

use clap::Parser;
use contact_curate::logging;
use contact_curate::pipeline::{run, RunConfig};
use std::path::PathBuf;
use tracing::{error, info, Level};

/// Curate and aggregate contact-site measurement tables.
#[derive(Parser)]
#[command(name = "curate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Root directory of the detector output (the experiment directory)
    #[arg(long)]
    inputdirectory: PathBuf,

    /// Directory to save the curated CSVs to
    #[arg(long)]
    outputdirectory: PathBuf,

    /// Minimum size of adjacent mitochondria (natural log, default 9)
    #[arg(long, default_value_t = 9.0)]
    lnsize: f64,

    /// Minimum intensity (mean) of adjacent mitochondria (default 0.2)
    #[arg(long, default_value_t = 0.2)]
    mitoint: f64,

    /// Alpha value to load (0.05 is default)
    #[arg(long, default_value_t = 0.05)]
    alpha: f64,

    /// Directory for the svrg.log file; console-only logging when omitted
    #[arg(long)]
    logdir: Option<PathBuf>,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level, cli.logdir.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!("inputdirectory --> {}", cli.inputdirectory.display());
    info!("outputdirectory --> {}", cli.outputdirectory.display());
    info!("lnsize --> {}", cli.lnsize);
    info!("mitoint --> {}", cli.mitoint);
    info!("alpha --> {}", cli.alpha);

    if !cli.inputdirectory.is_dir() || !cli.outputdirectory.is_dir() {
        error!("Input path or output path does not exist");
        std::process::exit(1);
    }

    let config = RunConfig {
        input_dir: cli.inputdirectory,
        output_dir: cli.outputdirectory,
        ln_size: cli.lnsize,
        mito_intensity: cli.mitoint,
        alpha: cli.alpha,
    };

    match run(&config) {
        Ok(artifacts) => {
            info!(
                "Curated {} contacts into {} groups ({} before filtering)",
                artifacts.n_filtered, artifacts.n_groups, artifacts.n_unfiltered
            );
        }
        Err(e) => {
            error!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
