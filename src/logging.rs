//! Tracing subscriber construction for the CLI.
//!
//! One console layer, plus a plain-text `svrg.log` file layer when a log
//! directory is configured. Built once by the binary; file writes are
//! synchronous, so nothing needs an explicit flush at exit.

use crate::error::Result;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Install the global subscriber. `logdir`, when given, must exist; the file
/// layer writes `svrg.log` inside it at the same level as the console.
pub fn init(level: Level, logdir: Option<&Path>) -> Result<()> {
    let console = fmt::layer()
        .with_target(false)
        .with_filter(LevelFilter::from_level(level));

    match logdir {
        Some(dir) => {
            let file = File::create(dir.join("svrg.log"))?;
            let file_layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .with_filter(LevelFilter::from_level(level));
            tracing_subscriber::registry()
                .with(console)
                .with(file_layer)
                .init();
        }
        None => {
            tracing_subscriber::registry().with(console).init();
        }
    }
    Ok(())
}
