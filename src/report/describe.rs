//! Describe the aggregated data for manual sanity-checking.
//!
//! Purely diagnostic: the summary is logged so the analyst can verify that
//! the number of conditions, replicates and cells matches the experiment
//! design. Nothing here feeds back into the output artifacts.

use crate::aggregate::AggregateTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Distinct series count for one (celltype, replicate) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesCount {
    pub celltype: String,
    pub replicate: u32,
    /// Number of distinct imaging series, i.e. cells.
    pub n_series: usize,
}

/// Summary of the grouping structure of an aggregated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeSummary {
    /// Unique replicate identifiers, ascending.
    pub replicates: Vec<u32>,
    /// Unique celltypes, ascending.
    pub celltypes: Vec<String>,
    /// Cells per (celltype, replicate), every combination listed.
    pub series_counts: Vec<SeriesCount>,
}

impl std::fmt::Display for DescribeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Unique replicates: {:?}", self.replicates)?;
        writeln!(f, "Unique celltypes: {:?}", self.celltypes)?;
        for sc in &self.series_counts {
            writeln!(
                f,
                "For celltype {} have a total of {} cells for replicate {}",
                sc.celltype, sc.n_series, sc.replicate
            )?;
        }
        Ok(())
    }
}

/// Summarize the grouping structure of `table` and log it.
///
/// Read-only; the table is borrowed and never altered.
pub fn describe(table: &AggregateTable) -> DescribeSummary {
    info!("Describing the collected data --- please check if this matches your assumptions");

    let replicates: BTreeSet<u32> = table.rows().iter().map(|r| r.replicate).collect();
    let celltypes: BTreeSet<String> = table.rows().iter().map(|r| r.celltype.clone()).collect();

    let mut series_counts = Vec::new();
    for celltype in &celltypes {
        for &replicate in &replicates {
            let series: BTreeSet<u32> = table
                .rows()
                .iter()
                .filter(|r| &r.celltype == celltype && r.replicate == replicate)
                .map(|r| r.serie)
                .collect();
            series_counts.push(SeriesCount {
                celltype: celltype.clone(),
                replicate,
                n_series: series.len(),
            });
        }
    }

    let summary = DescribeSummary {
        replicates: replicates.into_iter().collect(),
        celltypes: celltypes.into_iter().collect(),
        series_counts,
    };

    info!("Unique replicates: {:?}", summary.replicates);
    info!("Unique celltypes: {:?}", summary.celltypes);
    for sc in &summary.series_counts {
        info!(
            "For celltype {} have a total of {} cells for replicate {}",
            sc.celltype, sc.n_series, sc.replicate
        );
    }

    summary
}
