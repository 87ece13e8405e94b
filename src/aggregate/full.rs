//! Per-cell aggregation of curated contact tables.
//!
//! Groups rows by (celltype, serie, replicate, experiment) and computes a
//! fixed column-by-statistic matrix. The matrix is deliberately hard-coded:
//! downstream analysis reads these exact flattened column names, so the plan
//! is part of the output contract.

use crate::aggregate::stats;
use crate::data::{ContactRecord, ContactTable};
use crate::error::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// One descriptive statistic over a group's column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stat {
    Mean,
    Median,
    Std,
    Count,
    Sum,
    Skew,
    Max,
    Kurt,
    Q75,
    Q90,
    Q95,
    Q99,
}

impl Stat {
    /// Suffix used in the flattened column name.
    pub fn label(self) -> &'static str {
        match self {
            Stat::Mean => "mean",
            Stat::Median => "median",
            Stat::Std => "std",
            Stat::Count => "count",
            Stat::Sum => "sum",
            Stat::Skew => "skew",
            Stat::Max => "max",
            Stat::Kurt => "kurt",
            Stat::Q75 => "q75",
            Stat::Q90 => "q90",
            Stat::Q95 => "q95",
            Stat::Q99 => "q99",
        }
    }

    /// Apply the statistic to a group's values.
    pub fn apply(self, xs: &[f64]) -> f64 {
        match self {
            Stat::Mean => stats::mean(xs),
            Stat::Median => stats::median(xs),
            Stat::Std => stats::sample_std(xs),
            Stat::Count => xs.len() as f64,
            Stat::Sum => xs.iter().sum(),
            Stat::Skew => stats::skewness(xs),
            Stat::Max => stats::max(xs),
            Stat::Kurt => stats::kurtosis(xs),
            Stat::Q75 => stats::quantile(xs, 0.75),
            Stat::Q90 => stats::quantile(xs, 0.90),
            Stat::Q95 => stats::quantile(xs, 0.95),
            Stat::Q99 => stats::quantile(xs, 0.99),
        }
    }
}

type Accessor = fn(&ContactRecord) -> f64;

struct ColumnAgg {
    label: &'static str,
    accessor: Accessor,
    stats: &'static [Stat],
}

use Stat::*;

/// The fixed column-by-statistic matrix, in output column order.
const PLAN: &[ColumnAgg] = &[
    ColumnAgg { label: "LV", accessor: |r| r.lv, stats: &[Mean, Std, Count, Sum, Skew, Kurt] },
    ColumnAgg {
        label: "volume",
        accessor: |r| r.volume,
        stats: &[Mean, Median, Std, Count, Sum, Skew, Max, Kurt, Q75, Q90, Q95, Q99],
    },
    ColumnAgg {
        label: "weighted",
        accessor: |r| r.weighted,
        stats: &[Mean, Std, Count, Sum, Skew, Kurt],
    },
    ColumnAgg { label: "geometricmean", accessor: |r| r.geometricmean, stats: &[Mean, Std, Kurt] },
    ColumnAgg { label: "geometricstd", accessor: |r| r.geometricstd, stats: &[Mean, Std] },
    ColumnAgg {
        label: "skeletonsurface",
        accessor: |r| r.skeletonsurface,
        stats: &[Mean, Std, Count, Sum, Max, Kurt, Q75, Q90],
    },
    ColumnAgg {
        label: "adj_mito_vol",
        accessor: |r| r.adj_mito_vol,
        stats: &[Mean, Std, Count, Sum, Max],
    },
    ColumnAgg {
        label: "adj_mito_vol_fuzzy",
        accessor: |r| r.adj_mito_vol_fuzzy,
        stats: &[Mean, Std, Count, Sum],
    },
    ColumnAgg { label: "zposition", accessor: |r| r.zposition, stats: &[Mean, Std, Sum] },
    ColumnAgg { label: "height", accessor: |r| r.height, stats: &[Mean, Std, Sum] },
    ColumnAgg { label: "xyspan", accessor: |r| r.xyspan, stats: &[Mean, Std, Sum] },
    ColumnAgg { label: "planar", accessor: |r| r.planar, stats: &[Mean, Std, Sum] },
    ColumnAgg { label: "sphericity", accessor: |r| r.sphericity, stats: &[Mean, Std, Sum] },
    ColumnAgg { label: "anisotropy", accessor: |r| r.anisotropy, stats: &[Mean, Std, Sum] },
    ColumnAgg {
        label: "distancetocentroid",
        accessor: |r| r.distancetocentroid,
        stats: &[Mean, Std, Sum],
    },
    ColumnAgg {
        label: "normalizeddistancetocentroid",
        accessor: |r| r.normalizeddistancetocentroid,
        stats: &[Mean, Std, Sum],
    },
    ColumnAgg {
        label: "normalizedzposition",
        accessor: |r| r.normalizedzposition,
        stats: &[Mean, Std, Sum],
    },
    ColumnAgg { label: "rmv", accessor: |r| r.rmv, stats: &[Mean, Std, Sum] },
    ColumnAgg { label: "c_to_m", accessor: |r| r.c_to_m, stats: &[Mean, Std, Sum] },
];

/// Convenience aliases appended after the plan columns.
const ALIAS_HEADERS: [&str; 2] = ["Volume Q95", "number of contacts"];

/// One aggregated group.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub celltype: String,
    pub serie: u32,
    pub replicate: u32,
    pub experiment: String,
    /// Statistic values in header order (plan columns, then aliases).
    pub values: Vec<f64>,
}

/// Aggregation result: one row per (celltype, serie, replicate, experiment)
/// group, keys sorted ascending.
///
/// Statistics over single-row groups are NaN where undefined (std, skew,
/// kurt); this is accepted output, written to CSV as `NaN`.
#[derive(Debug, Clone)]
pub struct AggregateTable {
    headers: Vec<String>,
    rows: Vec<AggregateRow>,
}

impl AggregateTable {
    /// Full header list: the four group keys followed by the statistic
    /// columns.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Aggregated rows, sorted by group key.
    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no group was produced.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a statistic value by flattened column name, e.g.
    /// `"volume mean"` or `"number of contacts"`.
    pub fn value(&self, row: usize, header: &str) -> Option<f64> {
        let idx = self.headers.iter().position(|h| h == header)?;
        // headers() starts with the four key columns
        self.rows.get(row)?.values.get(idx.checked_sub(4)?).copied()
    }

    /// Write the table to CSV.
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            let mut record: Vec<String> = vec![
                row.celltype.clone(),
                row.serie.to_string(),
                row.replicate.to_string(),
                row.experiment.to_string(),
            ];
            record.extend(row.values.iter().map(|v| v.to_string()));
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Group `table` by (celltype, serie, replicate, experiment) and compute the
/// full statistic plan for each group.
pub fn aggregate_full(table: &ContactTable) -> AggregateTable {
    let mut headers: Vec<String> = vec![
        "celltype".to_string(),
        "serie".to_string(),
        "replicate".to_string(),
        "experiment".to_string(),
    ];
    for col in PLAN {
        for stat in col.stats {
            headers.push(format!("{} {}", col.label, stat.label()));
        }
    }
    // alias source positions inside the value vector
    let q95_idx = headers
        .iter()
        .position(|h| h == "volume q95")
        .expect("volume q95 in plan") - 4;
    let count_idx = headers
        .iter()
        .position(|h| h == "volume count")
        .expect("volume count in plan") - 4;
    headers.extend(ALIAS_HEADERS.iter().map(|h| h.to_string()));

    let mut groups: BTreeMap<(String, u32, u32, String), Vec<&ContactRecord>> = BTreeMap::new();
    for r in table {
        groups
            .entry((r.celltype.clone(), r.serie, r.replicate, r.experiment.clone()))
            .or_default()
            .push(r);
    }

    let rows = groups
        .into_iter()
        .map(|((celltype, serie, replicate, experiment), members)| {
            let mut values = Vec::with_capacity(headers.len() - 4);
            for col in PLAN {
                let xs: Vec<f64> = members.iter().map(|r| (col.accessor)(r)).collect();
                for stat in col.stats {
                    values.push(stat.apply(&xs));
                }
            }
            values.push(values[q95_idx]);
            values.push(values[count_idx]);
            AggregateRow { celltype, serie, replicate, experiment, values }
        })
        .collect();

    AggregateTable { headers, rows }
}
