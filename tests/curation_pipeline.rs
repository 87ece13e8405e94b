//! Integration tests for the end-to-end curation pipeline.

use contact_curate::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const HEADER: &str = "volume,weighted,geometricmean,geometricstd,skeletonsurface,\
adj_mito_vol,adj_mito_vol_fuzzy,zposition,height,xyspan,planar,sphericity,anisotropy,\
distancetocentroid,normalizeddistancetocentroid,normalizedzposition";

/// One synthetic measurement row. Only the fields the pipeline's predicates
/// read are varied; the rest are fixed plausible values.
struct Row {
    volume: f64,
    skeletonsurface: f64,
    adj_mito_vol: f64,
    adj_mito_vol_fuzzy: f64,
}

impl Row {
    /// A genuine contact: large adjacent mitochondria (ls = 10).
    fn contact(volume: f64) -> Self {
        let adj = (10.0f64).exp();
        Row {
            volume,
            skeletonsurface: 1.0,
            adj_mito_vol: adj,
            adj_mito_vol_fuzzy: 0.5 * adj,
        }
    }

    /// A vesicle artifact: small (ls = 4) and faint (rmv = 0.1).
    fn vesicle(volume: f64) -> Self {
        let adj = (4.0f64).exp();
        Row {
            volume,
            skeletonsurface: 1.0,
            adj_mito_vol: adj,
            adj_mito_vol_fuzzy: 0.1 * adj,
        }
    }

    fn to_csv_line(&self) -> String {
        format!(
            "{},1.0,0.5,0.1,{},{},{},2.0,1.0,1.0,0.3,0.7,0.2,4.0,0.4,0.1",
            self.volume, self.skeletonsurface, self.adj_mito_vol, self.adj_mito_vol_fuzzy
        )
    }
}

fn write_leaf(root: &Path, replicate: u32, celltype: &str, serie: u32, alpha: &str, rows: &[Row]) {
    let leaf = root
        .join(replicate.to_string())
        .join(celltype)
        .join(format!("series{:03}", serie))
        .join(alpha);
    fs::create_dir_all(&leaf).unwrap();
    let mut f = File::create(leaf.join("channels_eroded.csv")).unwrap();
    writeln!(f, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(f, "{}", row.to_csv_line()).unwrap();
    }
}

fn run_config(root: &Path, out: &Path) -> RunConfig {
    RunConfig {
        input_dir: root.to_path_buf(),
        output_dir: out.to_path_buf(),
        ln_size: 9.0,
        mito_intensity: 0.2,
        alpha: 0.05,
    }
}

/// Read one named column of the aggregated artifact.
fn aggregated_column(path: &PathBuf, column: &str) -> Vec<String> {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let idx = reader
        .headers()
        .unwrap()
        .iter()
        .position(|h| h == column)
        .unwrap_or_else(|| panic!("column '{}' missing", column));
    reader
        .records()
        .map(|r| r.unwrap().get(idx).unwrap().to_string())
        .collect()
}

#[test]
fn full_run_produces_all_artifacts() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("experimentA");
    write_leaf(
        &root,
        1,
        "HT-1080",
        1,
        "0.05",
        &[Row::contact(5.0), Row::contact(6.0), Row::vesicle(5.0)],
    );
    write_leaf(&root, 1, "HT-1080", 2, "0.05", &[Row::contact(7.0)]);
    write_leaf(&root, 2, "U2OS", 1, "0.05", &[Row::contact(4.0), Row::vesicle(3.0)]);
    let out = dir.path().join("curated");
    fs::create_dir_all(&out).unwrap();

    let artifacts = run(&run_config(&root, &out)).unwrap();

    assert!(artifacts.unfiltered_path.is_file());
    assert!(artifacts.filtered_path.is_file());
    assert!(artifacts.aggregated_path.is_file());

    // 6 rows loaded, 2 vesicles dropped
    assert_eq!(artifacts.n_unfiltered, 6);
    assert_eq!(artifacts.n_filtered, 4);
    // groups: (HT-1080, 1, 1), (HT-1080, 2, 1), (U2OS, 1, 2)
    assert_eq!(artifacts.n_groups, 3);

    let unfiltered = ContactTable::from_csv(&artifacts.unfiltered_path).unwrap();
    assert_eq!(unfiltered.len(), 6);
    assert!(unfiltered.iter().all(|r| r.experiment == "experimentA"));

    let filtered = ContactTable::from_csv(&artifacts.filtered_path).unwrap();
    assert_eq!(filtered.len(), 4);
    assert!(filtered.iter().all(|r| r.ls > 9.0));
}

#[test]
fn loader_drops_zero_skeletonsurface_rows() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("expA");
    let rows = vec![
        Row { skeletonsurface: 1.0, ..Row::contact(5.0) },
        Row { skeletonsurface: 0.0, ..Row::contact(5.0) },
        Row { skeletonsurface: 2.0, ..Row::contact(5.0) },
    ];
    write_leaf(&root, 1, "A", 1, "0.05", &rows);

    let table = load_contacts(&root, 0.05).unwrap();
    assert_eq!(table.len(), 2);
    for r in &table {
        assert_eq!(r.replicate, 1);
        assert_eq!(r.serie, 1);
        assert_eq!(r.celltype, "A");
        assert!(r.skeletonsurface > 0.0);
    }
}

#[test]
fn mismatched_alpha_makes_the_run_fatal() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("expA");
    write_leaf(&root, 1, "A", 1, "0.1", &[Row::contact(5.0)]);
    let out = dir.path().join("curated");
    fs::create_dir_all(&out).unwrap();

    let err = run(&run_config(&root, &out)).unwrap_err();
    assert!(matches!(err, CurateError::EmptyData(_)));
    assert!(!out.join("contacts_unfiltered.csv").exists());
}

#[test]
fn ambiguous_leaf_is_skipped_but_run_continues() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("expA");
    write_leaf(&root, 1, "A", 1, "0.05", &[Row::contact(5.0)]);
    // second eroded file makes the leaf ambiguous
    let bad_leaf = root.join("2").join("A").join("series001").join("0.05");
    fs::create_dir_all(&bad_leaf).unwrap();
    for name in ["a_eroded.csv", "b_eroded.csv"] {
        let mut f = File::create(bad_leaf.join(name)).unwrap();
        writeln!(f, "{}", HEADER).unwrap();
        writeln!(f, "{}", Row::contact(9.0).to_csv_line()).unwrap();
    }

    let table = load_contacts(&root, 0.05).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.records()[0].replicate, 1);
}

#[test]
fn unfiltered_artifact_roundtrips() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("expA");
    write_leaf(&root, 1, "A", 1, "0.05", &[Row::contact(5.0), Row::vesicle(3.0)]);
    let out = dir.path().join("curated");
    fs::create_dir_all(&out).unwrap();

    let artifacts = run(&run_config(&root, &out)).unwrap();
    let original = load_contacts(&root, 0.05).unwrap();
    let reloaded = ContactTable::from_csv(&artifacts.unfiltered_path).unwrap();

    assert_eq!(reloaded.len(), original.len());
    for (a, b) in reloaded.iter().zip(original.iter()) {
        assert!((a.volume - b.volume).abs() < 1e-9);
        assert!((a.rmv - b.rmv).abs() < 1e-9);
        assert!((a.ls - b.ls).abs() < 1e-9);
        assert_eq!(a.celltype, b.celltype);
        assert_eq!(a.experiment, b.experiment);
    }
}

#[test]
fn aggregated_artifact_has_one_row_per_group_with_counts() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("expA");
    write_leaf(
        &root,
        1,
        "A",
        1,
        "0.05",
        &[Row::contact(5.0), Row::contact(6.0), Row::contact(7.0)],
    );
    write_leaf(&root, 1, "B", 2, "0.05", &[Row::contact(8.0)]);
    let out = dir.path().join("curated");
    fs::create_dir_all(&out).unwrap();

    let artifacts = run(&run_config(&root, &out)).unwrap();

    let celltypes = aggregated_column(&artifacts.aggregated_path, "celltype");
    assert_eq!(celltypes, vec!["A", "B"]);

    let counts = aggregated_column(&artifacts.aggregated_path, "number of contacts");
    assert_eq!(counts, vec!["3", "1"]);

    let q95 = aggregated_column(&artifacts.aggregated_path, "Volume Q95");
    let plan_q95 = aggregated_column(&artifacts.aggregated_path, "volume q95");
    assert_eq!(q95, plan_q95);

    // single-member group: spread statistics are NaN, mean is defined
    let stds = aggregated_column(&artifacts.aggregated_path, "volume std");
    assert_eq!(stds[1], "NaN");
    let means = aggregated_column(&artifacts.aggregated_path, "volume mean");
    assert_eq!(means[1], "8");
}

#[test]
fn filter_modes_partition_the_loaded_candidates() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("expA");
    write_leaf(
        &root,
        1,
        "A",
        1,
        "0.05",
        &[
            Row::contact(5.0),
            Row::vesicle(5.0),
            Row::vesicle(6.0),
            Row::contact(1.0), // below K, not a candidate
        ],
    );

    let table = load_contacts(&root, 0.05).unwrap();
    let params = VesicleParams::default();

    let (kept, keep_outcome) =
        filter_vesicles(table.clone(), &params, FilterMode::KeepVesicles).unwrap();
    let (contacts, drop_outcome) =
        filter_vesicles(table, &params, FilterMode::DropVesicles).unwrap();

    assert_eq!(keep_outcome.n_candidates, 3);
    assert_eq!(drop_outcome.n_candidates, 3);
    assert_eq!(kept.len(), 2);
    assert_eq!(contacts.len(), 1);
    assert_eq!(kept.len() + contacts.len(), keep_outcome.n_candidates);
}
