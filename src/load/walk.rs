//! Directory walker for the detector's on-disk layout.
//!
//! The detector writes one directory tree per experiment:
//!
//! ```text
//! root/                     (experiment)
//!   1/                      (replicate, integer)
//!     HT-1080/              (celltype / treatment)
//!       series001/          (imaging series, fixed "series" prefix)
//!         0.05/             (alpha value)
//!           *eroded*.csv
//! ```

use crate::error::{CurateError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// One accepted leaf: a unique eroded CSV plus the provenance parsed from the
/// directory names above it.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafCsv {
    pub path: PathBuf,
    pub replicate: u32,
    pub celltype: String,
    pub serie: u32,
    pub alpha: f64,
}

/// Enumerate every leaf under `root` whose alpha directory matches the
/// requested `alpha`.
///
/// Leaves with zero or more than one eroded CSV are logged and skipped; the
/// walk continues over the remaining leaves. Alpha directories for other
/// values are skipped with a debug note only. A directory name that does not
/// parse (replicate, series number, alpha), or a series number below 1, is a
/// malformed-input error that aborts the walk.
pub fn discover(root: &Path, alpha: f64) -> Result<Vec<LeafCsv>> {
    let mut leaves = Vec::new();

    for replicate_dir in subdirectories(root)? {
        let replicate = parse_component::<u32>(&replicate_dir, "replicate")?;
        for celltype_dir in subdirectories(&replicate_dir)? {
            let celltype = directory_name(&celltype_dir)?.to_string();
            for series_dir in subdirectories(&celltype_dir)? {
                let serie = parse_series_number(&series_dir)?;
                for alpha_dir in subdirectories(&series_dir)? {
                    let av = parse_component::<f64>(&alpha_dir, "alpha")?;
                    if av != alpha {
                        debug!("Alpha value not expected {} -- ignoring", av);
                        continue;
                    }
                    info!(
                        "Celltype {} Replicate {} Cell number {} alpha {}",
                        celltype, replicate, serie, av
                    );
                    match unique_eroded_csv(&alpha_dir)? {
                        Some(path) => leaves.push(LeafCsv {
                            path,
                            replicate,
                            celltype: celltype.clone(),
                            serie,
                            alpha: av,
                        }),
                        None => {
                            error!("No unique eroded CSV in {}", alpha_dir.display());
                            error!("Please check that the detector completed processing");
                        }
                    }
                }
            }
        }
    }

    Ok(leaves)
}

/// Immediate subdirectories of `path`, sorted by name so runs are
/// reproducible across platforms. Stray files are ignored.
fn subdirectories(path: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(path)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn directory_name(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CurateError::MalformedPath {
            path: path.to_path_buf(),
            reason: "directory name is not valid UTF-8".to_string(),
        })
}

fn parse_component<T: std::str::FromStr>(path: &Path, what: &str) -> Result<T> {
    let name = directory_name(path)?;
    name.parse().map_err(|_| CurateError::MalformedPath {
        path: path.to_path_buf(),
        reason: format!("expected {} directory name, got '{}'", what, name),
    })
}

/// Series directories are named `series<NNN>`; the number after the fixed
/// prefix must be at least 1.
fn parse_series_number(path: &Path) -> Result<u32> {
    let name = directory_name(path)?;
    let serie: u32 = name
        .strip_prefix("series")
        .and_then(|digits| digits.parse().ok())
        .ok_or_else(|| CurateError::MalformedPath {
            path: path.to_path_buf(),
            reason: format!("expected series<number> directory name, got '{}'", name),
        })?;
    if serie == 0 {
        return Err(CurateError::MalformedPath {
            path: path.to_path_buf(),
            reason: "series number must be positive".to_string(),
        });
    }
    Ok(serie)
}

/// The single `*eroded*.csv` file in `dir`, or `None` when there are zero or
/// several candidates.
fn unique_eroded_csv(dir: &Path) -> Result<Option<PathBuf>> {
    let mut matches: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.contains("eroded") && n.ends_with(".csv"))
                    .unwrap_or(false)
        })
        .collect();
    if matches.len() == 1 {
        Ok(Some(matches.remove(0)))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    fn make_leaf(root: &Path, replicate: &str, celltype: &str, series: &str, alpha: &str) -> PathBuf {
        let leaf = root.join(replicate).join(celltype).join(series).join(alpha);
        fs::create_dir_all(&leaf).unwrap();
        leaf
    }

    fn touch(dir: &Path, name: &str) {
        let mut f = File::create(dir.join(name)).unwrap();
        writeln!(f, "volume").unwrap();
    }

    #[test]
    fn discovers_matching_leaf() {
        let dir = tempdir().unwrap();
        let leaf = make_leaf(dir.path(), "1", "A", "series001", "0.05");
        touch(&leaf, "objects_eroded.csv");

        let leaves = discover(dir.path(), 0.05).unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].replicate, 1);
        assert_eq!(leaves[0].celltype, "A");
        assert_eq!(leaves[0].serie, 1);
        assert_eq!(leaves[0].alpha, 0.05);
    }

    #[test]
    fn skips_other_alpha_values() {
        let dir = tempdir().unwrap();
        let leaf = make_leaf(dir.path(), "1", "A", "series001", "0.1");
        touch(&leaf, "objects_eroded.csv");

        let leaves = discover(dir.path(), 0.05).unwrap();
        assert!(leaves.is_empty());
    }

    #[test]
    fn skips_leaf_with_multiple_matches() {
        let dir = tempdir().unwrap();
        let bad = make_leaf(dir.path(), "1", "A", "series001", "0.05");
        touch(&bad, "a_eroded.csv");
        touch(&bad, "b_eroded.csv");
        let good = make_leaf(dir.path(), "2", "A", "series002", "0.05");
        touch(&good, "objects_eroded.csv");

        let leaves = discover(dir.path(), 0.05).unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].replicate, 2);
    }

    #[test]
    fn skips_leaf_without_eroded_csv() {
        let dir = tempdir().unwrap();
        let leaf = make_leaf(dir.path(), "1", "A", "series001", "0.05");
        touch(&leaf, "objects_full.csv");

        let leaves = discover(dir.path(), 0.05).unwrap();
        assert!(leaves.is_empty());
    }

    #[test]
    fn rejects_malformed_series_directory() {
        let dir = tempdir().unwrap();
        let leaf = make_leaf(dir.path(), "1", "A", "cell007", "0.05");
        touch(&leaf, "objects_eroded.csv");

        let err = discover(dir.path(), 0.05).unwrap_err();
        assert!(matches!(err, CurateError::MalformedPath { .. }));
    }

    #[test]
    fn rejects_series_number_zero() {
        let dir = tempdir().unwrap();
        let leaf = make_leaf(dir.path(), "1", "A", "series000", "0.05");
        touch(&leaf, "objects_eroded.csv");

        let err = discover(dir.path(), 0.05).unwrap_err();
        assert!(matches!(err, CurateError::MalformedPath { .. }));
    }

    #[test]
    fn ignores_stray_files_between_levels() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "notes.csv");
        let leaf = make_leaf(dir.path(), "3", "B", "series012", "0.05");
        touch(&leaf, "x_eroded.csv");

        let leaves = discover(dir.path(), 0.05).unwrap();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].serie, 12);
        assert_eq!(leaves[0].celltype, "B");
    }
}
