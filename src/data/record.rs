//! Typed row schema for contact-site measurements.

use serde::{Deserialize, Serialize};

/// Measured columns every input CSV must provide. Extra columns are ignored;
/// a missing one is a schema error at load time rather than a lookup failure
/// somewhere downstream.
pub const REQUIRED_COLUMNS: [&str; 16] = [
    "volume",
    "weighted",
    "geometricmean",
    "geometricstd",
    "skeletonsurface",
    "adj_mito_vol",
    "adj_mito_vol_fuzzy",
    "zposition",
    "height",
    "xyspan",
    "planar",
    "sphericity",
    "anisotropy",
    "distancetocentroid",
    "normalizeddistancetocentroid",
    "normalizedzposition",
];

/// One row as it appears in an upstream detector CSV, before provenance is
/// attached. Empty cells deserialize to `None` and become NaN.
#[derive(Debug, Clone, Deserialize)]
pub struct RawMeasurement {
    pub volume: Option<f64>,
    pub weighted: Option<f64>,
    pub geometricmean: Option<f64>,
    pub geometricstd: Option<f64>,
    pub skeletonsurface: Option<f64>,
    pub adj_mito_vol: Option<f64>,
    pub adj_mito_vol_fuzzy: Option<f64>,
    pub zposition: Option<f64>,
    pub height: Option<f64>,
    pub xyspan: Option<f64>,
    pub planar: Option<f64>,
    pub sphericity: Option<f64>,
    pub anisotropy: Option<f64>,
    pub distancetocentroid: Option<f64>,
    pub normalizeddistancetocentroid: Option<f64>,
    pub normalizedzposition: Option<f64>,
}

/// A single measured contact-site object with provenance and derived columns.
///
/// Field order is the column order of the curated CSV artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    // Measured geometry and intensity
    pub volume: f64,
    pub weighted: f64,
    pub geometricmean: f64,
    pub geometricstd: f64,
    pub skeletonsurface: f64,
    pub adj_mito_vol: f64,
    pub adj_mito_vol_fuzzy: f64,
    pub zposition: f64,
    pub height: f64,
    pub xyspan: f64,
    pub planar: f64,
    pub sphericity: f64,
    pub anisotropy: f64,
    pub distancetocentroid: f64,
    pub normalizeddistancetocentroid: f64,
    pub normalizedzposition: f64,

    // Provenance, constant per source file
    pub replicate: u32,
    pub serie: u32,
    pub celltype: String,
    pub experiment: String,
    pub alpha: f64,

    // Derived, recomputed whenever the table changes shape
    pub rmv: f64,
    pub ls: f64,
    #[serde(rename = "LV")]
    pub lv: f64,
    pub c_to_m: f64,
}

impl ContactRecord {
    /// Build a record from a raw measurement row plus its provenance.
    /// Derived columns start as NaN until [`recompute_derived`] runs.
    ///
    /// [`recompute_derived`]: ContactRecord::recompute_derived
    pub fn from_raw(
        raw: RawMeasurement,
        replicate: u32,
        serie: u32,
        celltype: &str,
        alpha: f64,
    ) -> Self {
        let v = |x: Option<f64>| x.unwrap_or(f64::NAN);
        Self {
            volume: v(raw.volume),
            weighted: v(raw.weighted),
            geometricmean: v(raw.geometricmean),
            geometricstd: v(raw.geometricstd),
            skeletonsurface: v(raw.skeletonsurface),
            adj_mito_vol: v(raw.adj_mito_vol),
            adj_mito_vol_fuzzy: v(raw.adj_mito_vol_fuzzy),
            zposition: v(raw.zposition),
            height: v(raw.height),
            xyspan: v(raw.xyspan),
            planar: v(raw.planar),
            sphericity: v(raw.sphericity),
            anisotropy: v(raw.anisotropy),
            distancetocentroid: v(raw.distancetocentroid),
            normalizeddistancetocentroid: v(raw.normalizeddistancetocentroid),
            normalizedzposition: v(raw.normalizedzposition),
            replicate,
            serie,
            celltype: celltype.to_string(),
            experiment: String::new(),
            alpha,
            rmv: f64::NAN,
            ls: f64::NAN,
            lv: f64::NAN,
            c_to_m: f64::NAN,
        }
    }

    /// Recompute the four derived columns from the current measured values.
    ///
    /// Single shared implementation for every computation site, so the loader
    /// and the vesicle filter cannot drift apart. Zero denominators yield NaN,
    /// which is propagated, not trapped.
    pub fn recompute_derived(&mut self) {
        self.rmv = self.adj_mito_vol_fuzzy / self.adj_mito_vol;
        self.ls = self.adj_mito_vol.ln();
        self.lv = self.volume.ln();
        self.c_to_m = self.volume / self.adj_mito_vol;
    }

    /// Replace NaN with `value` in every numeric column. Infinities are left
    /// alone; only undefined values are filled.
    pub fn fill_nan(&mut self, value: f64) {
        for x in [
            &mut self.volume,
            &mut self.weighted,
            &mut self.geometricmean,
            &mut self.geometricstd,
            &mut self.skeletonsurface,
            &mut self.adj_mito_vol,
            &mut self.adj_mito_vol_fuzzy,
            &mut self.zposition,
            &mut self.height,
            &mut self.xyspan,
            &mut self.planar,
            &mut self.sphericity,
            &mut self.anisotropy,
            &mut self.distancetocentroid,
            &mut self.normalizeddistancetocentroid,
            &mut self.normalizedzposition,
            &mut self.alpha,
            &mut self.rmv,
            &mut self.ls,
            &mut self.lv,
            &mut self.c_to_m,
        ] {
            if x.is_nan() {
                *x = value;
            }
        }
    }
}
