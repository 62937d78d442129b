//! Complete table sets and their JSON representation.
//!
//! A table file is a JSON object with four row lists and an optional
//! precision map:
//!
//! ```json
//! {
//!   "sat_t":       [[T, P, vf, vg, uf, ug, hf, hg, sf, sg], ...],
//!   "sat_p":       [[T, P, vf, vg, uf, ug, hf, hg, sf, sg], ...],
//!   "superheated": [[P, T, v, u, h, s], ...],
//!   "compressed":  [[P, T, v, u, h, s], ...],
//!   "precision":   {"P_kPa": 4, "T_C": 2, "vf": 7}
//! }
//! ```
//!
//! Units: kPa, °C, m³/kg, kJ/kg, kJ/(kg·K). `null` marks a missing value;
//! such rows are skipped. `sat_p` may be omitted.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assembly::{AssemblyReport, RawRow, assemble_region, assemble_saturation};
use crate::error::{TableError, TableResult};
use crate::precision::Precision;
use crate::region::{RegionKind, RegionTable};
use crate::saturation::{SatAxis, SaturationTable};

const BUILTIN_JSON: &str = include_str!("../data/steam_tables.json");

#[derive(Debug, Deserialize)]
struct TableFile {
    sat_t: Vec<RawRow>,
    #[serde(default)]
    sat_p: Vec<RawRow>,
    superheated: Vec<RawRow>,
    compressed: Vec<RawRow>,
    #[serde(default)]
    precision: BTreeMap<String, u32>,
}

/// Assembly reports for every table of a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    pub sat_t: AssemblyReport,
    pub sat_p: AssemblyReport,
    pub superheated: AssemblyReport,
    pub compressed: AssemblyReport,
}

/// The four reference tables plus precision metadata.
#[derive(Debug, Clone)]
pub struct TableSet {
    /// Temperature-driven saturation table.
    pub sat_t: SaturationTable,
    /// Pressure-driven saturation table, when the source provides one.
    pub sat_p: Option<SaturationTable>,
    pub superheated: RegionTable,
    pub compressed: RegionTable,
    pub precision: Precision,
}

impl TableSet {
    pub fn new(
        sat_t: SaturationTable,
        sat_p: Option<SaturationTable>,
        superheated: RegionTable,
        compressed: RegionTable,
    ) -> Self {
        Self {
            sat_t,
            sat_p,
            superheated,
            compressed,
            precision: Precision::default(),
        }
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Piecewise table for a single-phase region.
    pub fn region(&self, kind: RegionKind) -> &RegionTable {
        match kind {
            RegionKind::Superheated => &self.superheated,
            RegionKind::Compressed => &self.compressed,
        }
    }

    /// Parse and assemble a table set from JSON text.
    pub fn from_json_str(text: &str) -> TableResult<(Self, BuildReport)> {
        let file: TableFile = serde_json::from_str(text)?;
        Self::assemble(file)
    }

    /// Load and assemble a table set from a JSON file.
    pub fn load_json(path: &Path) -> TableResult<(Self, BuildReport)> {
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = content.len(), "loading steam tables");
        Self::from_json_str(&content)
    }

    /// The reference dataset compiled into the crate.
    pub fn builtin() -> TableResult<(Self, BuildReport)> {
        Self::from_json_str(BUILTIN_JSON)
    }

    fn assemble(file: TableFile) -> TableResult<(Self, BuildReport)> {
        let (sat_t, sat_t_report) = assemble_saturation("sat_t", &file.sat_t, SatAxis::Temperature);
        if sat_t.is_empty() {
            return Err(TableError::EmptyTable { what: "sat_t" });
        }
        let (sat_p, sat_p_report) = assemble_saturation("sat_p", &file.sat_p, SatAxis::Pressure);
        let (superheated, sh_report) =
            assemble_region("superheated", &file.superheated, RegionKind::Superheated);
        let (compressed, comp_report) =
            assemble_region("compressed", &file.compressed, RegionKind::Compressed);

        let set = Self {
            sat_t,
            sat_p: (!sat_p.is_empty()).then_some(sat_p),
            superheated,
            compressed,
            precision: Precision::finalize(&file.precision),
        };
        let report = BuildReport {
            sat_t: sat_t_report,
            sat_p: sat_p_report,
            superheated: sh_report,
            compressed: comp_report,
        };
        Ok((set, report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "sat_t": [
            [100.0, 101.325, 0.001044, 1.673, 418.94, 2506.5, 419.04, 2676.1, 1.3069, 7.3549],
            [110.0, 143.27, 0.001052, 1.2102, 461.14, 2518.1, 461.30, 2691.5, 1.4185, 7.2387]
        ],
        "superheated": [[100.0, 150.0, 1.9364, 2582.8, 2776.4, 7.6134]],
        "compressed": [[5000.0, 20.0, 0.0009995, 83.65, 88.65, 0.2956], [5000.0, null, 1, 1, 1, 1]]
    }"#;

    #[test]
    fn small_file_without_sat_p() {
        let (set, report) = TableSet::from_json_str(SMALL).unwrap();
        assert!(set.sat_p.is_none());
        assert_eq!(set.sat_t.len(), 2);
        assert_eq!(report.compressed.rows_skipped, 1);
        assert_eq!(report.compressed.skipped_rows, vec![2]);
        assert_eq!(set.region(RegionKind::Compressed).element_count(), 1);
        assert_eq!(set.precision.decimals("x"), Some(6));
    }

    #[test]
    fn empty_saturation_table_is_rejected() {
        let text = r#"{"sat_t": [], "superheated": [], "compressed": []}"#;
        assert!(matches!(
            TableSet::from_json_str(text),
            Err(TableError::EmptyTable { what: "sat_t" })
        ));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            TableSet::from_json_str("{\"sat_t\": 3}"),
            Err(TableError::Json(_))
        ));
    }

    #[test]
    fn builtin_dataset_loads_cleanly() {
        let (set, report) = TableSet::builtin().unwrap();
        assert!(set.sat_p.as_ref().is_some_and(|t| t.len() >= 2));
        assert_eq!(report.sat_t.rows_skipped, 0);
        assert_eq!(report.superheated.rows_skipped, 0);
        assert_eq!(report.compressed.rows_skipped, 0);
        assert!(set.superheated.pressures().len() > 1);
        assert!(set.compressed.pressures().len() > 1);
    }
}
