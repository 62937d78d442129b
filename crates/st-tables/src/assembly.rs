//! Assembly of typed tables from raw row values.
//!
//! Raw rows are what a reference table looks like after generic parsing:
//! a list of optional numbers per row. A row with the wrong width, a missing
//! value or a non-finite value is skipped and recorded in the report; every
//! other row lands in the assembled table.

use serde::{Deserialize, Serialize};
use st_core::Real;
use tracing::warn;

use crate::region::{RegionKind, RegionRow, RegionTable};
use crate::saturation::{SatAxis, SaturationRow, SaturationTable};

/// One unparsed table row.
pub type RawRow = Vec<Option<Real>>;

/// Outcome of assembling one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyReport {
    pub table: String,
    pub rows_total: usize,
    pub rows_parsed: usize,
    pub rows_skipped: usize,
    /// 1-based row numbers that were skipped.
    pub skipped_rows: Vec<usize>,
    /// Number of pressure blocks (region tables only).
    pub pressure_blocks: Option<usize>,
    /// Row count per pressure block, in pressure order (region tables only).
    pub block_row_counts: Vec<usize>,
}

/// Convert a raw row into a fixed-width array of finite values.
fn complete_row<const N: usize>(raw: &[Option<Real>]) -> Option<[Real; N]> {
    if raw.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(raw) {
        match value {
            Some(v) if v.is_finite() => *slot = *v,
            _ => return None,
        }
    }
    Some(out)
}

fn collect_rows<const N: usize, R>(
    table: &str,
    raw: &[RawRow],
    build: impl Fn([Real; N]) -> R,
) -> (Vec<R>, AssemblyReport) {
    let mut rows = Vec::with_capacity(raw.len());
    let mut skipped = Vec::new();

    for (i, values) in raw.iter().enumerate() {
        match complete_row::<N>(values) {
            Some(vals) => rows.push(build(vals)),
            None => skipped.push(i + 1),
        }
    }

    if !skipped.is_empty() {
        warn!(table, skipped = skipped.len(), rows = ?skipped, "skipping incomplete table rows");
    }

    let report = AssemblyReport {
        table: table.to_string(),
        rows_total: raw.len(),
        rows_parsed: rows.len(),
        rows_skipped: skipped.len(),
        skipped_rows: skipped,
        pressure_blocks: None,
        block_row_counts: Vec::new(),
    };
    (rows, report)
}

/// Assemble a saturation table from rows of `[T, P, vf, vg, uf, ug, hf, hg, sf, sg]`.
pub fn assemble_saturation(
    table: &str,
    raw: &[RawRow],
    driver: SatAxis,
) -> (SaturationTable, AssemblyReport) {
    let (rows, report) = collect_rows::<10, _>(table, raw, SaturationRow::from_values);
    (SaturationTable::from_rows(rows, driver), report)
}

/// Assemble a piecewise region table from rows of `[P, T, v, u, h, s]`.
pub fn assemble_region(
    table: &str,
    raw: &[RawRow],
    kind: RegionKind,
) -> (RegionTable, AssemblyReport) {
    let (rows, mut report) = collect_rows::<6, _>(table, raw, RegionRow::from_values);
    let region = RegionTable::from_rows(kind, rows);
    report.pressure_blocks = Some(region.blocks().len());
    report.block_row_counts = region.blocks().iter().map(|b| b.len()).collect();
    (region, report)
}
