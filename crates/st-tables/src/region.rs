//! Piecewise region tables (superheated vapor, compressed liquid).
//!
//! The outer axis is pressure. Each pressure owns a block with its own
//! temperature grid; blocks do not share length or bounds.

use std::fmt;

use serde::{Deserialize, Serialize};
use st_core::Real;

use crate::error::{TableError, TableResult};
use crate::property::Property;

/// Single-phase region covered by a piecewise table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionKind {
    Superheated,
    Compressed,
}

impl RegionKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Superheated => "superheated",
            Self::Compressed => "compressed",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One tabulated point of a region table in table units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionRow {
    /// Pressure [kPa]
    pub p: Real,
    /// Temperature [°C]
    pub t: Real,
    pub v: Real,
    pub u: Real,
    pub h: Real,
    pub s: Real,
}

impl RegionRow {
    /// Build a row from `[P, T, v, u, h, s]`.
    pub fn from_values(values: [Real; 6]) -> Self {
        let [p, t, v, u, h, s] = values;
        Self { p, t, v, u, h, s }
    }

    pub fn get(&self, prop: Property) -> Real {
        match prop {
            Property::V => self.v,
            Property::U => self.u,
            Property::H => self.h,
            Property::S => self.s,
        }
    }
}

/// All points tabulated at one pressure, sorted by temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureBlock {
    pressure: Real,
    t: Vec<Real>,
    columns: [Vec<Real>; 4],
}

impl PressureBlock {
    fn from_sorted(pressure: Real, rows: &[RegionRow]) -> Self {
        let mut columns: [Vec<Real>; 4] = Default::default();
        for prop in Property::ALL {
            columns[prop.index()] = rows.iter().map(|r| r.get(prop)).collect();
        }
        Self {
            pressure,
            t: rows.iter().map(|r| r.t).collect(),
            columns,
        }
    }

    pub fn pressure(&self) -> Real {
        self.pressure
    }

    pub fn temperatures(&self) -> &[Real] {
        &self.t
    }

    pub fn column(&self, prop: Property) -> &[Real] {
        &self.columns[prop.index()]
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}

/// Irregular two-axis table: pressure outer, per-block temperature inner.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionTable {
    kind: RegionKind,
    pressures: Vec<Real>,
    blocks: Vec<PressureBlock>,
}

impl RegionTable {
    /// Group rows by exact pressure, sort pressures ascending and each block
    /// by temperature. Row values travel together through the sort.
    pub fn from_rows(kind: RegionKind, mut rows: Vec<RegionRow>) -> Self {
        rows.sort_by(|a, b| a.p.total_cmp(&b.p).then(a.t.total_cmp(&b.t)));

        let blocks: Vec<PressureBlock> = rows
            .chunk_by(|a, b| a.p == b.p)
            .map(|chunk| PressureBlock::from_sorted(chunk[0].p, chunk))
            .collect();

        Self {
            kind,
            pressures: blocks.iter().map(PressureBlock::pressure).collect(),
            blocks,
        }
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// Outer pressure axis, sorted ascending.
    pub fn pressures(&self) -> &[Real] {
        &self.pressures
    }

    pub fn blocks(&self) -> &[PressureBlock] {
        &self.blocks
    }

    pub fn block(&self, index: usize) -> TableResult<&PressureBlock> {
        self.blocks.get(index).ok_or(TableError::BlockOutOfRange {
            index,
            len: self.blocks.len(),
        })
    }

    /// Total number of tabulated points across all blocks.
    pub fn element_count(&self) -> usize {
        self.blocks.iter().map(PressureBlock::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(p: Real, t: Real, v: Real) -> RegionRow {
        RegionRow::from_values([p, t, v, 10.0 * v, 20.0 * v, 0.5 * v])
    }

    #[test]
    fn groups_by_pressure_and_sorts_blocks() {
        let rows = vec![
            r(200.0, 300.0, 3.0),
            r(100.0, 250.0, 2.0),
            r(200.0, 150.0, 1.5),
            r(100.0, 150.0, 1.0),
            r(100.0, 200.0, 1.2),
        ];
        let table = RegionTable::from_rows(RegionKind::Superheated, rows);

        assert_eq!(table.pressures(), &[100.0, 200.0]);
        let b0 = table.block(0).unwrap();
        assert_eq!(b0.temperatures(), &[150.0, 200.0, 250.0]);
        assert_eq!(b0.column(Property::V), &[1.0, 1.2, 2.0]);
        assert_eq!(b0.column(Property::H), &[20.0, 24.0, 40.0]);

        let b1 = table.block(1).unwrap();
        assert_eq!(b1.temperatures(), &[150.0, 300.0]);
        assert_eq!(table.element_count(), 5);
    }

    #[test]
    fn block_out_of_range_is_an_error() {
        let table = RegionTable::from_rows(RegionKind::Compressed, vec![r(5000.0, 20.0, 0.001)]);
        assert!(matches!(
            table.block(3),
            Err(TableError::BlockOutOfRange { index: 3, len: 1 })
        ));
    }

    #[test]
    fn empty_rows_give_empty_table() {
        let table = RegionTable::from_rows(RegionKind::Compressed, Vec::new());
        assert!(table.is_empty());
        assert_eq!(table.element_count(), 0);
        assert_eq!(table.kind().name(), "compressed");
    }
}
