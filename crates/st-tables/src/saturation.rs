//! Saturation tables.
//!
//! The saturation curve is tabulated twice: once driven by temperature and
//! once driven by pressure. The two projections are built independently
//! and are not expected to agree bit-for-bit after interpolation, so they
//! stay two separate immutable values.

use serde::{Deserialize, Serialize};
use st_core::Real;

use crate::property::SatColumn;

/// Which column drives (is the sorted independent axis of) a saturation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SatAxis {
    Temperature,
    Pressure,
}

/// One row of a saturation table in table units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturationRow {
    /// Saturation temperature [°C]
    pub t: Real,
    /// Saturation pressure [kPa]
    pub p: Real,
    pub vf: Real,
    pub vg: Real,
    pub uf: Real,
    pub ug: Real,
    pub hf: Real,
    pub hg: Real,
    pub sf: Real,
    pub sg: Real,
}

impl SaturationRow {
    /// Build a row from `[T, P, vf, vg, uf, ug, hf, hg, sf, sg]`.
    pub fn from_values(values: [Real; 10]) -> Self {
        let [t, p, vf, vg, uf, ug, hf, hg, sf, sg] = values;
        Self {
            t,
            p,
            vf,
            vg,
            uf,
            ug,
            hf,
            hg,
            sf,
            sg,
        }
    }

    pub fn column(&self, col: SatColumn) -> Real {
        match col {
            SatColumn::Vf => self.vf,
            SatColumn::Vg => self.vg,
            SatColumn::Uf => self.uf,
            SatColumn::Ug => self.ug,
            SatColumn::Hf => self.hf,
            SatColumn::Hg => self.hg,
            SatColumn::Sf => self.sf,
            SatColumn::Sg => self.sg,
        }
    }

    fn key(&self, driver: SatAxis) -> Real {
        match driver {
            SatAxis::Temperature => self.t,
            SatAxis::Pressure => self.p,
        }
    }
}

/// Column-oriented saturation table sorted by its driving axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationTable {
    driver: SatAxis,
    t: Vec<Real>,
    p: Vec<Real>,
    columns: [Vec<Real>; 8],
}

impl SaturationTable {
    /// Build a table from rows, sorting them ascending by the driving axis.
    ///
    /// Every column has the same length as the driving axis by construction.
    pub fn from_rows(mut rows: Vec<SaturationRow>, driver: SatAxis) -> Self {
        rows.sort_by(|a, b| a.key(driver).total_cmp(&b.key(driver)));

        let mut columns: [Vec<Real>; 8] = Default::default();
        for col in &mut columns {
            col.reserve(rows.len());
        }
        for row in &rows {
            for c in SatColumn::ALL {
                columns[c.index()].push(row.column(c));
            }
        }

        Self {
            driver,
            t: rows.iter().map(|r| r.t).collect(),
            p: rows.iter().map(|r| r.p).collect(),
            columns,
        }
    }

    /// Re-project the same rows onto another driving axis.
    pub fn resorted(&self, driver: SatAxis) -> Self {
        Self::from_rows(self.rows().collect(), driver)
    }

    pub fn driver(&self) -> SatAxis {
        self.driver
    }

    /// The sorted driving axis.
    pub fn axis(&self) -> &[Real] {
        match self.driver {
            SatAxis::Temperature => &self.t,
            SatAxis::Pressure => &self.p,
        }
    }

    pub fn temperatures(&self) -> &[Real] {
        &self.t
    }

    pub fn pressures(&self) -> &[Real] {
        &self.p
    }

    pub fn column(&self, col: SatColumn) -> &[Real] {
        &self.columns[col.index()]
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = SaturationRow> + '_ {
        (0..self.len()).map(move |i| SaturationRow {
            t: self.t[i],
            p: self.p[i],
            vf: self.columns[0][i],
            vg: self.columns[1][i],
            uf: self.columns[2][i],
            ug: self.columns[3][i],
            hf: self.columns[4][i],
            hg: self.columns[5][i],
            sf: self.columns[6][i],
            sg: self.columns[7][i],
        })
    }
}
