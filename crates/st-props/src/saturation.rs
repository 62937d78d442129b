//! Saturation-curve lookups.
//!
//! A saturation table is interpolated along its own driving axis. The
//! temperature-driven and pressure-driven tables are never mixed: a query
//! by temperature reads the former, a query by pressure the latter.

use serde::Serialize;
use st_core::Real;
use st_tables::{Property, SatAxis, SatColumn, SaturationTable};
use tracing::debug;

use crate::error::SteamResult;
use crate::interp::interp1;

/// Saturated liquid and vapor properties at one point of the curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SaturationProps {
    /// Saturation temperature [°C]
    #[serde(rename = "T_C")]
    pub t_c: Real,
    /// Saturation pressure [kPa]
    #[serde(rename = "P_kPa")]
    pub p_kpa: Real,
    pub vf: Real,
    pub vg: Real,
    pub uf: Real,
    pub ug: Real,
    pub hf: Real,
    pub hg: Real,
    pub sf: Real,
    pub sg: Real,
}

impl SaturationProps {
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

    /// Saturated-liquid value of `prop`.
    pub fn liquid(&self, prop: Property) -> Real {
        self.column(prop.liquid())
    }

    /// Saturated-vapor value of `prop`.
    pub fn vapor(&self, prop: Property) -> Real {
        self.column(prop.vapor())
    }
}

/// All saturation properties at `x` along the table's driving axis.
///
/// The driving variable is echoed back unchanged; the other one is
/// interpolated like the property columns.
pub fn lookup(table: &SaturationTable, x: Real) -> SteamResult<SaturationProps> {
    let axis = table.axis();
    let at = |col: SatColumn| interp1(axis, table.column(col), x);

    let (t_c, p_kpa) = match table.driver() {
        SatAxis::Temperature => (x, interp1(axis, table.pressures(), x)?),
        SatAxis::Pressure => (interp1(axis, table.temperatures(), x)?, x),
    };

    Ok(SaturationProps {
        t_c,
        p_kpa,
        vf: at(SatColumn::Vf)?,
        vg: at(SatColumn::Vg)?,
        uf: at(SatColumn::Uf)?,
        ug: at(SatColumn::Ug)?,
        hf: at(SatColumn::Hf)?,
        hg: at(SatColumn::Hg)?,
        sf: at(SatColumn::Sf)?,
        sg: at(SatColumn::Sg)?,
    })
}

/// Saturation pressure [kPa] at `t_c` from a temperature-driven table.
pub fn pressure_at(by_t: &SaturationTable, t_c: Real) -> SteamResult<Real> {
    interp1(by_t.temperatures(), by_t.pressures(), t_c)
}

/// Saturation temperature [°C] at `p_kpa` from a pressure-driven table.
pub fn temperature_at(by_p: &SaturationTable, p_kpa: Real) -> SteamResult<Real> {
    interp1(by_p.pressures(), by_p.temperatures(), p_kpa)
}

/// Pressure-driven projection of a temperature-driven table.
///
/// Used when no usable pressure-driven table was supplied.
pub fn pressure_projection(by_t: &SaturationTable) -> SaturationTable {
    debug!(rows = by_t.len(), "building pressure-driven saturation fallback");
    by_t.resorted(SatAxis::Pressure)
}
