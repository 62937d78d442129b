//! Region-aware property resolution at a given pressure and temperature.

use st_core::Real;
use st_tables::{Property, SaturationTable, TableSet};

use crate::error::SteamResult;
use crate::piecewise;
use crate::region::Region;
use crate::saturation;

/// `prop` at `(p_kpa, t_c)` for an already classified `region`.
///
/// Single-phase regions interpolate their piecewise table. Inside the
/// two-phase band the saturated-vapor value at `p_kpa` is returned, read
/// from the pressure-driven saturation table `by_p`. No quality blend is
/// attempted.
pub fn resolve(
    tables: &TableSet,
    by_p: &SaturationTable,
    region: Region,
    prop: Property,
    p_kpa: Real,
    t_c: Real,
) -> SteamResult<Real> {
    match region.single_phase() {
        Some(kind) => piecewise::interpolate(tables.region(kind), prop, p_kpa, t_c),
        None => Ok(saturation::lookup(by_p, p_kpa)?.vapor(prop)),
    }
}
