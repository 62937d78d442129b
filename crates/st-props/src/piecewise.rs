//! Two-axis interpolation over piecewise region tables.
//!
//! Pressure is bracketed on the outer axis. Each bracketing block is
//! interpolated along its own temperature grid, then the two results are
//! blended linearly in pressure.

use st_core::Real;
use st_tables::{PressureBlock, Property, RegionTable};

use crate::error::{SteamError, SteamResult};
use crate::interp::{bracket, interp1, lerp};

/// `prop` at `(p_kpa, t_c)` from a superheated or compressed-liquid table.
pub fn interpolate(table: &RegionTable, prop: Property, p_kpa: Real, t_c: Real) -> SteamResult<Real> {
    let pressures = table.pressures();
    match pressures.len() {
        0 => Err(SteamError::EmptyRegion {
            region: table.kind(),
        }),
        1 => along_block(table.block(0)?, prop, t_c),
        _ => {
            let (i0, i1) = bracket(pressures, p_kpa)?;
            let y0 = along_block(table.block(i0)?, prop, t_c)?;
            let y1 = along_block(table.block(i1)?, prop, t_c)?;
            Ok(lerp(p_kpa, pressures[i0], pressures[i1], y0, y1))
        }
    }
}

fn along_block(block: &PressureBlock, prop: Property, t_c: Real) -> SteamResult<Real> {
    interp1(block.temperatures(), block.column(prop), t_c)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use st_tables::{RegionKind, RegionRow};

    fn affine(p: Real, t: Real) -> Real {
        3.0 + 0.02 * p - 1.5 * t
    }

    /// Irregular grid: 2..6 pressure blocks, each with its own 2..8 temperatures.
    fn irregular_rows() -> impl Strategy<Value = Vec<RegionRow>> {
        prop::collection::btree_set(1u32..500, 2..6).prop_flat_map(|pressures| {
            let blocks: Vec<_> = pressures
                .into_iter()
                .map(|p| {
                    prop::collection::btree_set(0u32..400, 2..8).prop_map(move |temps| {
                        temps
                            .into_iter()
                            .map(|t| {
                                let (p, t) = (Real::from(p) * 10.0, Real::from(t));
                                let y = affine(p, t);
                                RegionRow::from_values([p, t, y, y, y, y])
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            blocks.prop_map(|b| b.into_iter().flatten().collect())
        })
    }

    proptest! {
        #[test]
        fn recovers_affine_function(
            rows in irregular_rows(),
            pf in 0.0..1.0f64,
            t in 0.0..400.0f64,
        ) {
            let table = RegionTable::from_rows(RegionKind::Superheated, rows);
            let ps = table.pressures();
            let p = ps[0] + pf * (ps[ps.len() - 1] - ps[0]);
            let got = interpolate(&table, Property::S, p, t).unwrap();
            let want = affine(p, t);
            prop_assert!((got - want).abs() <= 1e-10 * (1.0 + want.abs()), "got {got}, want {want}");
        }

        #[test]
        fn grid_nodes_are_exact(rows in irregular_rows()) {
            let table = RegionTable::from_rows(RegionKind::Compressed, rows.clone());
            for row in rows {
                let got = interpolate(&table, Property::U, row.p, row.t).unwrap();
                prop_assert!((got - row.u).abs() <= 1e-9 * (1.0 + row.u.abs()));
            }
        }
    }
}
