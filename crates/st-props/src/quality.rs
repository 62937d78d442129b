//! Two-phase mixture blending and its inverse.

use serde::Serialize;
use st_core::{Real, is_unit_fraction};
use st_tables::Property;

use crate::error::{SteamError, SteamResult};
use crate::saturation::SaturationProps;

/// Blend saturated-liquid `f` and saturated-vapor `g` at quality `x`.
pub fn mix(f: Real, g: Real, x: Real) -> SteamResult<Real> {
    if !is_unit_fraction(x) {
        return Err(SteamError::QualityOutOfRange { x });
    }
    Ok(f + x * (g - f))
}

/// Quality that reproduces `value` between `f` and `g`.
///
/// The result is not range-checked; callers decide what an out-of-range
/// quality means.
pub fn quality_from(value: Real, f: Real, g: Real) -> SteamResult<Real> {
    if g == f {
        return Err(SteamError::DegenerateSaturation { value: f });
    }
    Ok((value - f) / (g - f))
}

pub fn x_from_v(v: Real, vf: Real, vg: Real) -> SteamResult<Real> {
    quality_from(v, vf, vg)
}

pub fn x_from_u(u: Real, uf: Real, ug: Real) -> SteamResult<Real> {
    quality_from(u, uf, ug)
}

pub fn x_from_h(h: Real, hf: Real, hg: Real) -> SteamResult<Real> {
    quality_from(h, hf, hg)
}

pub fn x_from_s(s: Real, sf: Real, sg: Real) -> SteamResult<Real> {
    quality_from(s, sf, sg)
}

/// Quality implied by a known `value` of `prop` at a saturation point.
pub fn x_from(sat: &SaturationProps, prop: Property, value: Real) -> SteamResult<Real> {
    quality_from(value, sat.liquid(prop), sat.vapor(prop))
}

/// Mixture properties at one quality.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mixture {
    pub x: Real,
    pub v: Real,
    pub u: Real,
    pub h: Real,
    pub s: Real,
}

impl Mixture {
    pub fn get(&self, prop: Property) -> Real {
        match prop {
            Property::V => self.v,
            Property::U => self.u,
            Property::H => self.h,
            Property::S => self.s,
        }
    }
}

/// Blend every property of `sat` at quality `x`.
pub fn blend(sat: &SaturationProps, x: Real) -> SteamResult<Mixture> {
    let at = |prop: Property| mix(sat.liquid(prop), sat.vapor(prop), x);
    Ok(Mixture {
        x,
        v: at(Property::V)?,
        u: at(Property::U)?,
        h: at(Property::H)?,
        s: at(Property::S)?,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn quality_roundtrip(
            f in -1e4..1e4f64,
            span in 1e-4..1e4f64,
            x in 0.0..=1.0f64,
        ) {
            let g = f + span;
            let back = quality_from(mix(f, g, x).unwrap(), f, g).unwrap();
            prop_assert!((back - x).abs() <= 1e-10 * (1.0 + f.abs() / span));
        }
    }
}
