//! Free functions over the process-wide built-in engine.
//!
//! ```no_run
//! use st_props::api;
//!
//! let h = api::h_pt(1000.0, 400.0)?;
//! let sat = api::sat_t(100.0)?;
//! println!("h = {h} kJ/kg, Psat = {} kPa", sat.p_kpa);
//! # Ok::<(), st_props::SteamError>(())
//! ```

use std::sync::OnceLock;

use st_core::Real;
use st_tables::Property;

use crate::engine::Steam;
use crate::error::{SteamError, SteamResult};
use crate::region::Region;
use crate::saturation::SaturationProps;
use crate::state::{self, KnownInputs, StateRecord};

pub use crate::quality::{mix, quality_from, x_from_h, x_from_s, x_from_u, x_from_v};

static BUILTIN: OnceLock<Result<Steam, String>> = OnceLock::new();

/// The engine over the compiled-in dataset, loaded on first use.
pub fn builtin() -> SteamResult<&'static Steam> {
    BUILTIN
        .get_or_init(|| Steam::from_builtin().map_err(|err| err.to_string()))
        .as_ref()
        .map_err(|message| SteamError::BuiltinUnavailable {
            message: message.clone(),
        })
}

pub fn sat_t(t_c: Real) -> SteamResult<SaturationProps> {
    builtin()?.sat_t(t_c)
}

pub fn sat_p(p_kpa: Real) -> SteamResult<SaturationProps> {
    builtin()?.sat_p(p_kpa)
}

pub fn psat_t(t_c: Real) -> SteamResult<Real> {
    builtin()?.psat_t(t_c)
}

pub fn tsat_p(p_kpa: Real) -> SteamResult<Real> {
    builtin()?.tsat_p(p_kpa)
}

pub fn region(p_kpa: Real, t_c: Real) -> SteamResult<Region> {
    builtin()?.region(p_kpa, t_c)
}

pub fn property(prop: Property, p_kpa: Real, t_c: Real) -> SteamResult<Real> {
    builtin()?.property(prop, p_kpa, t_c)
}

pub fn v_pt(p_kpa: Real, t_c: Real) -> SteamResult<Real> {
    builtin()?.v_pt(p_kpa, t_c)
}

pub fn u_pt(p_kpa: Real, t_c: Real) -> SteamResult<Real> {
    builtin()?.u_pt(p_kpa, t_c)
}

pub fn h_pt(p_kpa: Real, t_c: Real) -> SteamResult<Real> {
    builtin()?.h_pt(p_kpa, t_c)
}

pub fn s_pt(p_kpa: Real, t_c: Real) -> SteamResult<Real> {
    builtin()?.s_pt(p_kpa, t_c)
}

pub fn v_tx(t_c: Real, x: Real) -> SteamResult<Real> {
    builtin()?.v_tx(t_c, x)
}

pub fn u_tx(t_c: Real, x: Real) -> SteamResult<Real> {
    builtin()?.u_tx(t_c, x)
}

pub fn h_tx(t_c: Real, x: Real) -> SteamResult<Real> {
    builtin()?.h_tx(t_c, x)
}

pub fn s_tx(t_c: Real, x: Real) -> SteamResult<Real> {
    builtin()?.s_tx(t_c, x)
}

/// Solve a state against the built-in tables.
pub fn state(known: &KnownInputs) -> StateRecord {
    match builtin() {
        Ok(steam) => steam.state(known),
        Err(err) => state::unavailable(known, &err),
    }
}
