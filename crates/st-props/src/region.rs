//! Phase-region classification from pressure and temperature.

use std::fmt;

use serde::{Deserialize, Serialize};
use st_core::Real;
use st_tables::RegionKind;

/// Default half-width of the two-phase band around the saturation temperature [°C].
pub const SAT_BAND_C: Real = 0.25;

/// Thermodynamic region of a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    /// Subcooled liquid, below the saturation temperature.
    #[serde(rename = "compressed")]
    Compressed,
    /// Vapor above the saturation temperature.
    #[serde(rename = "superheated")]
    Superheated,
    /// Within the band around the saturation curve.
    #[serde(rename = "two-phase")]
    TwoPhase,
    #[serde(rename = "unknown")]
    Unknown,
}

impl Region {
    pub fn name(self) -> &'static str {
        match self {
            Self::Compressed => "compressed",
            Self::Superheated => "superheated",
            Self::TwoPhase => "two-phase",
            Self::Unknown => "unknown",
        }
    }

    /// Piecewise table that covers this region, if it is single-phase.
    pub fn single_phase(self) -> Option<RegionKind> {
        match self {
            Self::Compressed => Some(RegionKind::Compressed),
            Self::Superheated => Some(RegionKind::Superheated),
            Self::TwoPhase | Self::Unknown => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify `t_c` against the saturation temperature `tsat_c`.
///
/// Within `band_c` of saturation (inclusive) is two-phase; colder is
/// compressed liquid, hotter superheated vapor.
pub fn classify(t_c: Real, tsat_c: Real, band_c: Real) -> Region {
    if (t_c - tsat_c).abs() <= band_c {
        Region::TwoPhase
    } else if t_c < tsat_c {
        Region::Compressed
    } else {
        Region::Superheated
    }
}
