//! Property identifiers shared by all tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Specific property tabulated in every region: v, u, h or s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Property {
    /// Specific volume [m³/kg]
    #[serde(rename = "v")]
    V,
    /// Specific internal energy [kJ/kg]
    #[serde(rename = "u")]
    U,
    /// Specific enthalpy [kJ/kg]
    #[serde(rename = "h")]
    H,
    /// Specific entropy [kJ/(kg·K)]
    #[serde(rename = "s")]
    S,
}

impl Property {
    /// Fixed order used wherever "the first known property" matters.
    pub const ALL: [Property; 4] = [Property::V, Property::U, Property::H, Property::S];

    pub fn name(self) -> &'static str {
        match self {
            Self::V => "v",
            Self::U => "u",
            Self::H => "h",
            Self::S => "s",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::V => "m^3/kg",
            Self::U | Self::H => "kJ/kg",
            Self::S => "kJ/kg-K",
        }
    }

    /// Saturated-liquid column for this property.
    pub fn liquid(self) -> SatColumn {
        match self {
            Self::V => SatColumn::Vf,
            Self::U => SatColumn::Uf,
            Self::H => SatColumn::Hf,
            Self::S => SatColumn::Sf,
        }
    }

    /// Saturated-vapor column for this property.
    pub fn vapor(self) -> SatColumn {
        match self {
            Self::V => SatColumn::Vg,
            Self::U => SatColumn::Ug,
            Self::H => SatColumn::Hg,
            Self::S => SatColumn::Sg,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "v" => Ok(Self::V),
            "u" => Ok(Self::U),
            "h" => Ok(Self::H),
            "s" => Ok(Self::S),
            other => Err(TableError::UnknownProperty {
                name: other.to_string(),
            }),
        }
    }
}

/// One of the eight saturated-liquid / saturated-vapor columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SatColumn {
    Vf,
    Vg,
    Uf,
    Ug,
    Hf,
    Hg,
    Sf,
    Sg,
}

impl SatColumn {
    pub const ALL: [SatColumn; 8] = [
        SatColumn::Vf,
        SatColumn::Vg,
        SatColumn::Uf,
        SatColumn::Ug,
        SatColumn::Hf,
        SatColumn::Hg,
        SatColumn::Sf,
        SatColumn::Sg,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vf => "vf",
            Self::Vg => "vg",
            Self::Uf => "uf",
            Self::Ug => "ug",
            Self::Hf => "hf",
            Self::Hg => "hg",
            Self::Sf => "sf",
            Self::Sg => "sg",
        }
    }

    pub fn property(self) -> Property {
        match self {
            Self::Vf | Self::Vg => Property::V,
            Self::Uf | Self::Ug => Property::U,
            Self::Hf | Self::Hg => Property::H,
            Self::Sf | Self::Sg => Property::S,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for SatColumn {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SatColumn::ALL
            .into_iter()
            .find(|c| c.name() == s.trim())
            .ok_or_else(|| TableError::UnknownProperty {
                name: s.trim().to_string(),
            })
    }
}
