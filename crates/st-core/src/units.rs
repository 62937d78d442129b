//! Unit-aware numeric input.
//!
//! Steam tables are tabulated in engineering units: pressure in kPa,
//! temperature in °C, specific volume in m³/kg, internal energy and
//! enthalpy in kJ/kg, entropy in kJ/(kg·K). Everything in this module
//! converts *to* those table units.
//!
//! Pressure and temperature go through `uom` so that conversions share one
//! source of truth with the rest of the SI stack; the specific quantities
//! that uom does not carry in table units use explicit factors.

use std::fmt;

use thiserror::Error;
use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomTemperature};
use uom::si::pressure::{
    atmosphere, bar, kilopascal, megapascal, pascal, pound_force_per_square_inch,
};
use uom::si::thermodynamic_temperature::{
    degree_celsius, degree_fahrenheit, degree_rankine, kelvin,
};

pub type Pressure = UomPressure;
pub type Temperature = UomTemperature;

/// Standard atmosphere in kPa, used for gauge conversions.
pub const ATM_KPA: f64 = 101.325;

#[inline]
pub fn kpa(v: f64) -> Pressure {
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn to_kpa(p: Pressure) -> f64 {
    p.get::<kilopascal>()
}

#[inline]
pub fn to_degc(t: Temperature) -> f64 {
    t.get::<degree_celsius>()
}

/// Dimension/quantity family for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quantity {
    /// Absolute pressure (table unit: kPa)
    Pressure,
    /// Temperature (table unit: °C)
    Temperature,
    /// Specific volume (table unit: m³/kg)
    SpecificVolume,
    /// Specific internal energy / enthalpy (table unit: kJ/kg)
    SpecificEnergy,
    /// Specific entropy (table unit: kJ/(kg·K))
    SpecificEntropy,
    /// Vapor quality (0-1)
    Quality,
}

impl Quantity {
    /// Unit label used when rendering values of this quantity.
    pub fn table_unit(self) -> &'static str {
        match self {
            Self::Pressure => "kPa",
            Self::Temperature => "°C",
            Self::SpecificVolume => "m^3/kg",
            Self::SpecificEnergy => "kJ/kg",
            Self::SpecificEntropy => "kJ/kg-K",
            Self::Quality => "-",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pressure => write!(f, "Pressure"),
            Self::Temperature => write!(f, "Temperature"),
            Self::SpecificVolume => write!(f, "Specific Volume"),
            Self::SpecificEnergy => write!(f, "Specific Energy"),
            Self::SpecificEntropy => write!(f, "Specific Entropy"),
            Self::Quality => write!(f, "Quality"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    /// Unit not allowed for this quantity (plain "psi" needs "psia" or "psig")
    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: &'static str },

    /// Value out of physical range (negative absolute temperature, ...)
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

/// Parse `raw_text` as a `quantity`, returning the value in table units.
///
/// A bare number is taken to already be in table units.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();

    match quantity {
        Quantity::Pressure => parse_pressure(trimmed),
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::SpecificVolume => parse_specific_volume(trimmed),
        Quantity::SpecificEnergy => parse_specific_energy(trimmed),
        Quantity::SpecificEntropy => parse_specific_entropy(trimmed),
        Quantity::Quality => parse_quality(trimmed),
    }
}

/// Parse temperature, return °C.
fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let t = match unit.to_lowercase().as_str() {
        "" | "c" | "°c" | "degc" | "celsius" => Temperature::new::<degree_celsius>(value),
        "k" | "kelvin" => Temperature::new::<kelvin>(value),
        "f" | "°f" | "degf" | "fahrenheit" => Temperature::new::<degree_fahrenheit>(value),
        "r" | "°r" | "rankine" => Temperature::new::<degree_rankine>(value),
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Temperature,
            });
        }
    };

    if t.get::<kelvin>() <= 0.0 {
        return Err(UnitError::OutOfRange {
            value,
            reason: "absolute temperature must be > 0 K",
        });
    }

    Ok(to_degc(t))
}

/// Parse pressure, return absolute kPa.
fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let p = match unit.to_lowercase().as_str() {
        "" | "kpa" => Pressure::new::<kilopascal>(value),
        "pa" | "pascal" => Pressure::new::<pascal>(value),
        "mpa" => Pressure::new::<megapascal>(value),
        "bar" => Pressure::new::<bar>(value),
        "mbar" | "millibar" => Pressure::new::<bar>(value / 1e3),
        "atm" => Pressure::new::<atmosphere>(value),
        "psia" => Pressure::new::<pound_force_per_square_inch>(value),
        "psig" => Pressure::new::<pound_force_per_square_inch>(value) + kpa(ATM_KPA),
        "barg" => Pressure::new::<bar>(value) + kpa(ATM_KPA),
        "kpag" => kpa(value + ATM_KPA),
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit,
                reason: "use 'psia' (absolute) or 'psig' (gauge)",
            });
        }
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Pressure,
            });
        }
    };

    let p_kpa = to_kpa(p);
    if p_kpa < 0.0 {
        return Err(UnitError::OutOfRange {
            value: p_kpa,
            reason: "absolute pressure cannot be negative",
        });
    }

    Ok(p_kpa)
}

/// Parse specific volume, return m³/kg.
fn parse_specific_volume(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let m3_kg = match unit.to_lowercase().as_str() {
        "" | "m^3/kg" | "m³/kg" | "m3/kg" => value,
        "l/kg" | "dm^3/kg" | "dm3/kg" => value / 1e3,
        "cm^3/g" | "cm3/g" => value / 1e3,
        "ft^3/lbm" | "ft3/lbm" => value * 0.062_428,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::SpecificVolume,
            });
        }
    };

    if m3_kg <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: m3_kg,
            reason: "specific volume must be positive",
        });
    }

    Ok(m3_kg)
}

/// Parse specific internal energy or enthalpy, return kJ/kg.
fn parse_specific_energy(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kj_kg = match unit.to_lowercase().as_str() {
        "" | "kj/kg" => value,
        "j/kg" => value / 1e3,
        "mj/kg" => value * 1e3,
        "btu/lbm" | "btu/lb" => value * 2.326,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::SpecificEnergy,
            });
        }
    };

    Ok(kj_kg)
}

/// Parse specific entropy, return kJ/(kg·K).
fn parse_specific_entropy(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kj_kg_k = match unit.to_lowercase().as_str() {
        "" | "kj/kg-k" | "kj/(kg·k)" | "kj/(kg k)" | "kj/(kg*k)" => value,
        "j/kg-k" | "j/(kg·k)" | "j/(kg k)" | "j/(kg*k)" => value / 1e3,
        "btu/lbm-r" | "btu/(lbm·r)" | "btu/(lbm r)" | "btu/(lbm*r)" => value * 4.1868,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::SpecificEntropy,
            });
        }
    };

    Ok(kj_kg_k)
}

/// Parse quality, accepting percent notation.
///
/// Out-of-range quality is *not* rejected here: the state solver reports
/// it in-band, so the parser only converts.
fn parse_quality(input: &str) -> Result<f64, UnitError> {
    let trimmed = input.trim();
    let (num_str, scale) = match trimmed.strip_suffix('%') {
        Some(rest) => (rest.trim(), 0.01),
        None => (trimmed, 1.0),
    };
    let value: f64 = num_str
        .parse()
        .map_err(|_| UnitError::ParseError(format!("Could not parse quality from '{}'", input)))?;
    Ok(value * scale)
}

/// Split a value+unit string into (numeric_value, unit_string).
///
/// Examples:
/// - "212F" -> (212.0, "F")
/// - "14.7 psia" -> (14.7, "psia")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    let split_idx = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+' && c != 'e' && c != 'E')
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn bare_numbers_are_table_units() {
        assert_eq!(parse_quantity("101.325", Quantity::Pressure).unwrap(), 101.325);
        assert!(close(parse_quantity("100", Quantity::Temperature).unwrap(), 100.0, 1e-9));
        assert_eq!(parse_quantity("2676.1", Quantity::SpecificEnergy).unwrap(), 2676.1);
    }

    #[test]
    fn parse_pressure_units() {
        assert!(close(parse_pressure("1 MPa").unwrap(), 1000.0, 1e-9));
        assert!(close(parse_pressure("1 bar").unwrap(), 100.0, 1e-9));
        assert!(close(parse_pressure("101325 Pa").unwrap(), 101.325, 1e-9));
        assert!(close(parse_pressure("1 atm").unwrap(), 101.325, 1e-6));
        assert!(close(parse_pressure("14.696 psia").unwrap(), 101.325, 0.01));
        assert!(close(parse_pressure("0 psig").unwrap(), 101.325, 1e-9));
    }

    #[test]
    fn reject_plain_psi() {
        assert!(matches!(
            parse_pressure("14.7 psi"),
            Err(UnitError::AmbiguousUnit { unit, .. }) if unit == "psi"
        ));
    }

    #[test]
    fn reject_negative_pressure() {
        assert!(matches!(
            parse_pressure("-5 kPa"),
            Err(UnitError::OutOfRange { .. })
        ));
    }

    #[test]
    fn parse_temperature_units() {
        assert!(close(parse_temperature("373.15 K").unwrap(), 100.0, 1e-9));
        assert!(close(parse_temperature("212F").unwrap(), 100.0, 1e-9));
        assert!(close(parse_temperature("-10 C").unwrap(), -10.0, 1e-9));
    }

    #[test]
    fn reject_below_absolute_zero() {
        assert!(parse_temperature("-300 C").is_err());
        assert!(parse_temperature("0 K").is_err());
    }

    #[test]
    fn parse_specific_quantities() {
        assert!(close(parse_specific_energy("1 BTU/lbm").unwrap(), 2.326, 1e-12));
        assert!(close(parse_specific_energy("2676100 J/kg").unwrap(), 2676.1, 1e-9));
        assert!(close(parse_specific_volume("1.673 L/kg").unwrap(), 0.001673, 1e-12));
        assert!(close(parse_specific_entropy("7354.9 J/kg-K").unwrap(), 7.3549, 1e-12));
    }

    #[test]
    fn unknown_unit_names_quantity() {
        let err = parse_quantity("5 furlongs", Quantity::SpecificVolume).unwrap_err();
        assert!(err.to_string().contains("Specific Volume"));
    }

    #[test]
    fn quality_accepts_percent_and_keeps_out_of_range() {
        assert_eq!(parse_quality("0.5").unwrap(), 0.5);
        assert_eq!(parse_quality("50%").unwrap(), 0.5);
        assert_eq!(parse_quality("1.5").unwrap(), 1.5);
        assert!(parse_quality("half").is_err());
    }

    #[test]
    fn constructors_roundtrip() {
        assert!(close(to_kpa(kpa(101.325)), 101.325, 1e-12));
        assert!(close(to_degc(degc(100.0)), 100.0, 1e-9));
    }
}
