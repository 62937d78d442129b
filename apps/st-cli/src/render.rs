//! Plain-text rendering with units and display precision.

use serde::Serialize;
use st_core::Quantity;
use st_props::{SaturationProps, StateKey, StateRecord, StateValues};
use st_tables::{Precision, SatColumn};

/// One named value, the way `--json` prints single results.
#[derive(Debug, Serialize)]
pub struct Reading {
    pub name: String,
    pub quantity: Quantity,
    pub value: f64,
    pub unit: &'static str,
}

impl Reading {
    pub fn new(name: impl Into<String>, quantity: Quantity, value: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            value,
            unit: quantity.table_unit(),
        }
    }

    pub fn render(&self, precision: &Precision) -> String {
        format!(
            "{}: {}",
            self.name,
            with_unit(self.value, precision.decimals(&self.name), self.unit)
        )
    }
}

/// Fixed decimals when known, shortest round-trip text otherwise.
pub fn number(value: f64, decimals: Option<u32>) -> String {
    match decimals {
        Some(d) => format!("{value:.prec$}", prec = d as usize),
        None => format!("{value}"),
    }
}

fn with_unit(value: f64, decimals: Option<u32>, unit: &str) -> String {
    let text = number(value, decimals);
    if unit.is_empty() || unit == "-" {
        text
    } else {
        format!("{text} {unit}")
    }
}

fn line(key: &str, value: f64, unit: &str, precision: &Precision) -> String {
    format!("{key}: {}", with_unit(value, precision.decimals(key), unit))
}

pub fn saturation(sat: &SaturationProps, precision: &Precision) -> Vec<String> {
    let mut lines = vec![
        line("P_kPa", sat.p_kpa, Quantity::Pressure.table_unit(), precision),
        line("T_C", sat.t_c, Quantity::Temperature.table_unit(), precision),
    ];
    lines.extend(
        SatColumn::ALL
            .into_iter()
            .map(|col| line(col.name(), sat.column(col), col.property().unit(), precision)),
    );
    lines
}

fn section(title: &str, body: Vec<String>, out: &mut Vec<String>) {
    out.push(format!("{title}:"));
    if body.is_empty() {
        out.push("  (none)".to_string());
    } else {
        out.extend(body.into_iter().map(|l| format!("  {l}")));
    }
}

fn values(values: &StateValues, precision: &Precision) -> Vec<String> {
    values
        .iter()
        .map(|(key, v): (StateKey, f64)| line(key.name(), v, key.unit(), precision))
        .collect()
}

pub fn state(record: &StateRecord, precision: &Precision) -> String {
    let mut out = vec![format!("region: {}", record.region())];
    section("known", values(&record.known, precision), &mut out);
    section("computed", values(&record.computed, precision), &mut out);
    section(
        "sat",
        record
            .sat
            .as_ref()
            .map(|s| saturation(s, precision))
            .unwrap_or_default(),
        &mut out,
    );
    section(
        "needs",
        record.needs().iter().map(|n| format!("- {n}")).collect(),
        &mut out,
    );
    section(
        "notes",
        record.notes.iter().map(|n| format!("- {n}")).collect(),
        &mut out,
    );
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_props::{KnownInputs, Steam};

    #[test]
    fn numbers_use_precision() {
        assert_eq!(number(101.35, Some(4)), "101.3500");
        assert_eq!(number(0.5, None), "0.5");
        assert_eq!(number(2676.14999, Some(2)), "2676.15");
    }

    #[test]
    fn reading_renders_unit() {
        let p = Precision::default();
        let r = Reading::new("h", Quantity::SpecificEnergy, 2676.1);
        assert_eq!(r.render(&p), "h: 2676.10 kJ/kg");
        let x = Reading::new("x", Quantity::Quality, 0.25);
        assert_eq!(x.render(&p), "x: 0.250000");
    }

    #[test]
    fn saturation_block_lists_all_columns() {
        let steam = Steam::from_builtin().unwrap();
        let sat = steam.sat_t(100.0).unwrap();
        let lines = saturation(&sat, steam.precision());
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "P_kPa: 101.3500 kPa");
        assert_eq!(lines[1], "T_C: 100.00 °C");
        assert!(lines[7].starts_with("hg: 2676.10"));
    }

    #[test]
    fn unsolved_state_lists_needs_and_notes() {
        let steam = Steam::from_builtin().unwrap();
        let record = steam.state(&KnownInputs::new().p_kpa(101.325).t_c(100.0));
        let text = state(&record, steam.precision());
        assert!(text.starts_with("region: two-phase"));
        assert!(text.contains("needs:\n  - x or one of v/u/h/s"));
        assert!(text.contains("Tsat_C: "));
        assert!(text.contains("notes:\n  - At saturation boundary"));
    }

    #[test]
    fn empty_sections_say_none() {
        let steam = Steam::from_builtin().unwrap();
        let record = steam.state(&KnownInputs::new().p_kpa(1000.0).t_c(400.0));
        let text = state(&record, steam.precision());
        assert!(text.contains("sat:\n  (none)"));
        assert!(text.contains("needs:\n  (none)"));
        assert!(text.contains("h: 3263.90 kJ/kg"));
    }
}
