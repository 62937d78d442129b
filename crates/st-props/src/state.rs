//! Flexible state solver.
//!
//! Given any subset of pressure, temperature, quality and one specific
//! property, the solver picks the first applicable strategy:
//!
//! | case | inputs                 | strategy                                        |
//! |------|------------------------|-------------------------------------------------|
//! | A    | P, T                   | classify; single-phase lookup or saturation     |
//! | B    | T, x                   | saturation by temperature, blend                |
//! | C    | P, x                   | saturation by pressure, blend                   |
//! | D    | P, one of v/u/h/s      | saturation by pressure, invert for x, blend     |
//! | E    | T, one of v/u/h/s      | saturation by temperature, invert for x, blend  |
//! | F    | anything else          | unsolved                                        |
//!
//! The solver never fails and never assumes a quality. Anything it cannot
//! determine is reported in the record as the properties still needed.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use st_core::units::{Pressure, Temperature, to_degc, to_kpa};
use st_core::{Quantity, Real, is_unit_fraction, parse_quantity};
use st_tables::{Property, SatColumn};
use tracing::debug;

use crate::engine::Steam;
use crate::error::{SteamError, SteamResult};
use crate::quality::{self, Mixture};
use crate::region::Region;
use crate::saturation::SaturationProps;

const NEED_X_IN_RANGE: &str = "x in [0, 1]";
const NEED_X_OR_PROPERTY: &str = "x or one of v/u/h/s";
const NEED_CONSISTENT_PROPERTY: &str =
    "T_C outside saturation boundary or a consistent two-phase property";
const NEED_T: &str = "T_C";
const NEED_P: &str = "P_kPa or additional independent property (e.g. T_C with P_kPa)";

const NOTE_X_RANGE: &str = "x must be within [0, 1] for saturated mixture.";
const NOTE_AT_BOUNDARY: &str = "At saturation boundary, one extra independent property is required.";
const NOTE_NOTHING_USABLE: &str = "No usable known properties were provided.";
const NOTE_INSUFFICIENT: &str = "Insufficient independent properties to resolve state.";

/// Pairs that each determine a state.
pub fn default_needs() -> Vec<String> {
    [
        "P_kPa and T_C",
        "P_kPa and x",
        "T_C and x",
        "P_kPa and one of v/u/h/s",
        "T_C and one of v/u/h/s",
    ]
    .map(String::from)
    .to_vec()
}

/// Named slot of a state record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKey {
    Pressure,
    Temperature,
    SaturationTemperature,
    Quality,
    Prop(Property),
}

impl StateKey {
    /// Display order of record values.
    pub const ALL: [StateKey; 8] = [
        StateKey::Pressure,
        StateKey::Temperature,
        StateKey::SaturationTemperature,
        StateKey::Quality,
        StateKey::Prop(Property::V),
        StateKey::Prop(Property::U),
        StateKey::Prop(Property::H),
        StateKey::Prop(Property::S),
    ];

    /// Key accepted as solver input. `P` and `T` alias the table keys.
    pub fn parse_input(name: &str) -> Option<Self> {
        match name.trim() {
            "P_kPa" | "P" => Some(Self::Pressure),
            "T_C" | "T" => Some(Self::Temperature),
            "x" => Some(Self::Quality),
            other => other.parse::<Property>().ok().map(Self::Prop),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pressure => "P_kPa",
            Self::Temperature => "T_C",
            Self::SaturationTemperature => "Tsat_C",
            Self::Quality => "x",
            Self::Prop(p) => p.name(),
        }
    }

    pub fn quantity(self) -> Quantity {
        match self {
            Self::Pressure => Quantity::Pressure,
            Self::Temperature | Self::SaturationTemperature => Quantity::Temperature,
            Self::Quality => Quantity::Quality,
            Self::Prop(Property::V) => Quantity::SpecificVolume,
            Self::Prop(Property::U | Property::H) => Quantity::SpecificEnergy,
            Self::Prop(Property::S) => Quantity::SpecificEntropy,
        }
    }

    pub fn unit(self) -> &'static str {
        self.quantity().table_unit()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional values of a state, in table units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StateValues {
    #[serde(rename = "P_kPa", skip_serializing_if = "Option::is_none")]
    pub p_kpa: Option<Real>,
    #[serde(rename = "T_C", skip_serializing_if = "Option::is_none")]
    pub t_c: Option<Real>,
    #[serde(rename = "Tsat_C", skip_serializing_if = "Option::is_none")]
    pub tsat_c: Option<Real>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Real>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<Real>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u: Option<Real>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<Real>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<Real>,
}

impl StateValues {
    fn slot(&mut self, key: StateKey) -> &mut Option<Real> {
        match key {
            StateKey::Pressure => &mut self.p_kpa,
            StateKey::Temperature => &mut self.t_c,
            StateKey::SaturationTemperature => &mut self.tsat_c,
            StateKey::Quality => &mut self.x,
            StateKey::Prop(Property::V) => &mut self.v,
            StateKey::Prop(Property::U) => &mut self.u,
            StateKey::Prop(Property::H) => &mut self.h,
            StateKey::Prop(Property::S) => &mut self.s,
        }
    }

    pub fn get(&self, key: StateKey) -> Option<Real> {
        match key {
            StateKey::Pressure => self.p_kpa,
            StateKey::Temperature => self.t_c,
            StateKey::SaturationTemperature => self.tsat_c,
            StateKey::Quality => self.x,
            StateKey::Prop(p) => self.property(p),
        }
    }

    pub fn set(&mut self, key: StateKey, value: Real) {
        *self.slot(key) = Some(value);
    }

    pub fn property(&self, prop: Property) -> Option<Real> {
        match prop {
            Property::V => self.v,
            Property::U => self.u,
            Property::H => self.h,
            Property::S => self.s,
        }
    }

    /// Present values in display order.
    pub fn iter(&self) -> impl Iterator<Item = (StateKey, Real)> + '_ {
        StateKey::ALL
            .into_iter()
            .filter_map(|k| self.get(k).map(|v| (k, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn set_mixture(&mut self, m: &Mixture) {
        self.x = Some(m.x);
        for prop in Property::ALL {
            self.set(StateKey::Prop(prop), m.get(prop));
        }
    }
}

/// An input the solver could not use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoredInput {
    /// Key outside the accepted set.
    Unsupported(String),
    /// Accepted key whose value is not a finite number.
    NonNumeric(String),
}

impl IgnoredInput {
    fn note(&self) -> String {
        match self {
            Self::Unsupported(key) => format!("Ignoring unsupported key: {key}"),
            Self::NonNumeric(key) => format!("Ignoring non-numeric value for {key}"),
        }
    }
}

/// Known properties handed to the solver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnownInputs {
    values: StateValues,
    ignored: Vec<IgnoredInput>,
}

impl KnownInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from text pairs such as `("P", "1 MPa")` or `("x", "35%")`.
    ///
    /// Values may carry units; they are converted to table units.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut known = Self::new();
        for (key, value) in pairs {
            known.insert_text(key.as_ref(), value.as_ref());
        }
        known
    }

    pub fn p_kpa(mut self, p_kpa: Real) -> Self {
        self.insert_value(StateKey::Pressure, p_kpa);
        self
    }

    pub fn t_c(mut self, t_c: Real) -> Self {
        self.insert_value(StateKey::Temperature, t_c);
        self
    }

    pub fn pressure(self, p: Pressure) -> Self {
        self.p_kpa(to_kpa(p))
    }

    pub fn temperature(self, t: Temperature) -> Self {
        self.t_c(to_degc(t))
    }

    pub fn x(mut self, x: Real) -> Self {
        self.insert_value(StateKey::Quality, x);
        self
    }

    pub fn with(mut self, prop: Property, value: Real) -> Self {
        self.insert_value(StateKey::Prop(prop), value);
        self
    }

    /// Insert a numeric value under a text key.
    pub fn insert(&mut self, key: &str, value: Real) {
        match StateKey::parse_input(key) {
            Some(k) => self.insert_value(k, value),
            None => self.ignored.push(IgnoredInput::Unsupported(key.to_string())),
        }
    }

    /// Insert a value parsed from text, with optional unit.
    pub fn insert_text(&mut self, key: &str, text: &str) {
        let Some(k) = StateKey::parse_input(key) else {
            self.ignored.push(IgnoredInput::Unsupported(key.to_string()));
            return;
        };
        match parse_quantity(text, k.quantity()) {
            Ok(value) => self.insert_value(k, value),
            Err(err) => {
                debug!(key, text, error = %err, "rejecting state input");
                self.ignored.push(IgnoredInput::NonNumeric(key.to_string()));
            }
        }
    }

    fn insert_value(&mut self, key: StateKey, value: Real) {
        if value.is_finite() {
            self.values.set(key, value);
        } else {
            self.ignored.push(IgnoredInput::NonNumeric(key.name().to_string()));
        }
    }

    pub fn values(&self) -> &StateValues {
        &self.values
    }

    pub fn ignored(&self) -> &[IgnoredInput] {
        &self.ignored
    }

    /// First known specific property in v, u, h, s order.
    pub fn first_property(&self) -> Option<(Property, Real)> {
        Property::ALL
            .into_iter()
            .find_map(|p| self.values.property(p).map(|v| (p, v)))
    }
}

/// How far the solver got.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StateOutcome {
    Resolved { region: Region },
    Unsolved { region: Region, needs: Vec<String> },
}

impl StateOutcome {
    pub fn region(&self) -> Region {
        match self {
            Self::Resolved { region } | Self::Unsolved { region, .. } => *region,
        }
    }

    pub fn needs(&self) -> &[String] {
        match self {
            Self::Resolved { .. } => &[],
            Self::Unsolved { needs, .. } => needs,
        }
    }
}

/// Result of one solver call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateRecord {
    pub known: StateValues,
    pub outcome: StateOutcome,
    pub computed: StateValues,
    /// Saturation context, present on two-phase paths only.
    pub sat: Option<SaturationProps>,
    pub units: BTreeMap<&'static str, &'static str>,
    pub notes: Vec<String>,
}

impl StateRecord {
    pub fn region(&self) -> Region {
        self.outcome.region()
    }

    pub fn needs(&self) -> &[String] {
        self.outcome.needs()
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.outcome, StateOutcome::Resolved { .. })
    }

    /// Value of `key`, computed first, then known.
    pub fn value(&self, key: StateKey) -> Option<Real> {
        self.computed.get(key).or_else(|| self.known.get(key))
    }
}

/// Unit of every key a record can carry.
pub fn state_units() -> BTreeMap<&'static str, &'static str> {
    let mut units: BTreeMap<_, _> = StateKey::ALL
        .into_iter()
        .map(|k| (k.name(), k.unit()))
        .collect();
    for col in SatColumn::ALL {
        units.insert(col.name(), col.property().unit());
    }
    units
}

/// Record under construction.
struct Draft {
    known: StateValues,
    region: Region,
    needs: Option<Vec<String>>,
    computed: StateValues,
    sat: Option<SaturationProps>,
    notes: Vec<String>,
}

impl Draft {
    fn new(known: &KnownInputs) -> Self {
        Self {
            known: known.values,
            region: Region::Unknown,
            needs: None,
            computed: StateValues::default(),
            sat: None,
            notes: known.ignored.iter().map(IgnoredInput::note).collect(),
        }
    }

    fn need(&mut self, what: &str) {
        self.needs = Some(vec![what.to_string()]);
    }

    /// Blend at `x`, or mark the state unknown when `x` is out of range.
    fn apply_quality(&mut self, sat: &SaturationProps, x: Real) -> SteamResult<bool> {
        if !is_unit_fraction(x) {
            self.region = Region::Unknown;
            self.computed.x = Some(x);
            self.notes.push(NOTE_X_RANGE.to_string());
            return Ok(false);
        }
        let mixture = quality::blend(sat, x)?;
        self.computed.set_mixture(&mixture);
        self.region = Region::TwoPhase;
        Ok(true)
    }

    fn from_pressure_temperature(
        &mut self,
        steam: &Steam,
        p_kpa: Real,
        t_c: Real,
        x: Option<Real>,
        first: Option<(Property, Real)>,
    ) -> SteamResult<()> {
        let region = steam.region(p_kpa, t_c)?;
        self.region = region;
        if region != Region::TwoPhase {
            for prop in Property::ALL {
                let value = steam.resolve(region, prop, p_kpa, t_c)?;
                self.computed.set(StateKey::Prop(prop), value);
            }
            return Ok(());
        }

        let sat = steam.sat_p(p_kpa)?;
        self.sat = Some(sat);
        self.computed.tsat_c = Some(sat.t_c);

        if let Some(x) = x {
            if !self.apply_quality(&sat, x)? {
                self.need(NEED_X_IN_RANGE);
            }
            return Ok(());
        }

        if let Some((prop, value)) = first {
            let x = quality::x_from(&sat, prop, value)?;
            if !is_unit_fraction(x) {
                self.region = Region::Unknown;
                self.computed.x = Some(x);
                self.need(NEED_CONSISTENT_PROPERTY);
                self.notes.push(format!(
                    "Provided {prop} with P_kPa,T_C does not map to saturated mixture (x outside [0,1])."
                ));
                return Ok(());
            }
            self.apply_quality(&sat, x)?;
            return Ok(());
        }

        self.need(NEED_X_OR_PROPERTY);
        self.notes.push(NOTE_AT_BOUNDARY.to_string());
        Ok(())
    }

    fn from_temperature_quality(&mut self, steam: &Steam, t_c: Real, x: Real) -> SteamResult<()> {
        let sat = steam.sat_t(t_c)?;
        self.sat = Some(sat);
        self.computed.p_kpa = Some(sat.p_kpa);
        if !self.apply_quality(&sat, x)? {
            self.need(NEED_X_IN_RANGE);
        }
        Ok(())
    }

    fn from_pressure_quality(&mut self, steam: &Steam, p_kpa: Real, x: Real) -> SteamResult<()> {
        let sat = steam.sat_p(p_kpa)?;
        self.sat = Some(sat);
        self.computed.t_c = Some(sat.t_c);
        if !self.apply_quality(&sat, x)? {
            self.need(NEED_X_IN_RANGE);
        }
        Ok(())
    }

    /// Cases D and E: invert a specific property at a saturation point.
    fn from_saturation_property(
        &mut self,
        sat: SaturationProps,
        prop: Property,
        value: Real,
        missing: &str,
        note: &str,
    ) -> SteamResult<()> {
        self.sat = Some(sat);
        let x = quality::x_from(&sat, prop, value)?;
        self.computed.x = Some(x);
        if !is_unit_fraction(x) {
            self.region = Region::Unknown;
            self.need(missing);
            self.notes.push(note.to_string());
            return Ok(());
        }
        self.region = Region::TwoPhase;
        let mixture = quality::blend(&sat, x)?;
        self.computed.set_mixture(&mixture);
        Ok(())
    }

    /// Drop partial results and report `err` against `inputs`.
    fn fail(&mut self, inputs: &str, err: &SteamError) {
        self.region = Region::Unknown;
        self.computed = StateValues::default();
        self.needs = Some(default_needs());
        self.notes.push(format!("Could not solve from {inputs}: {err}"));
    }

    fn finish(self) -> StateRecord {
        let outcome = match (self.region, self.needs) {
            (region, Some(needs)) => StateOutcome::Unsolved { region, needs },
            (Region::Unknown, None) => StateOutcome::Unsolved {
                region: Region::Unknown,
                needs: default_needs(),
            },
            (region, None) => StateOutcome::Resolved { region },
        };
        StateRecord {
            known: self.known,
            outcome,
            computed: self.computed,
            sat: self.sat,
            units: state_units(),
            notes: self.notes,
        }
    }
}

/// Resolve a state from whatever `known` provides.
pub(crate) fn solve(steam: &Steam, known: &KnownInputs) -> StateRecord {
    let mut draft = Draft::new(known);
    let k = known.values();
    let first = known.first_property();

    let (inputs, result) = if let (Some(p), Some(t)) = (k.p_kpa, k.t_c) {
        let r = draft.from_pressure_temperature(steam, p, t, k.x, first);
        ("P_kPa,T_C".to_string(), r)
    } else if let (Some(t), Some(x)) = (k.t_c, k.x) {
        ("T_C,x".to_string(), draft.from_temperature_quality(steam, t, x))
    } else if let (Some(p), Some(x)) = (k.p_kpa, k.x) {
        ("P_kPa,x".to_string(), draft.from_pressure_quality(steam, p, x))
    } else if let (Some(p), Some((prop, value))) = (k.p_kpa, first) {
        let r = steam.sat_p(p).and_then(|sat| {
            draft.computed.t_c = Some(sat.t_c);
            draft.from_saturation_property(
                sat,
                prop,
                value,
                NEED_T,
                "Computed x is outside [0,1]; not a saturated mixture at this P_kPa. Provide T_C.",
            )
        });
        (format!("P_kPa and {prop}"), r)
    } else if let (Some(t), Some((prop, value))) = (k.t_c, first) {
        let r = steam.sat_t(t).and_then(|sat| {
            draft.computed.p_kpa = Some(sat.p_kpa);
            draft.from_saturation_property(
                sat,
                prop,
                value,
                NEED_P,
                "Computed x is outside [0,1]; not a saturated mixture at this T_C. Provide P_kPa.",
            )
        });
        (format!("T_C and {prop}"), r)
    } else {
        draft.region = Region::Unknown;
        draft.needs = Some(default_needs());
        let note = if k.is_empty() {
            NOTE_NOTHING_USABLE
        } else {
            NOTE_INSUFFICIENT
        };
        draft.notes.push(note.to_string());
        return draft.finish();
    };

    debug!(inputs = %inputs, ok = result.is_ok(), "solved steam state");
    if let Err(err) = result {
        draft.fail(&inputs, &err);
    }
    draft.finish()
}

/// Record for a solve that could not start, e.g. because tables are unavailable.
pub(crate) fn unavailable(known: &KnownInputs, err: &SteamError) -> StateRecord {
    let mut draft = Draft::new(known);
    draft.fail("provided inputs", err);
    draft.finish()
}
