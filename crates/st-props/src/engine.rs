//! The steam-property engine.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use st_core::{CoreError, Real, ensure_finite};
use st_core::units::{Pressure, Temperature, to_degc, to_kpa};
use st_tables::{Precision, Property, SaturationTable, TableSet};
use tracing::debug;

use crate::error::SteamResult;
use crate::property;
use crate::quality;
use crate::region::{self, Region, SAT_BAND_C};
use crate::saturation::{self, SaturationProps};
use crate::state::{self, KnownInputs, StateRecord};

/// Tunables of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Half-width of the two-phase band around the saturation temperature [°C].
    pub saturation_band_c: Real,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            saturation_band_c: SAT_BAND_C,
        }
    }
}

impl EngineOptions {
    pub fn validate(&self) -> SteamResult<()> {
        let band = ensure_finite(self.saturation_band_c, "saturation_band_c")?;
        if band < 0.0 {
            return Err(CoreError::InvalidArg {
                what: "saturation_band_c must be non-negative",
            }
            .into());
        }
        Ok(())
    }
}

/// Property lookups over one table set.
///
/// All inputs and outputs are in table units: kPa, °C, m³/kg, kJ/kg and
/// kJ/(kg·K).
#[derive(Debug, Clone)]
pub struct Steam {
    tables: TableSet,
    options: EngineOptions,
    /// Pressure-driven projection of `sat_t`, built on first use when the
    /// table set has no usable pressure-driven table.
    sat_p_fallback: OnceLock<SaturationTable>,
}

impl Steam {
    pub fn new(tables: TableSet) -> Self {
        Self {
            tables,
            options: EngineOptions::default(),
            sat_p_fallback: OnceLock::new(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> SteamResult<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    /// Engine over the compiled-in reference dataset.
    pub fn from_builtin() -> SteamResult<Self> {
        let (tables, report) = TableSet::builtin()?;
        debug!(
            sat_t = report.sat_t.rows_parsed,
            sat_p = report.sat_p.rows_parsed,
            superheated = report.superheated.rows_parsed,
            compressed = report.compressed.rows_parsed,
            "loaded built-in steam tables"
        );
        Ok(Self::new(tables))
    }

    pub fn tables(&self) -> &TableSet {
        &self.tables
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn precision(&self) -> &Precision {
        &self.tables.precision
    }

    pub fn saturation_by_temperature(&self) -> &SaturationTable {
        &self.tables.sat_t
    }

    /// Pressure-driven saturation table, or the cached fallback.
    pub fn saturation_by_pressure(&self) -> &SaturationTable {
        match &self.tables.sat_p {
            Some(table) if table.len() >= 2 => table,
            _ => self
                .sat_p_fallback
                .get_or_init(|| saturation::pressure_projection(&self.tables.sat_t)),
        }
    }

    /// True when pressure queries read the fallback projection.
    pub fn uses_pressure_fallback(&self) -> bool {
        !matches!(&self.tables.sat_p, Some(table) if table.len() >= 2)
    }

    /// Saturation properties at `t_c` [°C].
    pub fn sat_t(&self, t_c: Real) -> SteamResult<SaturationProps> {
        saturation::lookup(self.saturation_by_temperature(), t_c)
    }

    /// Saturation properties at `p_kpa` [kPa].
    pub fn sat_p(&self, p_kpa: Real) -> SteamResult<SaturationProps> {
        saturation::lookup(self.saturation_by_pressure(), p_kpa)
    }

    /// Saturation pressure [kPa] at `t_c`.
    pub fn psat_t(&self, t_c: Real) -> SteamResult<Real> {
        saturation::pressure_at(self.saturation_by_temperature(), t_c)
    }

    /// Saturation temperature [°C] at `p_kpa`.
    pub fn tsat_p(&self, p_kpa: Real) -> SteamResult<Real> {
        saturation::temperature_at(self.saturation_by_pressure(), p_kpa)
    }

    pub fn region(&self, p_kpa: Real, t_c: Real) -> SteamResult<Region> {
        let tsat = self.tsat_p(p_kpa)?;
        Ok(region::classify(t_c, tsat, self.options.saturation_band_c))
    }

    /// Region for uom-typed inputs.
    pub fn region_at(&self, p: Pressure, t: Temperature) -> SteamResult<Region> {
        self.region(to_kpa(p), to_degc(t))
    }

    /// `prop` at `(p_kpa, t_c)`; saturated vapor inside the two-phase band.
    pub fn property(&self, prop: Property, p_kpa: Real, t_c: Real) -> SteamResult<Real> {
        let region = self.region(p_kpa, t_c)?;
        self.resolve(region, prop, p_kpa, t_c)
    }

    pub(crate) fn resolve(
        &self,
        region: Region,
        prop: Property,
        p_kpa: Real,
        t_c: Real,
    ) -> SteamResult<Real> {
        property::resolve(
            &self.tables,
            self.saturation_by_pressure(),
            region,
            prop,
            p_kpa,
            t_c,
        )
    }

    pub fn v_pt(&self, p_kpa: Real, t_c: Real) -> SteamResult<Real> {
        self.property(Property::V, p_kpa, t_c)
    }

    pub fn u_pt(&self, p_kpa: Real, t_c: Real) -> SteamResult<Real> {
        self.property(Property::U, p_kpa, t_c)
    }

    pub fn h_pt(&self, p_kpa: Real, t_c: Real) -> SteamResult<Real> {
        self.property(Property::H, p_kpa, t_c)
    }

    pub fn s_pt(&self, p_kpa: Real, t_c: Real) -> SteamResult<Real> {
        self.property(Property::S, p_kpa, t_c)
    }

    /// Two-phase mixture value of `prop` at temperature `t_c` and quality `x`.
    pub fn property_tx(&self, prop: Property, t_c: Real, x: Real) -> SteamResult<Real> {
        let sat = self.sat_t(t_c)?;
        quality::mix(sat.liquid(prop), sat.vapor(prop), x)
    }

    pub fn v_tx(&self, t_c: Real, x: Real) -> SteamResult<Real> {
        self.property_tx(Property::V, t_c, x)
    }

    pub fn u_tx(&self, t_c: Real, x: Real) -> SteamResult<Real> {
        self.property_tx(Property::U, t_c, x)
    }

    pub fn h_tx(&self, t_c: Real, x: Real) -> SteamResult<Real> {
        self.property_tx(Property::H, t_c, x)
    }

    pub fn s_tx(&self, t_c: Real, x: Real) -> SteamResult<Real> {
        self.property_tx(Property::S, t_c, x)
    }

    /// Solve a state from partial inputs. Never fails; see [`StateRecord`].
    pub fn state(&self, known: &KnownInputs) -> StateRecord {
        state::solve(self, known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SteamError;
    use st_tables::{RegionKind, RegionRow, RegionTable, SatAxis, SaturationRow};

    fn tiny() -> TableSet {
        let sat_t = SaturationTable::from_rows(
            vec![
                SaturationRow::from_values([
                    100.0, 101.35, 0.001044, 1.6729, 418.94, 2506.5, 419.04, 2676.1, 1.3069, 7.3549,
                ]),
                SaturationRow::from_values([
                    120.0, 198.53, 0.00106, 0.8919, 503.5, 2529.3, 503.71, 2706.3, 1.5276, 7.1296,
                ]),
            ],
            SatAxis::Temperature,
        );
        let sh = RegionTable::from_rows(
            RegionKind::Superheated,
            vec![
                RegionRow::from_values([100.0, 150.0, 1.9364, 2582.8, 2776.4, 7.6134]),
                RegionRow::from_values([100.0, 200.0, 2.172, 2658.1, 2875.3, 7.8343]),
            ],
        );
        let comp = RegionTable::from_rows(
            RegionKind::Compressed,
            vec![
                RegionRow::from_values([5000.0, 20.0, 0.0009995, 83.65, 88.65, 0.2956]),
                RegionRow::from_values([5000.0, 40.0, 0.0010056, 166.95, 171.97, 0.5705]),
            ],
        );
        TableSet::new(sat_t, None, sh, comp)
    }

    #[test]
    fn fallback_is_used_without_pressure_table() {
        let steam = Steam::new(tiny());
        assert!(steam.uses_pressure_fallback());
        assert_eq!(steam.saturation_by_pressure().driver(), SatAxis::Pressure);
        assert!((steam.tsat_p(101.35).unwrap() - 100.0).abs() < 1e-12);
        // Same cached instance on every call.
        assert!(std::ptr::eq(
            steam.saturation_by_pressure(),
            steam.saturation_by_pressure()
        ));
    }

    #[test]
    fn short_pressure_table_falls_back() {
        let mut tables = tiny();
        let one_row = SaturationTable::from_rows(
            tables.sat_t.rows().take(1).collect(),
            SatAxis::Pressure,
        );
        tables.sat_p = Some(one_row);
        let steam = Steam::new(tables);
        assert!(steam.uses_pressure_fallback());
        assert_eq!(steam.saturation_by_pressure().len(), 2);
    }

    #[test]
    fn band_option_widens_two_phase() {
        let steam = Steam::new(tiny());
        assert_eq!(steam.region(101.35, 101.0).unwrap(), Region::Superheated);
        let wide = steam
            .with_options(EngineOptions {
                saturation_band_c: 2.0,
            })
            .unwrap();
        assert_eq!(wide.region(101.35, 101.0).unwrap(), Region::TwoPhase);
    }

    #[test]
    fn region_accepts_uom_quantities() {
        use st_core::units::{degc, kpa};

        let steam = Steam::new(tiny());
        assert_eq!(steam.region_at(kpa(101.35), degc(100.0)).unwrap(), Region::TwoPhase);
        assert_eq!(steam.region_at(kpa(101.35), degc(150.0)).unwrap(), Region::Superheated);
        assert_eq!(steam.region_at(kpa(101.35), degc(20.0)).unwrap(), Region::Compressed);
        assert_eq!(
            steam.region_at(kpa(198.53), degc(120.0)).unwrap(),
            steam.region(198.53, 120.0).unwrap()
        );
    }

    #[test]
    fn rejects_bad_band() {
        let err = Steam::new(tiny())
            .with_options(EngineOptions {
                saturation_band_c: -1.0,
            })
            .unwrap_err();
        assert!(matches!(err, SteamError::Core(CoreError::InvalidArg { .. })));

        let err = Steam::new(tiny())
            .with_options(EngineOptions {
                saturation_band_c: Real::NAN,
            })
            .unwrap_err();
        assert!(matches!(err, SteamError::Core(CoreError::NonFinite { .. })));
    }

    #[test]
    fn two_phase_property_is_saturated_vapor() {
        let steam = Steam::new(tiny());
        assert_eq!(steam.h_pt(101.35, 100.0).unwrap(), 2676.1);
        assert_eq!(steam.v_pt(101.35, 100.1).unwrap(), 1.6729);
    }

    #[test]
    fn options_from_json_default_missing_fields() {
        let opts: EngineOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, EngineOptions::default());
    }
}
