//! Display precision metadata.
//!
//! Recommended number of decimals per property name, derived from the
//! reference data. It is advisory: lookups never round.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Keys a finalized precision map may carry, in display order.
const KEYS: [&str; 15] = [
    "P_kPa", "T_C", "v", "u", "h", "s", "x", "vf", "vg", "uf", "ug", "hf", "hg", "sf", "sg",
];

/// Decimals per property name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Precision(BTreeMap<String, u32>);

impl Precision {
    /// Finalize raw per-column decimals into the display map.
    ///
    /// Each primary key takes its own raw value (or a default when absent)
    /// raised to the widest of its related saturation columns. Quality is
    /// clamped into `[4, 6]`. Keys outside the known set are dropped.
    pub fn finalize(raw: &BTreeMap<String, u32>) -> Self {
        let get = |k: &str| raw.get(k).copied();
        let widest = |own: u32, related: &[&str]| {
            related
                .iter()
                .filter_map(|k| get(*k))
                .fold(own, u32::max)
        };

        let mut out: BTreeMap<String, u32> = raw
            .iter()
            .filter(|(k, _)| KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), *v))
            .collect();

        out.insert("P_kPa".into(), widest(get("P_kPa").unwrap_or(2), &["P"]));
        out.insert("T_C".into(), widest(get("T_C").unwrap_or(2), &["T"]));
        out.insert("v".into(), widest(get("v").unwrap_or(6), &["vf", "vg"]));
        out.insert("u".into(), widest(get("u").unwrap_or(2), &["uf", "ug"]));
        out.insert("h".into(), widest(get("h").unwrap_or(2), &["hf", "hg"]));
        out.insert("s".into(), widest(get("s").unwrap_or(4), &["sf", "sg"]));
        out.insert("x".into(), get("x").unwrap_or(6).clamp(4, 6));

        Self(out)
    }

    /// Decimals for `key`; `P`/`T` and `Tsat_C` resolve to their table keys.
    pub fn decimals(&self, key: &str) -> Option<u32> {
        let key = match key {
            "P" => "P_kPa",
            "T" | "Tsat_C" => "T_C",
            other => other,
        };
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self::finalize(&BTreeMap::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, u32)]) -> BTreeMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn defaults_cover_required_keys() {
        let p = Precision::default();
        for key in ["P_kPa", "T_C", "v", "u", "h", "s", "x"] {
            assert!(p.decimals(key).is_some(), "missing {key}");
        }
        assert_eq!(p.decimals("v"), Some(6));
        assert_eq!(p.decimals("x"), Some(6));
    }

    #[test]
    fn saturation_columns_widen_primary_keys() {
        let p = Precision::finalize(&raw(&[("vf", 7), ("vg", 4), ("hg", 1), ("P", 4)]));
        assert_eq!(p.decimals("v"), Some(7));
        assert_eq!(p.decimals("h"), Some(2));
        assert_eq!(p.decimals("P_kPa"), Some(4));
        assert_eq!(p.decimals("vf"), Some(7));
    }

    #[test]
    fn quality_is_clamped() {
        assert_eq!(Precision::finalize(&raw(&[("x", 1)])).decimals("x"), Some(4));
        assert_eq!(Precision::finalize(&raw(&[("x", 12)])).decimals("x"), Some(6));
    }

    #[test]
    fn aliases_and_unknown_keys() {
        let p = Precision::finalize(&raw(&[("T_C", 3), ("rho", 9)]));
        assert_eq!(p.decimals("T"), Some(3));
        assert_eq!(p.decimals("Tsat_C"), Some(3));
        assert_eq!(p.decimals("rho"), None);
    }
}
