//! Metal identifiers, permissible limits, and the open concentration record

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// The eight heavy metals the engine recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metal {
    Lead,
    Mercury,
    Cadmium,
    Arsenic,
    Chromium,
    Copper,
    Zinc,
    Nickel,
}

impl Metal {
    /// All metals in canonical order
    pub const ALL: [Metal; 8] = [
        Metal::Lead,
        Metal::Mercury,
        Metal::Cadmium,
        Metal::Arsenic,
        Metal::Chromium,
        Metal::Copper,
        Metal::Zinc,
        Metal::Nickel,
    ];

    /// Key used in concentration records and reports
    pub const fn as_str(self) -> &'static str {
        match self {
            Metal::Lead => "lead",
            Metal::Mercury => "mercury",
            Metal::Cadmium => "cadmium",
            Metal::Arsenic => "arsenic",
            Metal::Chromium => "chromium",
            Metal::Copper => "copper",
            Metal::Zinc => "zinc",
            Metal::Nickel => "nickel",
        }
    }

    /// WHO/EPA permissible limit in mg/L
    pub const fn permissible_limit(self) -> f64 {
        match self {
            Metal::Lead => 0.01,
            Metal::Mercury => 0.006,
            Metal::Cadmium => 0.003,
            Metal::Arsenic => 0.01,
            Metal::Chromium => 0.05,
            Metal::Copper => 2.0,
            Metal::Zinc => 3.0,
            Metal::Nickel => 0.07,
        }
    }

    /// Relative importance in the HPI weighted average
    pub const fn hpi_weight(self) -> u32 {
        match self {
            Metal::Lead | Metal::Mercury | Metal::Cadmium | Metal::Arsenic => 5,
            Metal::Chromium | Metal::Nickel => 4,
            Metal::Copper => 3,
            Metal::Zinc => 2,
        }
    }
}

impl std::fmt::Display for Metal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metal {
    type Err = String;

    /// Case-sensitive: only the lower-case identifiers are recognized
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metal::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown metal '{}'", s))
    }
}

/// Concentrations (mg/L) keyed by metal identifier.
///
/// Open mapping: keys the engine does not recognize are carried along
/// untouched and skipped by every formula. A missing metal reads as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetalConcentrations(BTreeMap<String, f64>);

impl MetalConcentrations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    /// Raw value stored under `key`, recognized or not
    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    /// Concentration of a recognized metal (0 when absent)
    pub fn concentration(&self, metal: Metal) -> f64 {
        self.get(metal.as_str()).unwrap_or(0.0)
    }

    /// Recognized metals in canonical order, absent ones reading as 0
    pub fn recognized(&self) -> impl Iterator<Item = (Metal, f64)> + '_ {
        Metal::ALL.into_iter().map(move |m| (m, self.concentration(m)))
    }

    /// Keys the engine ignores
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| k.parse::<Metal>().is_err())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for MetalConcentrations {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
