//! Core data models for water-quality samples
//!
//! These are the records exchanged with collaborators: a sample as it
//! arrives (location, date, raw concentrations) and a measurement as it
//! would be stored (the sample plus its computed indices).

use crate::engine::{EngineResult, IndexEngine, IndexResult, MetalConcentrations};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A monitoring location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Location {
    pub name: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Identity used when grouping samples by location.
    ///
    /// Two locations are the same site when name and coordinates match.
    pub fn key(&self) -> LocationKey {
        LocationKey {
            name: self.name.clone(),
            latitude_bits: self.latitude.to_bits(),
            longitude_bits: self.longitude.to_bits(),
        }
    }
}

/// Hashable, ordered identity of a [`Location`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationKey {
    name: String,
    latitude_bits: u64,
    longitude_bits: u64,
}

/// A raw water sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub location: Location,
    pub sample_date: NaiveDate,
    #[serde(default)]
    pub metals: MetalConcentrations,
}

impl Sample {
    pub fn new(location: Location, sample_date: NaiveDate, metals: MetalConcentrations) -> Self {
        Self {
            location,
            sample_date,
            metals,
        }
    }
}

/// A sample together with its computed indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub sample: Sample,
    pub indices: IndexResult,
}

impl Measurement {
    /// Run the engine over a sample.
    ///
    /// The stored concentrations are the ones the indices were computed
    /// on, so a clamped reading is kept as 0.
    pub fn evaluate(engine: &IndexEngine, mut sample: Sample) -> EngineResult<Self> {
        sample.metals = engine.apply_policy(sample.metals)?;
        let indices = engine.compute(&sample.metals)?;
        Ok(Self { sample, indices })
    }

    pub fn location(&self) -> &Location {
        &self.sample.location
    }

    pub fn date(&self) -> NaiveDate {
        self.sample.sample_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{InputPolicy, RiskLevel};

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    #[test]
    fn test_location_key_groups_same_site() {
        let a = Location::new("Yamuna Ghat", 28.61, 77.23);
        let b = Location::new("Yamuna Ghat", 28.61, 77.23);
        let c = Location::new("Yamuna Ghat", 28.62, 77.23);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
    }

    #[test]
    fn test_evaluate_attaches_indices() {
        let sample = Sample::new(
            Location::new("Well 4", 12.9, 77.5),
            date("2024-03-01"),
            MetalConcentrations::new().with("lead", 0.02),
        );
        let m = Measurement::evaluate(&IndexEngine::default(), sample).expect("evaluate");
        assert_eq!(m.indices.hpi, 200.0);
        assert_eq!(m.indices.health_risk, RiskLevel::Critical);
        assert_eq!(m.location().name, "Well 4");
        assert_eq!(m.date(), date("2024-03-01"));
    }

    #[test]
    fn test_evaluate_propagates_invalid_input() {
        let sample = Sample::new(
            Location::new("Well 4", 0.0, 0.0),
            date("2024-03-01"),
            MetalConcentrations::new().with("zinc", -1.0),
        );
        assert!(Measurement::evaluate(&IndexEngine::new(InputPolicy::Reject), sample).is_err());
    }

    #[test]
    fn test_evaluate_stores_clamped_metals() {
        let sample = Sample::new(
            Location::new("Well 4", 0.0, 0.0),
            date("2024-03-01"),
            MetalConcentrations::new().with("lead", -5.0).with("copper", 1.0),
        );
        let m = Measurement::evaluate(&IndexEngine::new(InputPolicy::Clamp), sample)
            .expect("clamped evaluate");
        assert_eq!(m.sample.metals.get("lead"), Some(0.0));
        assert_eq!(m.sample.metals.get("copper"), Some(1.0));
        assert_eq!(m.indices.hpi, 50.0);
    }

    #[test]
    fn test_sample_json() {
        let json = r#"{
            "location": {"name": "Canal Bridge", "latitude": 23.0, "longitude": 72.5},
            "sampleDate": "2024-05-17",
            "metals": {"lead": 0.004, "copper": 0.3}
        }"#;
        let sample: Sample = serde_json::from_str(json).expect("parse sample");
        assert_eq!(sample.location.name, "Canal Bridge");
        assert_eq!(sample.sample_date, date("2024-05-17"));
        assert_eq!(sample.metals.get("copper"), Some(0.3));
    }

    #[test]
    fn test_sample_without_metals() {
        let json = r#"{"location": {"name": "Dry Well"}, "sampleDate": "2024-01-01"}"#;
        let sample: Sample = serde_json::from_str(json).expect("parse sample");
        assert!(sample.metals.is_empty());
        assert_eq!(sample.location.latitude, 0.0);
    }
}
