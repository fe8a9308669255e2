//! Health-risk classification

use serde::{Deserialize, Serialize};

/// Health risk levels, ordered from least to most severe.
///
/// Serialized and displayed with exactly these capitalized names; dashboard
/// consumers match on them case-sensitively.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum RiskLevel {
    #[default]
    Minimal,
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Minimal => "Minimal",
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exclusive lower bounds `(hpi, hei, cd)` for one level
struct Thresholds {
    level: RiskLevel,
    hpi: f64,
    hei: f64,
    cd: f64,
}

/// Checked in order; the first row with any index strictly above its bound wins.
const LADDER: [Thresholds; 4] = [
    Thresholds { level: RiskLevel::Critical, hpi: 100.0, hei: 40.0, cd: 20.0 },
    Thresholds { level: RiskLevel::High, hpi: 45.0, hei: 20.0, cd: 10.0 },
    Thresholds { level: RiskLevel::Moderate, hpi: 30.0, hei: 10.0, cd: 5.0 },
    Thresholds { level: RiskLevel::Low, hpi: 15.0, hei: 5.0, cd: 2.0 },
];

/// Classify a sample from its three indices
pub fn classify_risk(hpi: f64, hei: f64, cd: f64) -> RiskLevel {
    LADDER
        .iter()
        .find(|t| hpi > t.hpi || hei > t.hei || cd > t.cd)
        .map(|t| t.level)
        .unwrap_or(RiskLevel::Minimal)
}
