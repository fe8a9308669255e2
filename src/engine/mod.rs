//! Pollution index engine
//!
//! Turns the metal concentrations of one water sample into three indices
//! and a health-risk level. Pure and stateless: every call is independent
//! and safe to run from any number of threads.
//!
//! # Formulas
//!
//! ```text
//! Qi  = c_i / limit_i × 100
//! HPI = Σ w_i × Qi / Σ w_i        (metals with c_i > 0)
//! HEI = Σ c_i / limit_i
//! Cd  = Σ c_i / limit_i
//! ```
//!
//! A metal at 0 carries no HPI weight, so raising one from 0 can lower HPI
//! (its Qi may sit below the current mean). HPI is monotone only among
//! metals already present; HEI and Cd are monotone from zero.
//!
//! Each index is rounded to 2 decimal places (half away from zero) and the
//! rounded triple is classified:
//!
//! | Level    | hpi >  | hei >  | cd >  |
//! |----------|--------|--------|-------|
//! | Critical | 100    | 40     | 20    |
//! | High     | 45     | 20     | 10    |
//! | Moderate | 30     | 10     | 5     |
//! | Low      | 15     | 5      | 2     |
//! | Minimal  | otherwise                |
//!
//! # Example
//!
//! ```
//! use hmpi::engine::{compute_indices, MetalConcentrations, RiskLevel};
//!
//! let metals = MetalConcentrations::new().with("lead", 0.02);
//! let result = compute_indices(&metals).unwrap();
//! assert_eq!(result.hpi, 200.0);
//! assert_eq!(result.health_risk, RiskLevel::Critical);
//! ```

mod formulas;
mod metals;
mod risk;

pub use formulas::{compute_cd, compute_hei, compute_hpi};
pub use metals::{Metal, MetalConcentrations};
pub use risk::{classify_risk, RiskLevel};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while evaluating a sample
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid {metal} concentration: {value} (must be a finite, non-negative mg/L value)")]
    InvalidConcentration { metal: Metal, value: f64 },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// What to do with a recognized metal whose concentration is out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Negative, NaN and infinite values are errors (default)
    #[default]
    Reject,
    /// Negative values count as 0; NaN and infinite are still errors
    #[serde(alias = "clamp-to-zero", alias = "clamp_to_zero")]
    Clamp,
}

impl std::fmt::Display for InputPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputPolicy::Reject => write!(f, "reject"),
            InputPolicy::Clamp => write!(f, "clamp"),
        }
    }
}

/// Indices for one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct IndexResult {
    pub hpi: f64,
    pub hei: f64,
    pub cd: f64,
    pub health_risk: RiskLevel,
}

/// Round to 2 decimal places, half away from zero
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Index engine configured with an input policy
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexEngine {
    policy: InputPolicy,
}

impl IndexEngine {
    pub fn new(policy: InputPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Validate, compute, round, classify
    pub fn compute(&self, metals: &MetalConcentrations) -> EngineResult<IndexResult> {
        let sanitized = self.sanitize(metals)?;
        let metals = sanitized.as_ref().unwrap_or(metals);

        let hpi = round_2dp(compute_hpi(metals));
        let hei = round_2dp(compute_hei(metals));
        let cd = round_2dp(compute_cd(metals));
        let health_risk = classify_risk(hpi, hei, cd);

        debug!(
            "Indices: hpi={:.2}, hei={:.2}, cd={:.2} -> {}",
            hpi, hei, cd, health_risk
        );

        Ok(IndexResult {
            hpi,
            hei,
            cd,
            health_risk,
        })
    }

    /// The record the indices are computed on: `metals` with the policy
    /// applied (negatives zeroed under [`InputPolicy::Clamp`]).
    pub fn apply_policy(&self, metals: MetalConcentrations) -> EngineResult<MetalConcentrations> {
        Ok(self.sanitize(&metals)?.unwrap_or(metals))
    }

    /// Check recognized metals against the policy.
    ///
    /// Returns a clamped copy only when something had to change.
    fn sanitize(&self, metals: &MetalConcentrations) -> EngineResult<Option<MetalConcentrations>> {
        let mut clamped: Option<MetalConcentrations> = None;

        for (metal, value) in metals.recognized() {
            if !value.is_finite() {
                return Err(EngineError::InvalidConcentration { metal, value });
            }
            if value < 0.0 {
                match self.policy {
                    InputPolicy::Reject => {
                        return Err(EngineError::InvalidConcentration { metal, value });
                    }
                    InputPolicy::Clamp => {
                        warn!("Clamping negative {} concentration {} to 0", metal, value);
                        clamped
                            .get_or_insert_with(|| metals.clone())
                            .insert(metal.as_str(), 0.0);
                    }
                }
            }
        }

        Ok(clamped)
    }
}

/// Compute indices with the default (rejecting) engine
pub fn compute_indices(metals: &MetalConcentrations) -> EngineResult<IndexResult> {
    IndexEngine::default().compute(metals)
}
