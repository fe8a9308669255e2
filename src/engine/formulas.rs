//! Index formulas
//!
//! All three operate on raw (unrounded) values and never fail; input
//! validation happens in [`super::IndexEngine`] before they run.

use super::metals::MetalConcentrations;

/// Heavy Metal Pollution Index: weighted mean of `Qi = c / limit × 100`
/// over the metals actually present (positive concentration).
///
/// Returns 0 when no metal contributes any weight.
pub fn compute_hpi(metals: &MetalConcentrations) -> f64 {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for (metal, concentration) in metals.recognized() {
        // Zero and absent are the same sample
        if concentration == 0.0 {
            continue;
        }
        let qi = (concentration / metal.permissible_limit()) * 100.0;
        let weight = f64::from(metal.hpi_weight());
        weighted_sum += weight * qi;
        total_weight += weight;
    }

    if total_weight > 0.0 {
        weighted_sum / total_weight
    } else {
        0.0
    }
}

/// Heavy Metal Evaluation Index: unweighted sum of `c / limit`
pub fn compute_hei(metals: &MetalConcentrations) -> f64 {
    metals
        .recognized()
        .map(|(metal, concentration)| concentration / metal.permissible_limit())
        .sum()
}

/// Contamination degree: sum of `c / limit` over the metals present.
///
/// Numerically the same as [`compute_hei`].
pub fn compute_cd(metals: &MetalConcentrations) -> f64 {
    let mut sum = 0.0;
    let mut contributing = 0usize;

    for (metal, concentration) in metals.recognized() {
        if concentration == 0.0 {
            continue;
        }
        sum += concentration / metal.permissible_limit();
        contributing += 1;
    }

    if contributing > 0 {
        sum
    } else {
        0.0
    }
}
