//! Index engine contract tests
//!
//! Exercises the public engine API the way collaborators call it: raw
//! concentrations in, `{hpi, hei, cd, healthRisk}` out.

use hmpi::engine::{
    classify_risk, compute_cd, compute_hei, compute_hpi, compute_indices, IndexEngine,
    InputPolicy, Metal, MetalConcentrations, RiskLevel,
};

fn record(pairs: &[(&str, f64)]) -> MetalConcentrations {
    pairs.iter().copied().collect()
}

#[test]
fn empty_record_is_minimal() {
    let result = compute_indices(&MetalConcentrations::new()).expect("compute");
    assert_eq!(result.hpi, 0.0);
    assert_eq!(result.hei, 0.0);
    assert_eq!(result.cd, 0.0);
    assert_eq!(result.health_risk, RiskLevel::Minimal);
}

#[test]
fn lead_at_twice_limit_with_all_metals_listed() {
    let metals = record(&[
        ("lead", 0.02),
        ("mercury", 0.0),
        ("cadmium", 0.0),
        ("arsenic", 0.0),
        ("chromium", 0.0),
        ("copper", 0.0),
        ("zinc", 0.0),
        ("nickel", 0.0),
    ]);
    let result = compute_indices(&metals).expect("compute");
    assert_eq!(result.hpi, 200.0);
    assert_eq!(result.hei, 2.0);
    assert_eq!(result.cd, 2.0);
    assert_eq!(result.health_risk, RiskLevel::Critical);

    let json = serde_json::to_value(result).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!({"hpi": 200.0, "hei": 2.0, "cd": 2.0, "healthRisk": "Critical"})
    );
}

#[test]
fn every_metal_at_limit_gives_hpi_100() {
    for metal in Metal::ALL {
        let metals = record(&[(metal.as_str(), metal.permissible_limit())]);
        let result = compute_indices(&metals).expect("compute");
        assert_eq!(result.hpi, 100.0, "{metal}");
        assert_eq!(result.hei, 1.0, "{metal}");
    }
}

#[test]
fn hei_and_cd_agree() {
    let cases = [
        record(&[]),
        record(&[("lead", 0.003), ("nickel", 0.2)]),
        record(&[("cadmium", 0.05), ("arsenic", 0.5), ("chromium", 1.0)]),
        record(&[("copper", 3.3), ("unobtainium", 1.0)]),
    ];
    for metals in &cases {
        assert_eq!(compute_hei(metals), compute_cd(metals));
        let result = compute_indices(metals).expect("compute");
        assert_eq!(result.hei, result.cd);
    }
}

#[test]
fn raising_a_concentration_never_lowers_an_index() {
    let base = record(&[
        ("lead", 0.004),
        ("mercury", 0.001),
        ("cadmium", 0.002),
        ("arsenic", 0.006),
        ("chromium", 0.03),
        ("copper", 0.8),
        ("zinc", 2.0),
        ("nickel", 0.05),
    ]);
    let before = compute_indices(&base).expect("compute");

    for metal in Metal::ALL {
        let mut raised = base.clone();
        raised.insert(metal.as_str(), base.concentration(metal) * 1.5);
        let after = compute_indices(&raised).expect("compute");
        assert!(after.hpi >= before.hpi, "hpi fell raising {metal}");
        assert!(after.hei >= before.hei, "hei fell raising {metal}");
        assert!(after.cd >= before.cd, "cd fell raising {metal}");
        assert!(after.health_risk >= before.health_risk, "risk fell raising {metal}");
    }
}

#[test]
fn thresholds_are_strict() {
    assert_eq!(classify_risk(45.0, 0.0, 0.0), RiskLevel::Moderate);
    assert_eq!(classify_risk(45.01, 0.0, 0.0), RiskLevel::High);
    assert_eq!(classify_risk(100.0, 40.0, 20.0), RiskLevel::High);
    assert_eq!(classify_risk(0.0, 40.01, 0.0), RiskLevel::Critical);
    assert_eq!(classify_risk(15.0, 5.0, 2.0), RiskLevel::Minimal);
    assert_eq!(classify_risk(0.0, 0.0, 2.01), RiskLevel::Low);
}

#[test]
fn risk_is_a_function_of_the_returned_indices() {
    // Both round to hpi=45.00 even though the raw values straddle 45
    let below = compute_indices(&record(&[("lead", 0.004_499_9)])).expect("compute");
    let above = compute_indices(&record(&[("lead", 0.004_500_1)])).expect("compute");
    assert_eq!(below.hpi, above.hpi);
    assert_eq!(below.health_risk, above.health_risk);
}

#[test]
fn unknown_keys_are_ignored() {
    let plain = compute_indices(&record(&[("arsenic", 0.012), ("zinc", 0.3)])).expect("compute");
    let noisy = compute_indices(&record(&[
        ("arsenic", 0.012),
        ("zinc", 0.3),
        ("iron", 100.0),
        ("Arsenic", 5.0),
    ]))
    .expect("compute");
    assert_eq!(plain, noisy);
    assert_eq!(plain.hpi, 88.57);
    assert_eq!(plain.hei, 1.3);
    assert_eq!(plain.health_risk, RiskLevel::High);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let metals = record(&[("mercury", 0.002), ("nickel", 0.09), ("copper", 1.7)]);
    let runs: Vec<_> = (0..5).map(|_| compute_indices(&metals).expect("compute")).collect();
    for r in &runs[1..] {
        assert_eq!(r.hpi.to_bits(), runs[0].hpi.to_bits());
        assert_eq!(r.hei.to_bits(), runs[0].hei.to_bits());
        assert_eq!(r.cd.to_bits(), runs[0].cd.to_bits());
        assert_eq!(r.health_risk, runs[0].health_risk);
    }
}

#[test]
fn raw_formulas_match_hand_calculation() {
    // Qi(cadmium)=133.33 w=5, Qi(lead)=30 w=5
    let metals = record(&[("cadmium", 0.004), ("lead", 0.003)]);
    assert!((compute_hpi(&metals) - 81.666_666_666_666_66).abs() < 1e-9);
    assert!((compute_hei(&metals) - 1.633_333_333_333_333).abs() < 1e-9);

    let result = compute_indices(&metals).expect("compute");
    assert_eq!(result.hpi, 81.67);
    assert_eq!(result.hei, 1.63);
    assert_eq!(result.health_risk, RiskLevel::High);
}

#[test]
fn invalid_input_policies() {
    let negative = record(&[("copper", -0.5), ("lead", 0.01)]);
    assert!(compute_indices(&negative).is_err());

    let clamped = IndexEngine::new(InputPolicy::Clamp)
        .compute(&negative)
        .expect("clamp");
    assert_eq!(clamped.hpi, 100.0);

    let nan = record(&[("nickel", f64::NAN)]);
    assert!(IndexEngine::new(InputPolicy::Clamp).compute(&nan).is_err());
}
