use iolens_core::models::astigmatism::{Orientation, PolarAstigmatism};
use iolens_core::models::decision::ToricDecision;
use iolens_core::models::inputs::QualityInputs;
use iolens_core::models::tuning::ToricityParams;
use iolens_toric::decision::toric_decision_with_policy;
use iolens_toric::policy::ToricPolicy;

fn unit_ratio() -> ToricityParams {
    ToricityParams {
        base: 1.0,
        slope: 0.0,
    }
}

fn polar(magnitude: f64, axis_deg: f64) -> PolarAstigmatism {
    PolarAstigmatism {
        magnitude,
        axis_deg,
    }
}

#[test]
fn recommend_threshold_is_inclusive() {
    // WTR recommend threshold under "balanced" is exactly 0.90; a total of
    // exactly 0.90 must classify as Recommend, not fall through.
    let policy = ToricPolicy::preset("balanced").expect("preset");
    let outcome = toric_decision_with_policy(
        0.90,
        90.0,
        Some(polar(0.90, 90.0)),
        5.0,
        &[0.9],
        policy,
        1.0,
        &unit_ratio(),
        &QualityInputs::default(),
    )
    .expect("decision");

    assert_eq!(outcome.decision, ToricDecision::RecommendToric);
    assert_eq!(outcome.orientation, Orientation::Wtr);
    assert_eq!(outcome.non_toric_residual, 0.90);
    assert!(outcome.toric_residual < 1e-9);
}

#[test]
fn noisy_biometry_tightens_the_thresholds() {
    // Same case as above, but axis repeatability beyond the policy maximum
    // adds the 0.25 penalty: 0.90 < 1.15 and the half-open borderline band
    // [0.75, 0.90) excludes 0.90, so the case drops to no-toric.
    let policy = ToricPolicy::preset("balanced").expect("preset");
    let noisy = QualityInputs {
        axis_repeatability_deg: 25.0,
        k_repeatability_d: 0.20,
    };
    let outcome = toric_decision_with_policy(
        0.90,
        90.0,
        Some(polar(0.90, 90.0)),
        5.0,
        &[0.9],
        policy,
        1.0,
        &unit_ratio(),
        &noisy,
    )
    .expect("decision");

    assert_eq!(outcome.decision, ToricDecision::NoToric);
}

#[test]
fn k_repeatability_alone_triggers_the_penalty() {
    let policy = ToricPolicy::preset("balanced").expect("preset");
    let noisy = QualityInputs {
        axis_repeatability_deg: 10.0,
        k_repeatability_d: 0.45,
    };
    let outcome = toric_decision_with_policy(
        0.90,
        90.0,
        Some(polar(0.90, 90.0)),
        5.0,
        &[0.9],
        policy,
        1.0,
        &unit_ratio(),
        &noisy,
    )
    .expect("decision");

    assert_eq!(outcome.decision, ToricDecision::NoToric);
}

#[test]
fn prebias_guard_downgrades_manufactured_recommendations() {
    // ATR total of 1.00 D sails past lifetime_atr's 0.25 D threshold, but
    // the measured anterior cylinder is only 0.10 D — the magnitude comes
    // from the SIA/posterior models, so the guard pulls it to borderline.
    let policy = ToricPolicy::preset("lifetime_atr").expect("preset");
    let outcome = toric_decision_with_policy(
        1.0,
        5.0,
        Some(polar(0.10, 5.0)),
        5.0,
        &[1.0],
        policy,
        1.0,
        &unit_ratio(),
        &QualityInputs::default(),
    )
    .expect("decision");

    assert_eq!(outcome.decision, ToricDecision::BorderlineToric);
    assert!(outcome.reason.contains("downgraded to borderline"));
}

#[test]
fn prebias_guard_passes_measured_astigmatism() {
    let policy = ToricPolicy::preset("lifetime_atr").expect("preset");
    let outcome = toric_decision_with_policy(
        1.0,
        5.0,
        Some(polar(0.90, 5.0)),
        5.0,
        &[1.0],
        policy,
        1.0,
        &unit_ratio(),
        &QualityInputs::default(),
    )
    .expect("decision");

    assert_eq!(outcome.decision, ToricDecision::RecommendToric);
}

#[test]
fn without_prebias_the_guard_is_skipped() {
    let policy = ToricPolicy::preset("lifetime_atr").expect("preset");
    let outcome = toric_decision_with_policy(
        1.0,
        5.0,
        None,
        5.0,
        &[1.0],
        policy,
        1.0,
        &unit_ratio(),
        &QualityInputs::default(),
    )
    .expect("decision");

    assert_eq!(outcome.decision, ToricDecision::RecommendToric);
    assert_eq!(outcome.pre_bias_anterior_cyl, None);
}

#[test]
fn borderline_band_accepts_reduced_gain() {
    // 0.80 D WTR: inside balanced's [0.75, 0.90) band. The only SKU leaves
    // a residual of exactly the postop ceiling (0.50) and a gain of 0.30 —
    // short of the 0.50 minimum but within the 0.25 borderline relief.
    let policy = ToricPolicy::preset("balanced").expect("preset");
    let outcome = toric_decision_with_policy(
        0.80,
        90.0,
        Some(polar(0.80, 90.0)),
        5.0,
        &[0.3],
        policy,
        1.0,
        &unit_ratio(),
        &QualityInputs::default(),
    )
    .expect("decision");

    assert_eq!(outcome.decision, ToricDecision::BorderlineToric);
    assert!((outcome.gain - 0.30).abs() < 1e-9);
}

#[test]
fn gain_requirement_scales_with_total_cylinder() {
    // At 4.0 D total, min_gain = max(0.50, 0.30 * 4.0) = 1.20. A catalog
    // whose best correction only removes 1.0 D cannot recommend.
    let policy = ToricPolicy::preset("balanced").expect("preset");
    let outcome = toric_decision_with_policy(
        4.0,
        90.0,
        Some(polar(4.0, 90.0)),
        5.0,
        &[1.0],
        policy,
        1.0,
        &unit_ratio(),
        &QualityInputs::default(),
    )
    .expect("decision");

    assert_ne!(outcome.decision, ToricDecision::RecommendToric);
}

#[test]
fn gain_identity_holds() {
    let policy = ToricPolicy::preset("balanced").expect("preset");
    let outcome = toric_decision_with_policy(
        2.3,
        74.0,
        Some(polar(2.1, 74.0)),
        5.2,
        &[1.0, 1.5, 2.0, 2.5, 3.0],
        policy,
        1.05,
        &ToricityParams::default(),
        &QualityInputs::default(),
    )
    .expect("decision");

    let expected = outcome.non_toric_residual - outcome.toric_residual;
    assert!((outcome.gain - expected).abs() < 1e-12);
}

#[test]
fn reason_text_is_deterministic() {
    let policy = ToricPolicy::preset("conservative").expect("preset");
    let run = || {
        toric_decision_with_policy(
            1.8,
            100.0,
            Some(polar(1.7, 100.0)),
            5.1,
            &[1.0, 1.5, 2.0, 2.5],
            policy,
            1.05,
            &ToricityParams::default(),
            &QualityInputs::default(),
        )
        .expect("decision")
    };
    let first = run();
    let second = run();
    assert_eq!(first.reason, second.reason);
    assert_eq!(first.decision, second.decision);
    assert_eq!(first.gain, second.gain);
}
