use iolens_core::error::ToricError;
use iolens_core::models::astigmatism::Orientation;
use iolens_toric::policy::{available_policies, get_policy, OrientationThresholds, ToricPolicy};

const ORIENTATIONS: [Orientation; 3] = [Orientation::Atr, Orientation::Wtr, Orientation::Obl];

#[test]
fn preset_bands_are_well_formed() {
    for (key, _) in available_policies() {
        let policy = ToricPolicy::preset(key).expect("preset exists");
        for orientation in ORIENTATIONS {
            let t = policy.for_orientation(orientation);
            assert!(
                t.thr_border_low <= t.thr_border_high,
                "{key}/{orientation}: border band inverted",
            );
            assert!(t.prebias_floor > 0.0, "{key}/{orientation}");
        }
        // WTR and OBL always put the recommend threshold at or above the
        // borderline ceiling.
        for orientation in [Orientation::Wtr, Orientation::Obl] {
            let t = policy.for_orientation(orientation);
            assert!(
                t.thr_border_high <= t.thr_recommend,
                "{key}/{orientation}: recommend below borderline ceiling",
            );
        }
    }
}

#[test]
fn atr_forward_presets_lower_the_recommend_threshold() {
    // The documented exception to band ordering: lifetime_atr and
    // conservative set the ATR recommend threshold inside the borderline
    // band, reflecting ATR progression with age.
    for key in ["lifetime_atr", "conservative"] {
        let t = ToricPolicy::preset(key).expect("preset exists").atr;
        assert!(t.thr_recommend < t.thr_border_high, "{key}");
    }
    let balanced = ToricPolicy::preset("balanced").expect("preset exists").atr;
    assert!(balanced.thr_border_high <= balanced.thr_recommend);
}

#[test]
fn preset_lookup_rejects_unknown_keys() {
    let err = ToricPolicy::preset("aggressive").unwrap_err();
    assert_eq!(err, ToricError::UnknownPolicyKey("aggressive".to_string()));
}

#[test]
fn get_policy_falls_back_to_lifetime_atr() {
    let fallback = get_policy("no_such_policy");
    let lifetime = ToricPolicy::preset("lifetime_atr").expect("preset exists");
    assert_eq!(fallback, lifetime);
}

#[test]
fn lifetime_atr_constants_match_the_published_table() {
    let policy = ToricPolicy::preset("lifetime_atr").expect("preset exists");
    assert_eq!(policy.atr.thr_recommend, 0.25);
    assert_eq!(policy.wtr.thr_recommend, 1.00);
    assert_eq!(policy.obl.thr_recommend, 0.75);
    assert_eq!(policy.thr_postop_max, 0.50);
    assert_eq!(policy.base_min_gain, 0.50);
    assert_eq!(policy.gain_scale, 0.30);
    assert_eq!(policy.atr.prebias_floor, 0.20);
    assert_eq!(policy.quality_penalty, 0.25);
}

#[test]
fn builder_starts_from_balanced_defaults() {
    let built = ToricPolicy::builder().build();
    let balanced = ToricPolicy::preset("balanced").expect("preset exists");
    assert_eq!(&built, balanced);
}

#[test]
fn builder_overrides_single_fields() {
    let custom = ToricPolicy::builder()
        .base_min_gain(0.80)
        .atr(OrientationThresholds {
            thr_recommend: 0.40,
            thr_border_low: 0.20,
            thr_border_high: 0.40,
            prebias_floor: 0.25,
        })
        .build();
    let balanced = ToricPolicy::preset("balanced").expect("preset exists");

    assert_eq!(custom.base_min_gain, 0.80);
    assert_eq!(custom.atr.thr_recommend, 0.40);
    // Untouched fields keep the balanced values.
    assert_eq!(custom.wtr, balanced.wtr);
    assert_eq!(custom.gain_scale, balanced.gain_scale);
}

#[test]
fn available_policies_lists_every_preset_in_order() {
    let listed = available_policies();
    assert_eq!(listed.len(), 3);
    assert_eq!(listed[0].0, "balanced");
    assert_eq!(listed[1].0, "lifetime_atr");
    assert_eq!(listed[2].0, "conservative");
    for (key, description) in listed {
        assert!(ToricPolicy::preset(key).is_ok());
        assert!(!description.is_empty());
    }
}
