//! Toric recommendation policies.
//!
//! A policy encodes one clinical philosophy for when a toric IOL is worth
//! implanting: orientation-specific thresholds on the post-bias total
//! cylinder, a postop residual ceiling, a gain rule, pre-bias floors, and
//! quality gating. Presets are static, versioned constants; a policy is
//! never mutated after construction.

use iolens_core::error::ToricError;
use iolens_core::models::astigmatism::Orientation;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Decision thresholds for one astigmatism orientation, in diopters of
/// post-bias total cylinder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrientationThresholds {
    /// At or above this total cylinder, a toric is strongly considered.
    pub thr_recommend: f64,
    /// Borderline band: [thr_border_low, thr_border_high).
    pub thr_border_low: f64,
    pub thr_border_high: f64,
    /// Minimum measured anterior cylinder for a full recommendation;
    /// below it the pre-bias guard downgrades to borderline.
    pub prebias_floor: f64,
}

/// An immutable, named bundle of decision thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToricPolicy {
    pub atr: OrientationThresholds,
    pub wtr: OrientationThresholds,
    pub obl: OrientationThresholds,

    /// Acceptable postop residual with a toric implanted.
    pub thr_postop_max: f64,
    /// min_gain = max(base_min_gain, gain_scale * post-bias cylinder).
    pub base_min_gain: f64,
    pub gain_scale: f64,

    /// Quality gating: beyond either maximum, `quality_penalty` is added to
    /// the recommend threshold and the minimum gain.
    pub axis_repeatability_max_deg: f64,
    pub k_repeatability_max_d: f64,
    pub quality_penalty: f64,
}

const fn thresholds(
    thr_recommend: f64,
    thr_border_low: f64,
    thr_border_high: f64,
    prebias_floor: f64,
) -> OrientationThresholds {
    OrientationThresholds {
        thr_recommend,
        thr_border_low,
        thr_border_high,
        prebias_floor,
    }
}

/// Moderate thresholds for all orientations.
static BALANCED: ToricPolicy = ToricPolicy {
    atr: thresholds(0.50, 0.25, 0.50, 0.20),
    wtr: thresholds(0.90, 0.75, 0.90, 0.50),
    obl: thresholds(0.75, 0.50, 0.75, 0.40),
    thr_postop_max: 0.50,
    base_min_gain: 0.50,
    gain_scale: 0.30,
    axis_repeatability_max_deg: 20.0,
    k_repeatability_max_d: 0.40,
    quality_penalty: 0.25,
};

/// ATR-forward lifetime philosophy: ATR astigmatism progresses with age, so
/// its recommend threshold sits deliberately below the borderline ceiling.
static LIFETIME_ATR: ToricPolicy = ToricPolicy {
    atr: thresholds(0.25, 0.25, 0.50, 0.20),
    wtr: thresholds(1.00, 0.75, 1.00, 0.50),
    obl: thresholds(0.75, 0.50, 0.75, 0.40),
    thr_postop_max: 0.50,
    base_min_gain: 0.50,
    gain_scale: 0.30,
    axis_repeatability_max_deg: 20.0,
    k_repeatability_max_d: 0.40,
    quality_penalty: 0.25,
};

/// Higher thresholds, stricter gain criteria.
static CONSERVATIVE: ToricPolicy = ToricPolicy {
    atr: thresholds(0.50, 0.50, 0.75, 0.30),
    wtr: thresholds(1.25, 1.00, 1.25, 0.60),
    obl: thresholds(1.00, 0.75, 1.00, 0.50),
    thr_postop_max: 0.50,
    base_min_gain: 0.60,
    gain_scale: 0.35,
    axis_repeatability_max_deg: 20.0,
    k_repeatability_max_d: 0.40,
    quality_penalty: 0.25,
};

impl ToricPolicy {
    /// Strict preset lookup.
    pub fn preset(key: &str) -> Result<&'static ToricPolicy, ToricError> {
        match key {
            "balanced" => Ok(&BALANCED),
            "lifetime_atr" => Ok(&LIFETIME_ATR),
            "conservative" => Ok(&CONSERVATIVE),
            other => Err(ToricError::UnknownPolicyKey(other.to_string())),
        }
    }

    /// Start a custom policy from the balanced defaults.
    pub fn builder() -> ToricPolicyBuilder {
        ToricPolicyBuilder {
            policy: BALANCED.clone(),
        }
    }

    pub fn for_orientation(&self, orientation: Orientation) -> &OrientationThresholds {
        match orientation {
            Orientation::Atr => &self.atr,
            Orientation::Wtr => &self.wtr,
            Orientation::Obl => &self.obl,
        }
    }
}

/// Preset lookup with the historical silent fallback: an unrecognized key
/// resolves to "lifetime_atr". Callers that want unknown keys surfaced use
/// [`ToricPolicy::preset`] instead.
pub fn get_policy(key: &str) -> &'static ToricPolicy {
    ToricPolicy::preset(key).unwrap_or(&LIFETIME_ATR)
}

/// Ordered (key, description) list of the available presets.
pub fn available_policies() -> [(&'static str, &'static str); 3] {
    [
        (
            "balanced",
            "Balanced approach - moderate thresholds for all orientations",
        ),
        (
            "lifetime_atr",
            "Lifetime ATR philosophy - lower thresholds for ATR, higher for WTR",
        ),
        (
            "conservative",
            "Conservative approach - higher thresholds, stricter criteria",
        ),
    ]
}

/// Builder for custom policies, seeded with the balanced preset.
#[derive(Debug, Clone)]
pub struct ToricPolicyBuilder {
    policy: ToricPolicy,
}

impl ToricPolicyBuilder {
    pub fn atr(mut self, t: OrientationThresholds) -> Self {
        self.policy.atr = t;
        self
    }

    pub fn wtr(mut self, t: OrientationThresholds) -> Self {
        self.policy.wtr = t;
        self
    }

    pub fn obl(mut self, t: OrientationThresholds) -> Self {
        self.policy.obl = t;
        self
    }

    pub fn thr_postop_max(mut self, v: f64) -> Self {
        self.policy.thr_postop_max = v;
        self
    }

    pub fn base_min_gain(mut self, v: f64) -> Self {
        self.policy.base_min_gain = v;
        self
    }

    pub fn gain_scale(mut self, v: f64) -> Self {
        self.policy.gain_scale = v;
        self
    }

    pub fn axis_repeatability_max_deg(mut self, v: f64) -> Self {
        self.policy.axis_repeatability_max_deg = v;
        self
    }

    pub fn k_repeatability_max_d(mut self, v: f64) -> Self {
        self.policy.k_repeatability_max_d = v;
        self
    }

    pub fn quality_penalty(mut self, v: f64) -> Self {
        self.policy.quality_penalty = v;
        self
    }

    pub fn build(self) -> ToricPolicy {
        self.policy
    }
}
