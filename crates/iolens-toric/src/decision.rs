//! Policy-driven classification of the toric choice.

use iolens_core::error::ToricError;
use iolens_core::models::astigmatism::{Orientation, PolarAstigmatism};
use iolens_core::models::decision::ToricDecision;
use iolens_core::models::inputs::QualityInputs;
use iolens_core::models::tuning::ToricityParams;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::policy::ToricPolicy;
use crate::selector::choose_toric;

/// Borderline cases accept this much less gain than a full recommendation.
const BORDERLINE_GAIN_RELIEF: f64 = 0.25;

/// Structured outcome of the policy layer, consumed by the calculator and
/// serializable for audit output.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PolicyDecision {
    pub decision: ToricDecision,
    pub orientation: Orientation,
    pub pre_bias_anterior_cyl: Option<f64>,
    pub post_bias_total_cyl: f64,
    pub sku_cyl_iol: f64,
    pub corneal_equivalent: f64,
    /// Predicted residual cylinder with the chosen toric.
    pub toric_residual: f64,
    /// Residual without any toric, i.e. the post-bias total cylinder.
    pub non_toric_residual: f64,
    pub gain: f64,
    pub residual_axis_deg: f64,
    pub elp_mm: f64,
    /// One-line account of the classification. A pure function of the
    /// numeric inputs.
    pub reason: String,
}

/// Classify the post-bias total astigmatism against an orientation-aware
/// policy.
///
/// Thresholds come from the policy entry for the total's orientation. Noisy
/// biometry (either repeatability signal beyond its policy maximum) adds
/// `quality_penalty` to the recommend threshold and the minimum gain. All
/// threshold comparisons are inclusive (`>=` / `<=`); the borderline band
/// is half-open `[thr_border_low, thr_border_high)`.
///
/// The pre-bias guard runs last: a full recommendation whose measured
/// anterior cylinder sits below the orientation's `prebias_floor` is
/// downgraded to borderline, so a recommendation is never manufactured by
/// the SIA and posterior models alone.
#[allow(clippy::too_many_arguments)]
pub fn toric_decision_with_policy(
    total_cyl: f64,
    total_axis_deg: f64,
    pre_bias: Option<PolarAstigmatism>,
    elp_mm: f64,
    catalog: &[f64],
    policy: &ToricPolicy,
    atr_boost: f64,
    toricity: &ToricityParams,
    quality: &QualityInputs,
) -> Result<PolicyDecision, ToricError> {
    let orientation = Orientation::of(total_axis_deg);
    let thresholds = policy.for_orientation(orientation);

    let noisy = quality.axis_repeatability_deg > policy.axis_repeatability_max_deg
        || quality.k_repeatability_d > policy.k_repeatability_max_d;
    let quality_penalty = if noisy { policy.quality_penalty } else { 0.0 };

    let thr_recommend = thresholds.thr_recommend + quality_penalty;
    let min_gain = (policy.base_min_gain + quality_penalty).max(policy.gain_scale * total_cyl);

    // Without a toric, the residual is the total cylinder itself.
    let non_toric_residual = total_cyl;

    let selection = choose_toric(total_cyl, total_axis_deg, elp_mm, catalog, atr_boost, toricity)?;
    let toric_residual = selection.residual.magnitude;
    let gain = non_toric_residual - toric_residual;

    let mut decision;
    let mut reason;
    if non_toric_residual >= thr_recommend
        && toric_residual <= policy.thr_postop_max
        && gain >= min_gain
    {
        decision = ToricDecision::RecommendToric;
        reason = format!(
            "{orientation}: post-bias {non_toric_residual:.2} >= {thr_recommend:.2}, \
             residual {toric_residual:.2} <= {:.2}, gain {gain:.2} >= {min_gain:.2}.",
            policy.thr_postop_max,
        );
    } else if thresholds.thr_border_low <= non_toric_residual
        && non_toric_residual < thresholds.thr_border_high
        && toric_residual <= policy.thr_postop_max
        && gain >= min_gain - BORDERLINE_GAIN_RELIEF
    {
        decision = ToricDecision::BorderlineToric;
        reason = format!(
            "{orientation}: post-bias {non_toric_residual:.2} in [{:.2}, {:.2}); \
             residual {toric_residual:.2}, gain {gain:.2}.",
            thresholds.thr_border_low, thresholds.thr_border_high,
        );
    } else {
        decision = ToricDecision::NoToric;
        reason = format!(
            "{orientation}: post-bias {non_toric_residual:.2}; \
             residual {toric_residual:.2}; gain {gain:.2} not sufficient.",
        );
    }

    if decision == ToricDecision::RecommendToric
        && let Some(pre) = pre_bias
        && pre.magnitude < thresholds.prebias_floor
    {
        decision = ToricDecision::BorderlineToric;
        reason.push_str(&format!(
            " Pre-bias anterior {:.2} < {:.2}, downgraded to borderline.",
            pre.magnitude, thresholds.prebias_floor,
        ));
    }

    Ok(PolicyDecision {
        decision,
        orientation,
        pre_bias_anterior_cyl: pre_bias.map(|p| p.magnitude),
        post_bias_total_cyl: non_toric_residual,
        sku_cyl_iol: selection.cyl_iol,
        corneal_equivalent: selection.corneal_equivalent,
        toric_residual,
        non_toric_residual,
        gain,
        residual_axis_deg: selection.residual.axis_deg,
        elp_mm,
        reason,
    })
}
