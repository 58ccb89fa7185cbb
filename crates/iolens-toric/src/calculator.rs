//! Top-level toric calculation pipeline.

use iolens_core::error::ToricError;
use iolens_core::models::astigmatism::PolarAstigmatism;
use iolens_core::models::decision::{ToricDecision, ToricDecisionResult};
use iolens_core::models::inputs::{QualityInputs, ToricInputs};
use iolens_core::models::tuning::{TuningParams, TuningUpdate};
use tracing::debug;

use crate::decision::toric_decision_with_policy;
use crate::policy::get_policy;
use crate::posterior::posterior_vector;
use crate::toricity::toricity_ratio;
use crate::vector::{add_sia, from_vec, to_vec};

/// Catalog used when the lens database does not supply one: 0.5 D to 6.0 D
/// of IOL-plane cylinder in half-diopter steps.
pub const DEFAULT_TORIC_SKUS: [f64; 12] = [
    0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0,
];

/// The toric calculator. An immutable value: [`ToricCalculator::update_parameters`]
/// returns a new instance instead of mutating shared state, so clones can
/// be handed to concurrent requests without synchronization.
#[derive(Debug, Clone, Default)]
pub struct ToricCalculator {
    params: TuningParams,
}

impl ToricCalculator {
    /// Calculator with the literature-default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameters(params: TuningParams) -> Self {
        ToricCalculator { params }
    }

    pub fn parameters(&self) -> &TuningParams {
        &self.params
    }

    /// Shallow per-field merge of the tunable bundles (from the literature
    /// or bias layer), returning the updated calculator.
    pub fn update_parameters(&self, update: &TuningUpdate) -> Self {
        ToricCalculator {
            params: self.params.merged(update),
        }
    }

    /// Run the full pipeline: anterior cylinder from the K readings, SIA
    /// and posterior composition in vector space, catalog search, and the
    /// policy decision layer.
    ///
    /// `catalog` defaults to [`DEFAULT_TORIC_SKUS`]; `policy_key` falls
    /// back silently to "lifetime_atr" when unrecognized (historical
    /// behavior, kept for compatibility). Inputs are validated up front and
    /// fail with a typed error rather than propagating NaN.
    pub fn calculate_toric_iol(
        &self,
        inputs: &ToricInputs,
        catalog: Option<&[f64]>,
        policy_key: &str,
    ) -> Result<ToricDecisionResult, ToricError> {
        validate_inputs(inputs)?;
        let catalog = catalog.unwrap_or(&DEFAULT_TORIC_SKUS);

        let anterior_cyl = (inputs.k1 - inputs.k2).abs();
        // Steep axis follows whichever K reading is numerically larger.
        let anterior_axis = if inputs.k1 > inputs.k2 {
            inputs.axis1_deg
        } else {
            inputs.axis2_deg
        };

        let mut rationale = vec![
            "Deterministic algorithm: power-vector toric engine with policy thresholds"
                .to_string(),
            format!("Anterior corneal astigmatism: {anterior_cyl:.2}D @ {anterior_axis:.0}°"),
        ];
        if anterior_cyl == 0.0 {
            rationale.push(
                "Anterior cylinder is zero; the reported axis is a convention value".to_string(),
            );
        }

        let v_anterior = to_vec(anterior_cyl, anterior_axis);
        let v_postop = add_sia(v_anterior, inputs.sia_magnitude, inputs.sia_axis_deg);
        rationale.push(format!(
            "SIA (user input): {:.2}D @ {:.0}°",
            inputs.sia_magnitude, inputs.sia_axis_deg,
        ));

        // Posterior astigmatism is composed but not itemized for the user;
        // it is an inferred value, not a measurement.
        let k_mean = (inputs.k1 + inputs.k2) / 2.0;
        let v_posterior = posterior_vector(
            anterior_cyl,
            k_mean,
            anterior_axis,
            &self.params.gamma,
            &self.params.weights,
        );

        let total = from_vec(v_postop + v_posterior);
        debug!(
            total_cyl = total.magnitude,
            total_axis = total.axis_deg,
            "composed total corneal astigmatism"
        );
        rationale.push(format!(
            "Total astigmatism: {:.2}D @ {:.0}°",
            total.magnitude, total.axis_deg,
        ));

        let policy = get_policy(policy_key);
        let pre_bias = PolarAstigmatism {
            magnitude: anterior_cyl,
            axis_deg: anterior_axis.rem_euclid(180.0),
        };

        let outcome = toric_decision_with_policy(
            total.magnitude,
            total.axis_deg,
            Some(pre_bias),
            inputs.elp_mm,
            catalog,
            policy,
            self.params.atr_boost,
            &self.params.toricity,
            &QualityInputs::default(),
        )?;
        debug!(
            decision = ?outcome.decision,
            sku = outcome.sku_cyl_iol,
            gain = outcome.gain,
            "policy decision"
        );

        let summary = match outcome.decision {
            ToricDecision::RecommendToric => "Toric IOL recommended",
            ToricDecision::BorderlineToric => "Toric IOL considered (borderline)",
            ToricDecision::NoToric => "Spherical IOL sufficient",
        };
        rationale.push(format!(
            "Policy: {policy_key} ({} orientation)",
            outcome.orientation,
        ));
        rationale.push(format!("Decision layer: {summary}"));
        rationale.push(format!("Rationale: {}", outcome.reason));
        rationale.push(format!("Preop total: {:.2}D", outcome.post_bias_total_cyl));
        rationale.push(format!("Best toric: {:.2}D IOL", outcome.sku_cyl_iol));
        rationale.push(format!("Expected gain: {:.2}D", outcome.gain));

        Ok(ToricDecisionResult {
            decision: outcome.decision,
            recommend_toric: outcome.decision == ToricDecision::RecommendToric,
            chosen_sku_power: outcome.sku_cyl_iol,
            corneal_equivalent_power: outcome.corneal_equivalent,
            total_astigmatism: total.magnitude,
            total_axis_deg: total.axis_deg,
            residual_astigmatism: outcome.toric_residual,
            residual_axis_deg: outcome.residual_axis_deg,
            elp_mm: inputs.elp_mm,
            toricity_ratio: toricity_ratio(inputs.elp_mm, &self.params.toricity),
            rationale,
        })
    }
}

fn validate_inputs(inputs: &ToricInputs) -> Result<(), ToricError> {
    let fields = [
        ("k1", inputs.k1),
        ("k2", inputs.k2),
        ("axis1_deg", inputs.axis1_deg),
        ("axis2_deg", inputs.axis2_deg),
        ("sia_magnitude", inputs.sia_magnitude),
        ("sia_axis_deg", inputs.sia_axis_deg),
        ("elp_mm", inputs.elp_mm),
        ("target_refraction", inputs.target_refraction),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(ToricError::NonFiniteInput { field, value });
        }
    }
    for (field, value) in [
        ("k1", inputs.k1),
        ("k2", inputs.k2),
        ("sia_magnitude", inputs.sia_magnitude),
    ] {
        if value < 0.0 {
            return Err(ToricError::NegativeMagnitude { field, value });
        }
    }
    if inputs.elp_mm <= 0.0 {
        return Err(ToricError::NonPositiveElp(inputs.elp_mm));
    }
    Ok(())
}
