use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Closed set of recommendation outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ToricDecision {
    RecommendToric,
    BorderlineToric,
    NoToric,
}

/// Complete outcome of one toric calculation. Created fresh per call and
/// owned by the caller; serializes to JSON without loss for the API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToricDecisionResult {
    pub decision: ToricDecision,
    /// True only for `RecommendToric`; borderline cases do not strongly
    /// recommend a toric lens.
    pub recommend_toric: bool,
    /// IOL-plane cylinder of the chosen catalog entry, in diopters.
    pub chosen_sku_power: f64,
    /// Corneal-plane equivalent of the chosen entry.
    pub corneal_equivalent_power: f64,
    /// Post-bias total corneal astigmatism (anterior + SIA + posterior).
    pub total_astigmatism: f64,
    pub total_axis_deg: f64,
    /// Predicted residual astigmatism with the chosen toric implanted.
    pub residual_astigmatism: f64,
    pub residual_axis_deg: f64,
    pub elp_mm: f64,
    pub toricity_ratio: f64,
    /// Ordered, human-readable account of every pipeline step. A pure
    /// function of the numeric inputs — no timestamps, no randomness.
    pub rationale: Vec<String>,
}
