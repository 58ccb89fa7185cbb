use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Posterior-cornea model coefficients:
/// base = gamma0 + gamma1 * C_anterior + gamma2 * (K_mean - 43).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GammaParams {
    pub gamma0: f64,
    pub gamma1: f64,
    pub gamma2: f64,
}

impl Default for GammaParams {
    fn default() -> Self {
        GammaParams {
            gamma0: 0.10,
            gamma1: 0.30,
            gamma2: 0.02,
        }
    }
}

/// Directional weighting of the posterior magnitude. Both factors must be
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DirectionalWeights {
    pub f_wtr: f64,
    pub f_atr: f64,
}

impl Default for DirectionalWeights {
    fn default() -> Self {
        DirectionalWeights {
            f_wtr: 1.15,
            f_atr: 0.85,
        }
    }
}

/// Toricity-ratio model: ratio = base + slope * (elp_mm - 5.0). The slope
/// is zero today but the model is kept ELP-dependent for when lens-plane
/// data justifies a non-zero slope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToricityParams {
    pub base: f64,
    pub slope: f64,
}

impl Default for ToricityParams {
    fn default() -> Self {
        ToricityParams {
            base: 1.46,
            slope: 0.00,
        }
    }
}

/// The calculator's tunable-parameter bundle, defaulting to literature
/// values. An immutable value object: updates produce a new bundle rather
/// than mutating shared state, so a bundle can be shared across concurrent
/// requests freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TuningParams {
    pub gamma: GammaParams,
    pub weights: DirectionalWeights,
    pub toricity: ToricityParams,
    pub atr_boost: f64,
}

impl Default for TuningParams {
    fn default() -> Self {
        TuningParams {
            gamma: GammaParams::default(),
            weights: DirectionalWeights::default(),
            toricity: ToricityParams::default(),
            atr_boost: 1.05,
        }
    }
}

impl TuningParams {
    /// Apply a partial update, field by field within each sub-bundle, and
    /// return the merged result. Fields left `None` keep their current
    /// values.
    pub fn merged(&self, update: &TuningUpdate) -> TuningParams {
        TuningParams {
            gamma: match &update.gamma {
                Some(u) => self.gamma.merged(u),
                None => self.gamma,
            },
            weights: match &update.weights {
                Some(u) => self.weights.merged(u),
                None => self.weights,
            },
            toricity: match &update.toricity {
                Some(u) => self.toricity.merged(u),
                None => self.toricity,
            },
            atr_boost: update.atr_boost.unwrap_or(self.atr_boost),
        }
    }
}

impl GammaParams {
    pub fn merged(&self, update: &GammaUpdate) -> GammaParams {
        GammaParams {
            gamma0: update.gamma0.unwrap_or(self.gamma0),
            gamma1: update.gamma1.unwrap_or(self.gamma1),
            gamma2: update.gamma2.unwrap_or(self.gamma2),
        }
    }
}

impl DirectionalWeights {
    pub fn merged(&self, update: &WeightsUpdate) -> DirectionalWeights {
        DirectionalWeights {
            f_wtr: update.f_wtr.unwrap_or(self.f_wtr),
            f_atr: update.f_atr.unwrap_or(self.f_atr),
        }
    }
}

impl ToricityParams {
    pub fn merged(&self, update: &ToricityUpdate) -> ToricityParams {
        ToricityParams {
            base: update.base.unwrap_or(self.base),
            slope: update.slope.unwrap_or(self.slope),
        }
    }
}

/// Partial update for [`TuningParams`], typically deserialized from an
/// admin/bias-layer request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TuningUpdate {
    pub gamma: Option<GammaUpdate>,
    pub weights: Option<WeightsUpdate>,
    pub toricity: Option<ToricityUpdate>,
    pub atr_boost: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GammaUpdate {
    pub gamma0: Option<f64>,
    pub gamma1: Option<f64>,
    pub gamma2: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeightsUpdate {
    pub f_wtr: Option<f64>,
    pub f_atr: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToricityUpdate {
    pub base: Option<f64>,
    pub slope: Option<f64>,
}
