//! Empirical posterior-cornea astigmatism model.

use iolens_core::models::astigmatism::PowerVector;
use iolens_core::models::tuning::{DirectionalWeights, GammaParams};

use crate::vector::is_wtr;

/// Estimate the posterior corneal astigmatism vector.
///
/// Magnitude: gamma0 + gamma1 * max(C_ant, 0) + gamma2 * (K_mean - 43),
/// weighted by f_wtr or f_atr depending on the anterior axis. The posterior
/// surface is almost always against-the-rule, so the output sits on the
/// 180° meridian (J45 = 0) regardless of the anterior axis.
///
/// Low anterior cylinder with flat K readings can drive the modeled
/// magnitude negative; the model does not clamp it.
pub fn posterior_vector(
    anterior_cyl: f64,
    k_mean: f64,
    anterior_axis_deg: f64,
    gamma: &GammaParams,
    weights: &DirectionalWeights,
) -> PowerVector {
    let base = gamma.gamma0 + gamma.gamma1 * anterior_cyl.max(0.0) + gamma.gamma2 * (k_mean - 43.0);
    let mult = if is_wtr(anterior_axis_deg) {
        weights.f_wtr
    } else {
        weights.f_atr
    };
    let c_post = base * mult;
    PowerVector {
        j0: 0.5 * c_post,
        j45: 0.0,
    }
}
