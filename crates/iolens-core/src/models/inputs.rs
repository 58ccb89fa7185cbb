use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Scalar inputs to a toric calculation, as delivered by the document
/// parsing layer (keratometry), the user (SIA), and the base IOL-power
/// formula (ELP).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ToricInputs {
    /// Keratometry readings in diopters.
    pub k1: f64,
    pub k2: f64,
    /// Meridian axes in degrees for k1 and k2 respectively.
    pub axis1_deg: f64,
    pub axis2_deg: f64,
    /// Surgically-induced astigmatism, user supplied.
    pub sia_magnitude: f64,
    pub sia_axis_deg: f64,
    /// Effective lens position from the base formula, in mm.
    pub elp_mm: f64,
    /// Accepted for interface compatibility; the vector math does not
    /// consume it yet.
    #[serde(default)]
    pub target_refraction: f64,
}

/// Measurement repeatability signals used for quality gating. Larger
/// values mean noisier biometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QualityInputs {
    pub axis_repeatability_deg: f64,
    pub k_repeatability_d: f64,
}

impl Default for QualityInputs {
    fn default() -> Self {
        QualityInputs {
            axis_repeatability_deg: 10.0,
            k_repeatability_d: 0.20,
        }
    }
}
