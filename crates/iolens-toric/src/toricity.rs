//! Lens-plane to corneal-plane cylinder conversion.

use iolens_core::error::ToricError;
use iolens_core::models::tuning::ToricityParams;

/// IOL-plane cylinder divided by this ratio gives the corneal-plane
/// equivalent. Linear in ELP around a 5.0 mm reference; with the default
/// tuning (slope = 0) it is the constant 1.46.
pub fn toricity_ratio(elp_mm: f64, params: &ToricityParams) -> f64 {
    params.base + params.slope * (elp_mm - 5.0)
}

/// A non-positive ratio is a configuration error, not something to divide
/// by. Checked once before the catalog search uses it.
pub fn checked_toricity_ratio(elp_mm: f64, params: &ToricityParams) -> Result<f64, ToricError> {
    let ratio = toricity_ratio(elp_mm, params);
    if ratio <= 0.0 {
        return Err(ToricError::NonPositiveToricityRatio(ratio));
    }
    Ok(ratio)
}
