//! Discrete catalog search: which toric SKU leaves the least astigmatism.

use iolens_core::error::ToricError;
use iolens_core::models::astigmatism::PolarAstigmatism;
use iolens_core::models::tuning::ToricityParams;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::toricity::checked_toricity_ratio;
use crate::vector::{from_vec, is_wtr, to_vec};

/// Outcome of the catalog search.
///
/// `residual_magnitude` is the (J0, J45)-plane norm used for ranking;
/// `residual.magnitude` is the clinical residual cylinder, twice that norm.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkuSelection {
    pub residual_magnitude: f64,
    pub cyl_iol: f64,
    pub corneal_equivalent: f64,
    pub residual: PolarAstigmatism,
}

/// Brute-force residual minimization over the ordered toric catalog.
///
/// The correction vector is placed on the total-astigmatism axis, i.e. the
/// IOL is assumed to align perfectly with the steep meridian — a documented
/// simplification. Non-WTR totals get the `atr_boost` factor on the
/// corneal-plane correction. Ties keep the first catalog entry encountered
/// (strict `<` in the comparison), so catalog order is the tie-break, not
/// power magnitude.
pub fn choose_toric(
    total_cyl: f64,
    total_axis_deg: f64,
    elp_mm: f64,
    catalog: &[f64],
    atr_boost: f64,
    toricity: &ToricityParams,
) -> Result<SkuSelection, ToricError> {
    if catalog.is_empty() {
        return Err(ToricError::EmptySkuCatalog);
    }
    let ratio = checked_toricity_ratio(elp_mm, toricity)?;

    let total = to_vec(total_cyl, total_axis_deg);
    let boost = if is_wtr(from_vec(total).axis_deg) {
        1.0
    } else {
        atr_boost
    };

    let mut best: Option<SkuSelection> = None;
    for &cyl_iol in catalog {
        let corneal_equivalent = (cyl_iol / ratio) * boost;
        let correction = to_vec(corneal_equivalent, total_axis_deg);
        let residual_vec = total - correction;
        let residual_magnitude = residual_vec.j0.hypot(residual_vec.j45);

        if best
            .as_ref()
            .is_none_or(|b| residual_magnitude < b.residual_magnitude)
        {
            best = Some(SkuSelection {
                residual_magnitude,
                cyl_iol,
                corneal_equivalent,
                residual: from_vec(residual_vec),
            });
        }
    }

    best.ok_or(ToricError::EmptySkuCatalog)
}
