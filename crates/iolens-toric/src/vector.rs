//! Power-vector arithmetic for cylindrical astigmatism.
//!
//! Cylindrical power is periodic every 180°, so the axis is doubled before
//! projecting onto the (J0, J45) plane. In vector form the anterior,
//! posterior, and surgically-induced contributions combine by plain
//! addition, in any order.

use iolens_core::models::astigmatism::{Orientation, PolarAstigmatism, PowerVector};

/// Convert polar cylinder (magnitude, axis) to a (J0, J45) power vector.
pub fn to_vec(magnitude: f64, axis_deg: f64) -> PowerVector {
    let theta = (2.0 * axis_deg).rem_euclid(360.0).to_radians();
    PowerVector {
        j0: 0.5 * magnitude * theta.cos(),
        j45: 0.5 * magnitude * theta.sin(),
    }
}

/// Convert a power vector back to polar form, axis normalized to [0, 180).
///
/// Round-trips with [`to_vec`] within floating tolerance for any positive
/// magnitude. At zero magnitude the mapping is many-to-one and the axis
/// comes back as the convention value 0 — lossy by design, not an error.
pub fn from_vec(v: PowerVector) -> PolarAstigmatism {
    let magnitude = 2.0 * v.j0.hypot(v.j45);
    let axis_deg = (v.j45.atan2(v.j0).to_degrees() / 2.0).rem_euclid(180.0);
    PolarAstigmatism { magnitude, axis_deg }
}

/// Compose surgically-induced astigmatism into an existing vector.
pub fn add_sia(v: PowerVector, sia_magnitude: f64, sia_axis_deg: f64) -> PowerVector {
    v + to_vec(sia_magnitude, sia_axis_deg)
}

/// With-the-rule check: axis within 30° of the vertical meridian.
pub fn is_wtr(axis_deg: f64) -> bool {
    Orientation::of(axis_deg) == Orientation::Wtr
}
