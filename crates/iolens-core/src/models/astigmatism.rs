use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Cartesian (J0, J45) representation of cylindrical power under the
/// axis-doubling convention. In this form astigmatism contributions from
/// the anterior cornea, the posterior model, and the incision combine by
/// plain vector addition.
///
/// Any finite pair is a valid vector; there is no intrinsic invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PowerVector {
    pub j0: f64,
    pub j45: f64,
}

impl Add for PowerVector {
    type Output = PowerVector;

    fn add(self, rhs: PowerVector) -> PowerVector {
        PowerVector {
            j0: self.j0 + rhs.j0,
            j45: self.j45 + rhs.j45,
        }
    }
}

impl Sub for PowerVector {
    type Output = PowerVector;

    fn sub(self, rhs: PowerVector) -> PowerVector {
        PowerVector {
            j0: self.j0 - rhs.j0,
            j45: self.j45 - rhs.j45,
        }
    }
}

/// Polar form of cylindrical astigmatism: non-negative magnitude in
/// diopters and an axis normalized into [0, 180) degrees.
///
/// At zero magnitude the axis carries no information — the vector form is
/// many-to-one there and the polar axis is a convention value (0), never an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PolarAstigmatism {
    pub magnitude: f64,
    pub axis_deg: f64,
}

/// Clinical orientation of an astigmatism axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Orientation {
    /// Against-the-rule: steep meridian near horizontal.
    Atr,
    /// With-the-rule: steep meridian near vertical.
    Wtr,
    /// Oblique: neither.
    Obl,
}

impl Orientation {
    /// Classify an axis, reduced mod 180, into the standard orientations.
    /// Boundaries are inclusive: [0, 30] and [150, 180) are ATR, [60, 120]
    /// is WTR, and the remaining bands (30, 60) and (120, 150) are OBL.
    /// The three cases partition [0, 180) with no gaps or overlaps.
    pub fn of(axis_deg: f64) -> Orientation {
        let a = axis_deg.rem_euclid(180.0);
        if a.min(180.0 - a) <= 30.0 {
            Orientation::Atr
        } else if (a - 90.0).abs() <= 30.0 {
            Orientation::Wtr
        } else {
            Orientation::Obl
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Atr => "ATR",
            Orientation::Wtr => "WTR",
            Orientation::Obl => "OBL",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
