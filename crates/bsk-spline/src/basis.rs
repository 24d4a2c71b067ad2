//! Uniform cubic B-spline basis.
//!
//! A segment is blended from four consecutive control points with weights
//! `B = T(t, d) · M`, where `T` is the monomial row `[1, t, t², t³]`
//! differentiated `d` times and `M` is the uniform cubic basis matrix.

use bsk_core::{Result, SplineError};
use nalgebra::{Matrix4, RowVector4};
use serde::{Deserialize, Serialize};

/// Derivative order of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Derivative {
    #[default]
    Position,
    Velocity,
    Acceleration,
    Jerk,
}

impl Derivative {
    pub fn order(self) -> u8 {
        match self {
            Derivative::Position => 0,
            Derivative::Velocity => 1,
            Derivative::Acceleration => 2,
            Derivative::Jerk => 3,
        }
    }

    /// Map a numeric order onto a derivative; orders above 3 have no cubic basis.
    pub fn from_order(order: u8) -> Option<Self> {
        match order {
            0 => Some(Derivative::Position),
            1 => Some(Derivative::Velocity),
            2 => Some(Derivative::Acceleration),
            3 => Some(Derivative::Jerk),
            _ => None,
        }
    }

    fn monomials(self, t: f64) -> RowVector4<f64> {
        match self {
            Derivative::Position => RowVector4::new(1.0, t, t * t, t * t * t),
            Derivative::Velocity => RowVector4::new(0.0, 1.0, 2.0 * t, 3.0 * t * t),
            Derivative::Acceleration => RowVector4::new(0.0, 0.0, 2.0, 6.0 * t),
            Derivative::Jerk => RowVector4::new(0.0, 0.0, 0.0, 6.0),
        }
    }
}

/// The uniform cubic B-spline basis matrix.
pub fn basis_matrix() -> Matrix4<f64> {
    Matrix4::new(
        1.0, 4.0, 1.0, 0.0, //
        -3.0, 0.0, 3.0, 0.0, //
        3.0, -6.0, 3.0, 0.0, //
        -1.0, 3.0, -3.0, 1.0,
    ) / 6.0
}

/// Blending weights for the four control points of a segment.
///
/// `t` must already be normalised to `[0, 1]`; it is never clamped.
pub fn weights(t: f64, derivative: Derivative) -> Result<[f64; 4]> {
    if !(0.0..=1.0).contains(&t) {
        return Err(SplineError::ParameterOutOfRange(t));
    }
    Ok(blend(t, derivative))
}

pub(crate) fn blend(t: f64, derivative: Derivative) -> [f64; 4] {
    let b = derivative.monomials(t) * basis_matrix();
    [b[0], b[1], b[2], b[3]]
}
