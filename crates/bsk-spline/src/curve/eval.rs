use bsk_core::{Result, SplineError};
use bsk_math::Point;

use super::{Curve, MIN_POINTS};
use crate::basis::{self, Derivative};

impl<const D: usize> Curve<D> {
    /// Evaluate segment `segment` at the normalised parameter `t`.
    ///
    /// The segment blends the controls at `segment - 1 ..= segment + 2`,
    /// resolved through the curve's boundary rule.
    pub fn try_evaluate(&self, segment: isize, t: f64, derivative: Derivative) -> Result<Point<D>> {
        if self.controls.len() < MIN_POINTS {
            return Err(SplineError::NotReady {
                count: self.controls.len(),
            });
        }
        let weights = basis::weights(t, derivative)?;
        Ok(self.blend_weights(segment, &weights))
    }

    /// Like [`Curve::try_evaluate`], but reports failures through the log and
    /// yields the zero vector instead.
    pub fn evaluate(&self, segment: isize, t: f64, derivative: Derivative) -> Point<D> {
        match self.try_evaluate(segment, t, derivative) {
            Ok(p) => p,
            Err(e @ SplineError::NotReady { .. }) => {
                log::debug!("evaluate({segment}, {t}): {e}");
                Point::zeros()
            }
            Err(e) => {
                log::warn!("evaluate({segment}, {t}): {e}");
                Point::zeros()
            }
        }
    }

    /// Position on segment `segment` at `t`.
    pub fn position(&self, segment: isize, t: f64) -> Point<D> {
        self.evaluate(segment, t, Derivative::Position)
    }

    /// Unchecked blend for callers that already hold a ready curve and a
    /// parameter inside `[0, 1]`.
    pub(crate) fn blend_segment(&self, segment: isize, t: f64, derivative: Derivative) -> Point<D> {
        self.blend_weights(segment, &basis::blend(t, derivative))
    }

    fn blend_weights(&self, segment: isize, weights: &[f64; 4]) -> Point<D> {
        let n = self.controls.len();
        let mut p = Point::<D>::zeros();
        for (offset, w) in (-1isize..=2).zip(weights) {
            let idx = self.boundary.resolve(segment + offset, n);
            p += self.controls[idx] * *w;
        }
        p
    }
}
