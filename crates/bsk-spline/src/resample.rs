//! Equidistant resampling: move the knots until consecutive knots are equally
//! far apart along the curve.
//!
//! A pass walks the curve once, dropping a new knot every `L / m` of arc
//! length (`m` spans, see [`Boundary::spacing_divisor`]). The new knots change
//! the curve, so passes repeat until they stop moving.
//!
//! A knot is dropped as soon as the walked length reaches its target, with
//! no overshoot allowance; the parameter is then interpolated inside the
//! sample span that crossed it.
//!
//! [`Boundary::spacing_divisor`]: crate::boundary::Boundary::spacing_divisor

use bsk_core::{Result, SplineError};
use bsk_math::Point;
use serde::{Deserialize, Serialize};

use crate::basis::Derivative;
use crate::curve::Curve;

/// Tuning of the resampling loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResampleSettings {
    /// Crossings closer than this to a segment start snap onto that start.
    pub snap_threshold: f64,
    /// Passes stop once the knots move less than this (Euclidean norm over all knots).
    pub convergence: f64,
    pub max_passes: usize,
}

impl ResampleSettings {
    pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.01;
    pub const DEFAULT_CONVERGENCE: f64 = 0.1;
    pub const DEFAULT_MAX_PASSES: usize = 100;
}

impl Default for ResampleSettings {
    fn default() -> Self {
        Self {
            snap_threshold: Self::DEFAULT_SNAP_THRESHOLD,
            convergence: Self::DEFAULT_CONVERGENCE,
            max_passes: Self::DEFAULT_MAX_PASSES,
        }
    }
}

/// Outcome of a converged [`Curve::resample`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResampleReport {
    pub passes: usize,
    /// Knot displacement of the final pass.
    pub delta: f64,
}

/// Resampling passes as an iterator of knot displacements.
///
/// Ends after the first pass below the convergence threshold or the first
/// error. It never ends on its own otherwise; bound it with `take`.
pub struct ResamplePasses<'a, const D: usize> {
    curve: &'a mut Curve<D>,
    done: bool,
}

impl<const D: usize> Iterator for ResamplePasses<'_, D> {
    type Item = Result<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let step = self.curve.resample_step();
        match step {
            Ok(delta) if delta >= self.curve.resample_settings().convergence => {}
            _ => self.done = true,
        }
        Some(step)
    }
}

impl<const D: usize> Curve<D> {
    /// Resample until the knots settle.
    ///
    /// Gives up after `max_passes` with [`SplineError::NonConvergence`]; the
    /// curve keeps the knots of the last pass.
    pub fn resample(&mut self) -> Result<ResampleReport> {
        if !self.is_ready() {
            return Err(SplineError::NotReady {
                count: self.knot_count(),
            });
        }
        let ResampleSettings {
            convergence,
            max_passes,
            ..
        } = self.resample_settings();
        let mut report = ResampleReport {
            passes: 0,
            delta: f64::INFINITY,
        };
        let mut converged = false;
        for (i, step) in self.resample_passes().take(max_passes).enumerate() {
            let delta = step?;
            log::debug!("resample pass {}: knots moved by {delta}", i + 1);
            report = ResampleReport {
                passes: i + 1,
                delta,
            };
            converged = delta < convergence;
        }
        if converged {
            Ok(report)
        } else {
            log::warn!(
                "resampling stopped after {} passes, last change {}",
                report.passes,
                report.delta
            );
            Err(SplineError::NonConvergence {
                passes: report.passes,
                delta: report.delta,
            })
        }
    }

    pub fn resample_passes(&mut self) -> ResamplePasses<'_, D> {
        ResamplePasses {
            curve: self,
            done: false,
        }
    }

    /// One resampling pass. Returns how far the knots moved.
    pub fn resample_step(&mut self) -> Result<f64> {
        let n = self.knot_count();
        if !self.is_ready() {
            return Err(SplineError::NotReady { count: n });
        }
        let boundary = self.boundary();
        let spacing = self.length() / boundary.spacing_divisor(n) as f64;
        if spacing <= 0.0 || !spacing.is_finite() {
            // Every knot coincides; nothing to spread out
            return Ok(0.0);
        }

        let old = self.knots().to_vec();
        let wanted = if boundary.pins_last() { n - 1 } else { n };
        let knots = self.equidistant_knots(&old, spacing, wanted);

        let delta = knots
            .iter()
            .zip(&old)
            .map(|(a, b)| (a - b).norm_squared())
            .sum::<f64>()
            .sqrt();
        self.set_knots(knots)?;
        Ok(delta)
    }

    /// Walk the curve from its first knot and drop a knot every `spacing`,
    /// up to `wanted` knots (the first one included). The last knot of an
    /// open curve is appended unchanged.
    fn equidistant_knots(&self, old: &[Point<D>], spacing: f64, wanted: usize) -> Vec<Point<D>> {
        let n = old.len();
        let boundary = self.boundary();
        let snap = self.resample_settings().snap_threshold;
        let lod = self.lod() as f64;

        let mut knots = Vec::with_capacity(n);
        knots.push(old[0]);

        let mut walked = 0.0;
        let mut target = spacing;
        'walk: for segment in boundary.resample_walk(n) {
            let mut prev = self.blend_segment(segment, 0.0, Derivative::Position);
            for k in 1..=self.lod() {
                let p = self.blend_segment(segment, k as f64 / lod, Derivative::Position);
                let step = (p - prev).norm();
                // walked < target always holds here, so step > 0 inside the loop
                while walked + step >= target {
                    if knots.len() == wanted {
                        break 'walk;
                    }
                    let t = ((k - 1) as f64 + (target - walked) / step) / lod;
                    let knot = if t < snap {
                        match boundary.knot_at_segment_start(segment, n) {
                            Some(i) => old[i],
                            None => self.blend_segment(segment, 0.0, Derivative::Position),
                        }
                    } else {
                        self.blend_segment(segment, t.min(1.0), Derivative::Position)
                    };
                    knots.push(knot);
                    target += spacing;
                }
                walked += step;
                prev = p;
            }
        }

        if knots.len() < wanted {
            log::warn!(
                "resampling placed {} of {} knots, keeping the rest",
                knots.len(),
                wanted
            );
            let placed = knots.len();
            knots.extend_from_slice(&old[placed..wanted]);
        }
        if boundary.pins_last() {
            knots.push(old[n - 1]);
        }
        knots
    }
}
