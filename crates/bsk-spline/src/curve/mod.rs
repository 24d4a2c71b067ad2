//! The curve aggregate: paired knot and control sequences.

mod edit;
mod eval;

use bsk_core::traits::{BoundingBox, Validate};
use bsk_core::{Result, SplineError, Tolerance};
use bsk_math::{Bounds, DMatrix, Point};

use crate::boundary::{Boundary, Topology};
use crate::resample::ResampleSettings;

/// Smallest point count for which the relation and evaluation are defined.
pub const MIN_POINTS: usize = 4;

/// A uniform cubic B-spline in `D` dimensions.
///
/// Knots are the points the curve passes through, controls are the points
/// the cubic basis blends. Both sequences always have the same length and are
/// only changed together: every mutation re-derives the complementary
/// sequence before it returns.
#[derive(Debug, Clone)]
pub struct Curve<const D: usize> {
    boundary: &'static dyn Boundary<D>,
    knots: Vec<Point<D>>,
    controls: Vec<Point<D>>,
    lod: usize,
    tolerance: Tolerance,
    resample: ResampleSettings,
}

impl<const D: usize> Curve<D> {
    pub const DEFAULT_LOD: usize = 100;

    /// An empty open curve.
    pub fn new() -> Self {
        Self::with_topology(Topology::Open)
    }

    pub fn with_topology(topology: Topology) -> Self {
        Self {
            boundary: topology.boundary(),
            knots: Vec::new(),
            controls: Vec::new(),
            lod: Self::DEFAULT_LOD,
            tolerance: Tolerance::default(),
            resample: ResampleSettings::default(),
        }
    }

    pub fn from_knots(topology: Topology, knots: Vec<Point<D>>) -> Result<Self> {
        let mut curve = Self::with_topology(topology);
        curve.set_knots(knots)?;
        Ok(curve)
    }

    pub fn from_controls(topology: Topology, controls: Vec<Point<D>>) -> Result<Self> {
        let mut curve = Self::with_topology(topology);
        curve.set_controls(controls)?;
        Ok(curve)
    }

    pub fn topology(&self) -> Topology {
        self.boundary.topology()
    }

    pub(crate) fn boundary(&self) -> &'static dyn Boundary<D> {
        self.boundary
    }

    pub fn lod(&self) -> usize {
        self.lod
    }

    /// Set the number of samples taken per segment.
    pub fn set_lod(&mut self, lod: usize) -> Result<()> {
        if lod == 0 {
            return Err(SplineError::InvalidLod(lod));
        }
        self.lod = lod;
        Ok(())
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    pub fn resample_settings(&self) -> ResampleSettings {
        self.resample
    }

    pub fn set_resample_settings(&mut self, settings: ResampleSettings) {
        self.resample = settings;
    }

    /// Whether there are enough points to evaluate the curve.
    pub fn is_ready(&self) -> bool {
        self.knots.len() >= MIN_POINTS && self.controls.len() >= MIN_POINTS
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    pub fn knots(&self) -> &[Point<D>] {
        &self.knots
    }

    pub fn controls(&self) -> &[Point<D>] {
        &self.controls
    }

    pub fn knot(&self, index: usize) -> Option<Point<D>> {
        self.knots.get(index).copied()
    }

    pub fn control(&self, index: usize) -> Option<Point<D>> {
        self.controls.get(index).copied()
    }

    pub fn first_knot(&self) -> Option<Point<D>> {
        self.knots.first().copied()
    }

    pub fn last_knot(&self) -> Option<Point<D>> {
        self.knots.last().copied()
    }

    pub fn first_control(&self) -> Option<Point<D>> {
        self.controls.first().copied()
    }

    pub fn last_control(&self) -> Option<Point<D>> {
        self.controls.last().copied()
    }

    /// Map a logical point index onto storage: wraps for closed curves,
    /// clamps for open ones.
    pub fn resolve(&self, index: isize) -> usize {
        self.boundary.resolve(index, self.controls.len())
    }

    /// The dense relation matrix `R` with `knots = R · controls`, once ready.
    pub fn relation_matrix(&self) -> Option<DMatrix<f64>> {
        if self.is_ready() {
            Some(self.boundary.relation_matrix(self.knots.len()))
        } else {
            None
        }
    }

    /// Drop every point. Topology, LOD and settings are kept.
    pub fn clear(&mut self) {
        self.knots.clear();
        self.controls.clear();
    }
}

impl<const D: usize> Default for Curve<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const D: usize> Validate for Curve<D> {
    fn validate(&self) -> Result<()> {
        if self.knots.len() != self.controls.len() {
            return Err(SplineError::InvariantViolation(format!(
                "{} knots but {} controls",
                self.knots.len(),
                self.controls.len()
            )));
        }
        if !self.is_ready() {
            return Ok(());
        }

        let reconstructed = self.boundary.to_knots(&self.controls)?;
        for (i, (k, r)) in self.knots.iter().zip(&reconstructed).enumerate() {
            let scale = 1.0 + k.norm();
            if (k - r).norm() > self.tolerance.comparison * scale {
                return Err(SplineError::InvariantViolation(format!(
                    "knot {i} is not reproduced by the control points"
                )));
            }
        }
        Ok(())
    }
}

impl<const D: usize> BoundingBox for Curve<D> {
    type Bounds = Bounds<D>;

    /// Bounds of the sampled curve, or of the raw points while not ready.
    fn bounding_box(&self) -> Option<Bounds<D>> {
        if self.is_ready() {
            Bounds::from_points(&self.sample())
        } else {
            Bounds::from_points(&self.knots)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsk_math::Point2;

    #[test]
    fn test_new_curve_is_empty_open() {
        let curve = Curve::<2>::new();
        assert!(curve.is_empty());
        assert!(!curve.is_ready());
        assert_eq!(curve.topology(), Topology::Open);
        assert_eq!(curve.lod(), Curve::<2>::DEFAULT_LOD);
        assert!(curve.relation_matrix().is_none());
        curve.validate().unwrap();
    }

    #[test]
    fn test_set_lod_rejects_zero() {
        let mut curve = Curve::<3>::new();
        assert_eq!(curve.set_lod(0), Err(SplineError::InvalidLod(0)));
        curve.set_lod(8).unwrap();
        assert_eq!(curve.lod(), 8);
    }

    #[test]
    fn test_clear_keeps_settings() {
        let mut curve = Curve::with_topology(Topology::Closed);
        curve.set_lod(12).unwrap();
        for p in [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)] {
            curve.push_knot(Point2::new(p.0, p.1)).unwrap();
        }
        assert!(curve.is_ready());
        curve.clear();
        assert!(curve.is_empty());
        assert_eq!(curve.control_count(), 0);
        assert_eq!(curve.lod(), 12);
        assert_eq!(curve.topology(), Topology::Closed);
    }

    #[test]
    fn test_bounding_box_of_unready_curve() {
        let mut curve = Curve::<2>::new();
        assert!(curve.bounding_box().is_none());
        curve.push_knot(Point2::new(1.0, 2.0)).unwrap();
        curve.push_knot(Point2::new(-1.0, 5.0)).unwrap();
        let bounds = curve.bounding_box().unwrap();
        assert_eq!(bounds.min, Point2::new(-1.0, 2.0));
        assert_eq!(bounds.max, Point2::new(1.0, 5.0));
    }
}
