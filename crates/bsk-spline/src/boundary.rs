//! Curve topology and the boundary strategies behind it.
//!
//! Everything that differs between an open and a closed curve (index
//! resolution, the relation matrix, which segments make up the curve) lives
//! behind [`Boundary`]. A curve picks its strategy once, when its topology is
//! set.

use std::fmt;
use std::ops::RangeInclusive;

use bsk_core::{Result, Tolerance};
use bsk_math::banded::{self, Stencil};
use bsk_math::{DMatrix, Point};
use serde::{Deserialize, Serialize};

/// Interior row of the knot/control relation.
pub const RELATION_STENCIL: Stencil = Stencil::new(1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Topology {
    #[default]
    Open,
    Closed,
}

impl Topology {
    pub fn label(self) -> &'static str {
        match self {
            Topology::Open => "Open B-spline",
            Topology::Closed => "Closed B-spline",
        }
    }

    pub fn boundary<const D: usize>(self) -> &'static dyn Boundary<D> {
        match self {
            Topology::Open => &OpenBoundary,
            Topology::Closed => &ClosedBoundary,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dense `n × n` relation matrix with `knots = R · controls`.
pub fn relation_matrix(topology: Topology, n: usize) -> DMatrix<f64> {
    // Rows do not depend on the point dimension
    topology.boundary::<1>().relation_matrix(n)
}

/// Topology-specific index, relation and segment rules for `n` points.
pub trait Boundary<const D: usize>: fmt::Debug + Send + Sync {
    fn topology(&self) -> Topology;

    /// Map a logical point index (possibly negative or past the end) onto storage.
    fn resolve(&self, index: isize, n: usize) -> usize;

    /// Non-zero entries `(column, weight)` of row `row` of the relation matrix.
    fn relation_row(&self, row: usize, n: usize) -> Vec<(usize, f64)>;

    /// `knots = R · controls`.
    fn to_knots(&self, controls: &[Point<D>]) -> Result<Vec<Point<D>>>;

    /// Solve `R · controls = knots`.
    fn to_controls(&self, knots: &[Point<D>], tol: Tolerance) -> Result<Vec<Point<D>>>;

    /// Segments that make up the whole curve.
    fn segment_range(&self, n: usize) -> RangeInclusive<isize>;

    /// Segments sampled for the span request `start..=end`.
    fn span_segments(&self, start: isize, end: isize, n: usize) -> RangeInclusive<isize>;

    /// Segments walked by the resampler, beginning at the first knot.
    fn resample_walk(&self, n: usize) -> RangeInclusive<isize>;

    /// Number of equal arcs the resampler divides the curve into.
    fn spacing_divisor(&self, n: usize) -> usize;

    /// Whether the last knot stays fixed while resampling.
    fn pins_last(&self) -> bool;

    /// Knot sitting at parameter 0 of `segment`, if any.
    fn knot_at_segment_start(&self, segment: isize, n: usize) -> Option<usize>;

    fn relation_matrix(&self, n: usize) -> DMatrix<f64> {
        let mut m = DMatrix::zeros(n, n);
        for row in 0..n {
            for (col, w) in self.relation_row(row, n) {
                m[(row, col)] += w;
            }
        }
        m
    }
}

/// Clamped ends: first and last knot coincide with their control points.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenBoundary;

impl OpenBoundary {
    fn bands(n: usize) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let mut sub = vec![RELATION_STENCIL.sub; n];
        let mut diag = vec![RELATION_STENCIL.diag; n];
        let mut sup = vec![RELATION_STENCIL.sup; n];
        for end in [0, n - 1] {
            sub[end] = 0.0;
            diag[end] = 1.0;
            sup[end] = 0.0;
        }
        (sub, diag, sup)
    }
}

impl<const D: usize> Boundary<D> for OpenBoundary {
    fn topology(&self) -> Topology {
        Topology::Open
    }

    fn resolve(&self, index: isize, n: usize) -> usize {
        if n == 0 || index < 0 {
            0
        } else {
            (index as usize).min(n - 1)
        }
    }

    fn relation_row(&self, row: usize, n: usize) -> Vec<(usize, f64)> {
        if row == 0 || row + 1 == n {
            vec![(row, 1.0)]
        } else {
            vec![
                (row - 1, RELATION_STENCIL.sub),
                (row, RELATION_STENCIL.diag),
                (row + 1, RELATION_STENCIL.sup),
            ]
        }
    }

    fn to_knots(&self, controls: &[Point<D>]) -> Result<Vec<Point<D>>> {
        if controls.is_empty() {
            return Ok(Vec::new());
        }
        let (sub, diag, sup) = Self::bands(controls.len());
        banded::apply_tridiagonal(&sub, &diag, &sup, controls)
    }

    fn to_controls(&self, knots: &[Point<D>], tol: Tolerance) -> Result<Vec<Point<D>>> {
        if knots.is_empty() {
            return Ok(Vec::new());
        }
        let (sub, diag, sup) = Self::bands(knots.len());
        let mut controls = knots.to_vec();
        banded::solve_tridiagonal(&sub, &diag, &sup, &mut controls, tol)?;
        Ok(controls)
    }

    fn segment_range(&self, n: usize) -> RangeInclusive<isize> {
        -1..=n as isize - 1
    }

    fn span_segments(&self, start: isize, end: isize, n: usize) -> RangeInclusive<isize> {
        let last = n as isize - 1;
        // Spans touching an end knot also take the clamped terminal segment
        let lo = if start == 0 { -1 } else { start };
        let hi = if end >= last - 1 { last } else { end };
        lo..=hi
    }

    fn resample_walk(&self, n: usize) -> RangeInclusive<isize> {
        <Self as Boundary<D>>::segment_range(self, n)
    }

    fn spacing_divisor(&self, n: usize) -> usize {
        n - 1
    }

    fn pins_last(&self) -> bool {
        true
    }

    fn knot_at_segment_start(&self, segment: isize, n: usize) -> Option<usize> {
        match segment {
            -1 => Some(0),
            s if s >= 1 && s <= n as isize - 2 => Some(s as usize),
            _ => None,
        }
    }
}

/// Cyclic point sequence with a circulant relation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedBoundary;

impl<const D: usize> Boundary<D> for ClosedBoundary {
    fn topology(&self) -> Topology {
        Topology::Closed
    }

    fn resolve(&self, index: isize, n: usize) -> usize {
        if n == 0 {
            0
        } else {
            index.rem_euclid(n as isize) as usize
        }
    }

    fn relation_row(&self, row: usize, n: usize) -> Vec<(usize, f64)> {
        vec![
            (row % n, RELATION_STENCIL.sub),
            ((row + 1) % n, RELATION_STENCIL.diag),
            ((row + 2) % n, RELATION_STENCIL.sup),
        ]
    }

    fn to_knots(&self, controls: &[Point<D>]) -> Result<Vec<Point<D>>> {
        if controls.is_empty() {
            return Ok(Vec::new());
        }
        // Row i is centred on control i + 1
        let mut knots = banded::apply_cyclic(RELATION_STENCIL, controls);
        knots.rotate_left(1);
        Ok(knots)
    }

    fn to_controls(&self, knots: &[Point<D>], tol: Tolerance) -> Result<Vec<Point<D>>> {
        if knots.is_empty() {
            return Ok(Vec::new());
        }
        let mut controls = knots.to_vec();
        controls.rotate_right(1);
        banded::solve_cyclic(RELATION_STENCIL, &mut controls, tol)?;
        Ok(controls)
    }

    fn segment_range(&self, n: usize) -> RangeInclusive<isize> {
        0..=n as isize - 1
    }

    fn span_segments(&self, start: isize, end: isize, _n: usize) -> RangeInclusive<isize> {
        start..=end
    }

    fn resample_walk(&self, n: usize) -> RangeInclusive<isize> {
        1..=n as isize
    }

    fn spacing_divisor(&self, n: usize) -> usize {
        n
    }

    fn pins_last(&self) -> bool {
        false
    }

    fn knot_at_segment_start(&self, segment: isize, n: usize) -> Option<usize> {
        Some(<Self as Boundary<D>>::resolve(self, segment - 1, n))
    }
}
