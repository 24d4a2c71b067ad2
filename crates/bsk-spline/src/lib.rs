//! Uniform cubic B-spline kernel: paired knot and control sequences, open
//! and closed topologies, evaluation, arc length, equidistant resampling and
//! rasterization.

pub mod basis;
pub mod boundary;
pub mod curve;
pub mod length;
pub mod raster;
pub mod resample;
pub mod snapshot;

pub use basis::Derivative;
pub use boundary::{relation_matrix, Boundary, Topology};
pub use curve::{Curve, MIN_POINTS};
pub use resample::{ResamplePasses, ResampleReport, ResampleSettings};
pub use snapshot::CurveSnapshot;

pub use bsk_core::traits::{BoundingBox, Validate};
pub use bsk_core::{Result, SplineError, Tolerance};
pub use bsk_math::{Bounds, Point, Point2, Point3};
