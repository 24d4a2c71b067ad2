pub mod banded;
pub mod bounds;
pub mod convert;
pub mod lattice;

pub use glam::{DVec2, IVec2};
pub use nalgebra::{DMatrix, SVector};
pub use bounds::Bounds;

/// A point or vector with `D` components.
pub type Point<const D: usize> = SVector<f64, D>;
pub type Point2 = Point<2>;
pub type Point3 = Point<3>;
