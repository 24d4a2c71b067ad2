use crate::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in `D`-dimensional space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<const D: usize> {
    pub min: Point<D>,
    pub max: Point<D>,
}

impl<const D: usize> Bounds<D> {
    pub fn new(min: Point<D>, max: Point<D>) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: &[Point<D>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.inf(p);
            max = max.sup(p);
        }
        Some(Self { min, max })
    }

    pub fn contains_point(&self, p: &Point<D>) -> bool {
        (0..D).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    pub fn expand(&self, amount: f64) -> Self {
        Self {
            min: self.min.add_scalar(-amount),
            max: self.max.add_scalar(amount),
        }
    }
}
