/// Numeric tolerances shared by the solvers and the invariant checks.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Smallest pivot magnitude accepted by the banded solvers
    pub pivot: f64,
    /// Absolute epsilon for comparing reconstructed points
    pub comparison: f64,
}

impl Tolerance {
    pub const DEFAULT_PIVOT: f64 = 1e-12;
    pub const DEFAULT_COMPARISON: f64 = 1e-9;

    pub fn new(pivot: f64, comparison: f64) -> Self {
        Self { pivot, comparison }
    }

    pub fn default_precision() -> Self {
        Self {
            pivot: Self::DEFAULT_PIVOT,
            comparison: Self::DEFAULT_COMPARISON,
        }
    }

    pub fn loose() -> Self {
        Self {
            pivot: 1e-9,
            comparison: 1e-6,
        }
    }

    /// Check if two values are equal within the comparison tolerance
    pub fn approx_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.comparison
    }

    /// Check if a pivot is too small to divide by
    pub fn is_degenerate_pivot(self, v: f64) -> bool {
        !v.is_finite() || v.abs() < self.pivot
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
