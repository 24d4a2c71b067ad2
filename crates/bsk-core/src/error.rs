use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplineError {
    #[error("Curve not ready: {count} points, at least 4 required")]
    NotReady { count: usize },

    #[error("Parameter out of range: t = {0} is not normalised to [0, 1]")]
    ParameterOutOfRange(f64),

    #[error("Segment range out of range: {start}..={end} for {count} points")]
    SegmentOutOfRange {
        start: isize,
        end: isize,
        count: usize,
    },

    #[error("Curve has no points")]
    Empty,

    #[error("Singular relation: {0}")]
    SingularRelation(String),

    #[error("Resampling did not converge after {passes} passes (last change {delta})")]
    NonConvergence { passes: usize, delta: f64 },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Invalid level of detail: {0}")]
    InvalidLod(usize),
}

pub type Result<T> = std::result::Result<T, SplineError>;
