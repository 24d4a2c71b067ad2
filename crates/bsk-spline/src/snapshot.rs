//! Plain value export of a curve for collaborators that store or ship it.

use bsk_core::Result;
use bsk_math::Point;
use serde::{Deserialize, Serialize};

use crate::boundary::Topology;
use crate::curve::Curve;

/// Everything needed to rebuild a curve. Controls are not stored; they are
/// re-derived from the knots on import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSnapshot<const D: usize> {
    pub topology: Topology,
    pub lod: usize,
    pub knots: Vec<Point<D>>,
}

impl<const D: usize> Curve<D> {
    pub fn snapshot(&self) -> CurveSnapshot<D> {
        CurveSnapshot {
            topology: self.topology(),
            lod: self.lod(),
            knots: self.knots().to_vec(),
        }
    }

    pub fn from_snapshot(snapshot: CurveSnapshot<D>) -> Result<Self> {
        let mut curve = Curve::from_knots(snapshot.topology, snapshot.knots)?;
        curve.set_lod(snapshot.lod)?;
        Ok(curve)
    }
}

impl<const D: usize> From<&Curve<D>> for CurveSnapshot<D> {
    fn from(curve: &Curve<D>) -> Self {
        curve.snapshot()
    }
}
