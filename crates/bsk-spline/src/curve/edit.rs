//! Mutations. Each one edits a copy of one sequence, re-derives the other
//! and commits both, so a failed reconversion leaves the curve untouched.

use bsk_core::{Result, SplineError};
use bsk_math::Point;

use super::{Curve, MIN_POINTS};
use crate::boundary::Topology;

/// Clamp an insertion index into `0..=len`.
fn insertion_slot(index: isize, len: usize) -> usize {
    if index <= 0 {
        0
    } else {
        (index as usize).min(len)
    }
}

impl<const D: usize> Curve<D> {
    pub fn set_topology(&mut self, topology: Topology) -> Result<()> {
        let previous = self.boundary;
        self.boundary = topology.boundary();
        let knots = std::mem::take(&mut self.knots);
        match self.derive_controls(&knots) {
            Ok(controls) => {
                self.knots = knots;
                self.controls = controls;
                Ok(())
            }
            Err(e) => {
                self.boundary = previous;
                self.knots = knots;
                Err(e)
            }
        }
    }

    // ── Knot side ───────────────────────────────────────────────────

    pub fn push_knot(&mut self, point: Point<D>) -> Result<()> {
        self.edit_knots(|knots| {
            knots.push(point);
            Ok(())
        })
    }

    pub fn push_front_knot(&mut self, point: Point<D>) -> Result<()> {
        self.edit_knots(|knots| {
            knots.insert(0, point);
            Ok(())
        })
    }

    /// Insert before `index`; indices below zero insert at the front, indices
    /// at or past the end append.
    pub fn insert_knot(&mut self, index: isize, point: Point<D>) -> Result<()> {
        self.edit_knots(|knots| {
            let slot = insertion_slot(index, knots.len());
            knots.insert(slot, point);
            Ok(())
        })
    }

    pub fn pop_knot(&mut self) -> Result<Point<D>> {
        self.edit_knots(|knots| knots.pop().ok_or(SplineError::Empty))
    }

    pub fn pop_front_knot(&mut self) -> Result<Point<D>> {
        self.edit_knots(|knots| {
            if knots.is_empty() {
                Err(SplineError::Empty)
            } else {
                Ok(knots.remove(0))
            }
        })
    }

    /// Remove the knot at the resolved `index`.
    pub fn remove_knot(&mut self, index: isize) -> Result<Point<D>> {
        let boundary = self.boundary;
        self.edit_knots(|knots| {
            if knots.is_empty() {
                return Err(SplineError::Empty);
            }
            let at = boundary.resolve(index, knots.len());
            Ok(knots.remove(at))
        })
    }

    /// Replace the knot at the resolved `index`.
    pub fn set_knot(&mut self, index: isize, point: Point<D>) -> Result<()> {
        let boundary = self.boundary;
        self.edit_knots(|knots| {
            if knots.is_empty() {
                return Err(SplineError::Empty);
            }
            let at = boundary.resolve(index, knots.len());
            knots[at] = point;
            Ok(())
        })
    }

    /// Replace the whole knot sequence.
    pub fn set_knots(&mut self, points: Vec<Point<D>>) -> Result<()> {
        let controls = self.derive_controls(&points)?;
        self.knots = points;
        self.controls = controls;
        Ok(())
    }

    // ── Control side ────────────────────────────────────────────────

    pub fn push_control(&mut self, point: Point<D>) -> Result<()> {
        self.edit_controls(|controls| {
            controls.push(point);
            Ok(())
        })
    }

    pub fn push_front_control(&mut self, point: Point<D>) -> Result<()> {
        self.edit_controls(|controls| {
            controls.insert(0, point);
            Ok(())
        })
    }

    pub fn insert_control(&mut self, index: isize, point: Point<D>) -> Result<()> {
        self.edit_controls(|controls| {
            let slot = insertion_slot(index, controls.len());
            controls.insert(slot, point);
            Ok(())
        })
    }

    pub fn pop_control(&mut self) -> Result<Point<D>> {
        self.edit_controls(|controls| controls.pop().ok_or(SplineError::Empty))
    }

    pub fn pop_front_control(&mut self) -> Result<Point<D>> {
        self.edit_controls(|controls| {
            if controls.is_empty() {
                Err(SplineError::Empty)
            } else {
                Ok(controls.remove(0))
            }
        })
    }

    pub fn remove_control(&mut self, index: isize) -> Result<Point<D>> {
        let boundary = self.boundary;
        self.edit_controls(|controls| {
            if controls.is_empty() {
                return Err(SplineError::Empty);
            }
            let at = boundary.resolve(index, controls.len());
            Ok(controls.remove(at))
        })
    }

    pub fn set_control(&mut self, index: isize, point: Point<D>) -> Result<()> {
        let boundary = self.boundary;
        self.edit_controls(|controls| {
            if controls.is_empty() {
                return Err(SplineError::Empty);
            }
            let at = boundary.resolve(index, controls.len());
            controls[at] = point;
            Ok(())
        })
    }

    pub fn set_controls(&mut self, points: Vec<Point<D>>) -> Result<()> {
        self.knots = self.derive_knots(&points)?;
        self.controls = points;
        Ok(())
    }

    // ── Reconversion ────────────────────────────────────────────────

    fn edit_knots<R>(&mut self, edit: impl FnOnce(&mut Vec<Point<D>>) -> Result<R>) -> Result<R> {
        let mut knots = self.knots.clone();
        let out = edit(&mut knots)?;
        self.set_knots(knots)?;
        Ok(out)
    }

    fn edit_controls<R>(
        &mut self,
        edit: impl FnOnce(&mut Vec<Point<D>>) -> Result<R>,
    ) -> Result<R> {
        let mut controls = self.controls.clone();
        let out = edit(&mut controls)?;
        self.set_controls(controls)?;
        Ok(out)
    }

    /// Below [`MIN_POINTS`] no relation exists and controls mirror the knots.
    fn derive_controls(&self, knots: &[Point<D>]) -> Result<Vec<Point<D>>> {
        if knots.len() < MIN_POINTS {
            return Ok(knots.to_vec());
        }
        self.boundary.to_controls(knots, self.tolerance)
    }

    fn derive_knots(&self, controls: &[Point<D>]) -> Result<Vec<Point<D>>> {
        if controls.len() < MIN_POINTS {
            return Ok(controls.to_vec());
        }
        self.boundary.to_knots(controls)
    }
}
