//! Arc length by dense polyline sampling.

use std::ops::RangeInclusive;

use bsk_core::{Result, SplineError};
use bsk_math::Point;

use crate::basis::Derivative;
use crate::curve::Curve;

impl<const D: usize> Curve<D> {
    /// Segments that together make up the whole curve.
    ///
    /// Open curves run from segment -1 (the clamped start) to `n - 1`;
    /// closed curves from 0 to `n - 1`, the last one being the wrap segment.
    pub fn segment_range(&self) -> RangeInclusive<isize> {
        self.boundary().segment_range(self.knot_count())
    }

    /// Length of the curve between knot `start` and knot `end`.
    pub fn try_length_between(&self, start: isize, end: isize) -> Result<f64> {
        let n = self.knot_count();
        if !self.is_ready() {
            return Err(SplineError::NotReady { count: n });
        }
        if start < 0 || start > end || end > n as isize - 1 {
            return Err(SplineError::SegmentOutOfRange {
                start,
                end,
                count: n,
            });
        }
        let span = self.boundary().span_segments(start, end, n);
        Ok(span.map(|s| self.segment_length(s)).sum())
    }

    /// Like [`Curve::try_length_between`], but an invalid request yields 0.
    pub fn length_between(&self, start: isize, end: isize) -> f64 {
        match self.try_length_between(start, end) {
            Ok(len) => len,
            Err(e @ SplineError::NotReady { .. }) => {
                log::debug!("length_between({start}, {end}): {e}");
                0.0
            }
            Err(e) => {
                log::warn!("length_between({start}, {end}): {e}");
                0.0
            }
        }
    }

    pub fn try_length(&self) -> Result<f64> {
        if !self.is_ready() {
            return Err(SplineError::NotReady {
                count: self.knot_count(),
            });
        }
        Ok(self.segment_range().map(|s| self.segment_length(s)).sum())
    }

    /// Total length of the curve, 0 while not ready.
    pub fn length(&self) -> f64 {
        self.try_length().unwrap_or_else(|e| {
            log::debug!("length: {e}");
            0.0
        })
    }

    /// Total length divided by the number of knot-to-knot spans `n - 1`.
    pub fn average_segment_length(&self) -> f64 {
        if !self.is_ready() {
            return 0.0;
        }
        self.length() / (self.knot_count() - 1) as f64
    }

    /// Dense polyline through the whole curve, `lod` samples per segment.
    ///
    /// Neighbouring segments share their joint, which is emitted once.
    pub fn sample(&self) -> Vec<Point<D>> {
        if !self.is_ready() {
            return Vec::new();
        }
        let lod = self.lod();
        let mut out = Vec::with_capacity(self.segment_range().count() * lod + 1);
        for (i, segment) in self.segment_range().enumerate() {
            let first = if i == 0 { 0 } else { 1 };
            out.extend((first..=lod).map(|k| {
                self.blend_segment(segment, k as f64 / lod as f64, Derivative::Position)
            }));
        }
        out
    }

    fn segment_length(&self, segment: isize) -> f64 {
        let lod = self.lod();
        let mut prev = self.blend_segment(segment, 0.0, Derivative::Position);
        let mut len = 0.0;
        for k in 1..=lod {
            let p = self.blend_segment(segment, k as f64 / lod as f64, Derivative::Position);
            len += (p - prev).norm();
            prev = p;
        }
        len
    }
}
