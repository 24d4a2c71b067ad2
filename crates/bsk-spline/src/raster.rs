//! Rasterization of planar curves to an 8-connected pixel path.

use bsk_math::convert::round_to_lattice;
use bsk_math::lattice::walk_line;
use glam::IVec2;

use crate::curve::Curve;

impl Curve<2> {
    /// Pixel path of the whole curve.
    ///
    /// Samples are rounded to the lattice and gaps between consecutive
    /// samples are filled with Bresenham lines, so neighbouring pixels differ
    /// by at most one on each axis. Empty while the curve is not ready.
    pub fn rasterize(&self) -> Vec<IVec2> {
        let samples = self.sample();
        let Some((first, rest)) = samples.split_first() else {
            log::debug!("rasterize: curve not ready");
            return Vec::new();
        };

        let mut last = round_to_lattice(first);
        let mut path = vec![last];
        for p in rest {
            let pixel = round_to_lattice(p);
            if pixel != last {
                walk_line(last, pixel, &mut path);
                last = pixel;
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::Topology;
    use bsk_math::lattice::is_eight_connected;
    use bsk_math::Point2;

    fn blob() -> Vec<Point2> {
        vec![
            Point2::new(10.0, 10.0),
            Point2::new(120.0, 30.0),
            Point2::new(90.0, 140.0),
            Point2::new(20.0, 90.0),
            Point2::new(60.0, 60.0),
        ]
    }

    #[test]
    fn test_path_is_eight_connected() {
        for topology in [Topology::Open, Topology::Closed] {
            let mut curve = Curve::from_knots(topology, blob()).unwrap();
            // A coarse LOD leaves gaps the line walker has to fill
            curve.set_lod(3).unwrap();
            let path = curve.rasterize();
            assert!(path.len() > 100);
            assert!(is_eight_connected(&path));
            assert!(path.windows(2).all(|w| w[0] != w[1]));
        }
    }

    #[test]
    fn test_open_path_ends_on_end_knots() {
        let curve = Curve::from_knots(Topology::Open, blob()).unwrap();
        let path = curve.rasterize();
        assert_eq!(path[0], IVec2::new(10, 10));
        assert_eq!(*path.last().unwrap(), IVec2::new(60, 60));
    }

    #[test]
    fn test_not_ready_is_empty() {
        let curve = Curve::from_knots(Topology::Open, blob()[..3].to_vec()).unwrap();
        assert!(curve.rasterize().is_empty());
    }

    #[test]
    fn test_single_pixel_curve() {
        let curve = Curve::from_knots(Topology::Closed, vec![Point2::new(0.2, 0.1); 4]).unwrap();
        assert_eq!(curve.rasterize(), vec![IVec2::ZERO]);
    }
}
