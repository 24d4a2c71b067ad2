//! Conversions between kernel points and glam vectors.

use glam::{DVec2, IVec2};

use crate::Point2;

pub fn to_dvec2(p: &Point2) -> DVec2 {
    DVec2::new(p.x, p.y)
}

/// Round a 2D point to the nearest lattice point (halves away from zero).
pub fn round_to_lattice(p: &Point2) -> IVec2 {
    to_dvec2(p).round().as_ivec2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dvec2() {
        let q = Point2::new(3.0, 4.0);
        assert_eq!(to_dvec2(&q), DVec2::new(3.0, 4.0));
        assert_eq!(to_dvec2(&q).length(), 5.0);
    }

    #[test]
    fn test_round_to_lattice() {
        assert_eq!(round_to_lattice(&Point2::new(0.4, 0.6)), IVec2::new(0, 1));
        assert_eq!(round_to_lattice(&Point2::new(-0.5, 2.5)), IVec2::new(-1, 3));
    }
}
