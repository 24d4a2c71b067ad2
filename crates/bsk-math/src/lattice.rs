//! Integer lattice paths.

use glam::IVec2;

/// Append the lattice points of the segment `from -> to` to `path`, excluding
/// `from` itself, using Bresenham's all-octant stepping.
///
/// Every appended point is a king's move away from its predecessor, so a
/// path built from consecutive calls stays 8-connected.
pub fn walk_line(from: IVec2, to: IVec2, path: &mut Vec<IVec2>) {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = (to.x - from.x).signum();
    let sy = (to.y - from.y).signum();

    let mut err = dx + dy;
    let mut p = from;
    while p != to {
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            p.x += sx;
        }
        if e2 <= dx {
            err += dx;
            p.y += sy;
        }
        if path.last() != Some(&p) {
            path.push(p);
        }
    }
}

/// Whether every pair of consecutive points differs by at most one step on each axis.
pub fn is_eight_connected(path: &[IVec2]) -> bool {
    path.windows(2).all(|w| {
        let d = (w[1] - w[0]).abs();
        d.x <= 1 && d.y <= 1
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_horizontal() {
        let mut path = vec![IVec2::new(0, 0)];
        walk_line(IVec2::new(0, 0), IVec2::new(3, 0), &mut path);
        assert_eq!(
            path,
            vec![
                IVec2::new(0, 0),
                IVec2::new(1, 0),
                IVec2::new(2, 0),
                IVec2::new(3, 0)
            ]
        );
    }

    #[test]
    fn test_walk_steep_negative() {
        let from = IVec2::new(2, 5);
        let to = IVec2::new(-1, -4);
        let mut path = vec![from];
        walk_line(from, to, &mut path);
        // One point per step along the major (y) axis
        assert_eq!(path.len(), 10);
        assert_eq!(*path.last().unwrap(), to);
        assert!(is_eight_connected(&path));
    }

    #[test]
    fn test_walk_same_point() {
        let mut path = vec![IVec2::new(4, 4)];
        walk_line(IVec2::new(4, 4), IVec2::new(4, 4), &mut path);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_is_eight_connected() {
        assert!(is_eight_connected(&[IVec2::ZERO, IVec2::ONE, IVec2::new(2, 1)]));
        assert!(!is_eight_connected(&[IVec2::ZERO, IVec2::new(2, 0)]));
        assert!(is_eight_connected(&[]));
    }
}
