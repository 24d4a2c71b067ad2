use approx::assert_relative_eq;
use bsk_spline::{
    BoundingBox, Curve, CurveSnapshot, Derivative, Point2, Point3, SplineError, Topology, Validate,
};

fn p2(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

fn spiral(n: usize) -> Vec<Point3> {
    (0..n)
        .map(|i| {
            let a = i as f64 * 0.7;
            Point3::new(a.cos() * (10.0 + i as f64), a.sin() * (10.0 + i as f64), i as f64 * 2.5)
        })
        .collect()
}

#[test]
fn test_unit_square_scenario() {
    let mut curve = Curve::from_controls(
        Topology::Open,
        vec![p2(0.0, 0.0), p2(1.0, 0.0), p2(1.0, 1.0), p2(0.0, 1.0)],
    )
    .unwrap();
    curve.set_lod(4).unwrap();

    let knot = curve.knot(1).unwrap();
    assert_relative_eq!(knot.x, 5.0 / 6.0, epsilon = 1e-12);
    assert_relative_eq!(knot.y, 1.0 / 6.0, epsilon = 1e-12);

    let p = curve.evaluate(1, 0.0, Derivative::Position);
    assert_relative_eq!(p.x, knot.x, epsilon = 1e-12);
    assert_relative_eq!(p.y, knot.y, epsilon = 1e-12);

    let length = curve.length();
    assert!(length.is_finite());
    assert!(length > 0.0);
    // Shorter than the control polygon
    assert!(length < 3.0);
    curve.validate().unwrap();
}

#[test]
fn test_duality_round_trip() {
    for topology in [Topology::Open, Topology::Closed] {
        let knots = spiral(8);
        let curve = Curve::from_knots(topology, knots.clone()).unwrap();
        let back = Curve::from_controls(topology, curve.controls().to_vec()).unwrap();
        for (a, b) in back.knots().iter().zip(&knots) {
            assert!((a - b).norm() < 1e-9, "{} round trip drifted", topology);
        }
        curve.validate().unwrap();
        back.validate().unwrap();
    }
}

#[test]
fn test_open_ends_are_clamped() {
    let curve = Curve::from_knots(Topology::Open, spiral(6)).unwrap();
    assert_eq!(curve.first_knot(), curve.first_control());
    assert_eq!(curve.last_knot(), curve.last_control());
    // Interior controls differ from the knots they produce
    assert_ne!(curve.knot(2), curve.control(2));
}

#[test]
fn test_closed_wrap_invariance() {
    let curve = Curve::from_knots(Topology::Closed, spiral(7)).unwrap();
    for i in -14isize..14 {
        assert_eq!(curve.resolve(i), curve.resolve(i + 7));
        let a = curve.position(i, 0.3);
        let b = curve.position(i + 7, 0.3);
        assert!((a - b).norm() < 1e-12);
    }
}

#[test]
fn test_not_ready_curves_yield_zero() {
    let mut curve = Curve::<2>::new();
    for i in 0..4 {
        for t in [0.0, 0.25, 1.0] {
            assert_eq!(curve.position(1, t), Point2::zeros());
        }
        assert_eq!(curve.length(), 0.0);
        assert!(curve.rasterize().is_empty());
        curve.push_knot(p2(i as f64, (i * i) as f64)).unwrap();
    }
    assert!(curve.is_ready());
    assert_ne!(curve.length(), 0.0);
}

#[test]
fn test_every_mutation_keeps_lengths_equal() {
    let mut curve = Curve::with_topology(Topology::Closed);
    for p in spiral(6) {
        curve.push_front_knot(p).unwrap();
        assert_eq!(curve.knot_count(), curve.control_count());
    }
    curve.insert_control(2, Point3::new(1.0, 1.0, 1.0)).unwrap();
    curve.remove_knot(-2).unwrap();
    curve.set_control(9, Point3::zeros()).unwrap();
    curve.pop_front_control().unwrap();
    assert_eq!(curve.knot_count(), 5);
    assert_eq!(curve.control_count(), 5);
    curve.validate().unwrap();
}

#[test]
fn test_length_matches_full_span() {
    for topology in [Topology::Open, Topology::Closed] {
        let curve = Curve::from_knots(topology, spiral(9)).unwrap();
        assert_relative_eq!(curve.length(), curve.length_between(0, 8), epsilon = 1e-9);
        for start in 0..8 {
            for end in start..9 {
                assert!(curve.length_between(start, end) >= 0.0);
            }
        }
    }
}

#[test]
fn test_bounding_box_contains_knots() {
    let curve = Curve::from_knots(Topology::Closed, spiral(6)).unwrap();
    let bounds = curve.bounding_box().unwrap();
    for k in curve.knots() {
        assert!(bounds.expand(1e-9).contains_point(k));
    }
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut curve = Curve::from_knots(Topology::Closed, vec![
        p2(0.0, 0.0),
        p2(4.0, 0.0),
        p2(4.0, 3.0),
        p2(0.0, 3.0),
    ])
    .unwrap();
    curve.set_lod(20).unwrap();

    let json = serde_json::to_string(&curve.snapshot()).unwrap();
    let snapshot: CurveSnapshot<2> = serde_json::from_str(&json).unwrap();
    let restored = Curve::from_snapshot(snapshot).unwrap();

    assert_eq!(restored.topology(), Topology::Closed);
    assert_eq!(restored.lod(), 20);
    assert_eq!(restored.knots(), curve.knots());
    assert_relative_eq!(restored.length(), curve.length(), epsilon = 1e-12);
}

#[test]
fn test_evaluate_rejects_unnormalised_parameter() {
    let curve = Curve::from_knots(Topology::Open, spiral(5)).unwrap();
    assert_eq!(
        curve.try_evaluate(0, 1.5, Derivative::Position),
        Err(SplineError::ParameterOutOfRange(1.5))
    );
    assert_eq!(curve.evaluate(0, -0.1, Derivative::Velocity), Point3::zeros());
}
