//! Property checks for the crown kernel.

use crown::prelude::*;
use nalgebra::vector;
use proptest::prelude::*;

fn radius() -> impl Strategy<Value = f64> {
    0.01f64..50.0
}

fn radii() -> impl Strategy<Value = DirectionalRadii> {
    (radius(), radius(), radius(), radius())
        .prop_map(|(n, e, s, w)| DirectionalRadii::new(n, e, s, w).unwrap())
}

proptest! {
    #[test]
    fn interpolated_radius_stays_within_anchor_range(r in radii(), angle in -720.0f64..720.0) {
        let v = interpolate_radius(&r, angle);
        let lo = Bearing::ALL.iter().map(|b| r.get(*b)).fold(f64::INFINITY, f64::min);
        prop_assert!(v >= lo - 1e-9);
        prop_assert!(v <= r.max() + 1e-9);
    }

    #[test]
    fn interpolation_is_periodic(r in radii(), angle in 0.0f64..360.0, turns in -3i32..3) {
        let a = interpolate_radius(&r, angle);
        let b = interpolate_radius(&r, angle + 360.0 * turns as f64);
        prop_assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn uniform_radii_are_constant(r in radius(), angle in -360.0f64..360.0) {
        let u = DirectionalRadii::uniform(r).unwrap();
        prop_assert!((interpolate_radius(&u, angle) - r).abs() < 1e-9 * r.max(1.0));
    }

    #[test]
    fn ring_is_closed_and_sized(
        r in radii(),
        cx in -1e5f64..1e5,
        cy in -1e5f64..1e5,
        divisor in prop::sample::select(vec![1usize, 2, 3, 4, 8, 12, 36, 72, 90, 360]),
    ) {
        let step = AngularStep::new(360.0 / divisor as f64).unwrap();
        let p = build_ring(&r, vector![cx, cy], step);
        prop_assert_eq!(p.len(), divisor + 1);
        prop_assert!(p.is_closed());
    }

    #[test]
    fn ring_points_lie_at_interpolated_distance(r in radii(), k in 0usize..72) {
        let c = vector![3.0, -7.0];
        let p = build_ring(&r, c, AngularStep::default());
        let angle = k as f64 * 5.0;
        let d = (p.points()[k] - c).norm();
        prop_assert!((d - interpolate_radius(&r, angle)).abs() < 1e-9);
    }

    #[test]
    fn build_ring_is_deterministic(r in radii(), step in 1.0f64..=360.0) {
        let step = AngularStep::new(step).unwrap();
        let a = build_ring(&r, vector![1.0, 2.0], step);
        let b = build_ring(&r, vector![1.0, 2.0], step);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn non_positive_measurements_are_rejected(v in -100.0f64..=0.0) {
        let err = radius_from_measurement(&FieldValue::Number(v), MeasurementKind::Radius);
        let is_invalid = matches!(err, Err(CrownError::InvalidMeasurement { .. }));
        prop_assert!(is_invalid);
    }
}

#[test]
fn measurement_examples() {
    assert!(radius_from_measurement(&FieldValue::Null, MeasurementKind::Radius).is_err());
    assert!(radius_from_measurement(&FieldValue::Number(0.0), MeasurementKind::Radius).is_err());
    assert_eq!(
        radius_from_measurement(&FieldValue::Number(8.0), MeasurementKind::Diameter).unwrap(),
        4.0
    );
}
