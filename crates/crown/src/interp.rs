//! Angular interpolation between the four anchor radii.
//!
//! Model
//! - Bracket the query bearing by two consecutive anchors `(w1, w2)`, including
//!   the wraparound pair 270° → 0°.
//! - Blend with the raised-cosine ease `t = (1 − cos(fπ)) / 2` where `f` is the
//!   fractional position inside the bracket. The derivative of `t` vanishes at
//!   both ends, so the outline has no corners at the anchors.

use std::f64::consts::PI;

use crate::radii::{Bearing, DirectionalRadii};

/// Raised-cosine ease on `[0, 1]`: `ease(0) = 0`, `ease(1) = 1`, zero slope at both ends.
#[inline]
pub fn ease(f: f64) -> f64 {
    (1.0 - (f * PI).cos()) / 2.0
}

/// Normalize a bearing into `[0, 360)`.
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360.
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

/// Radius at an arbitrary compass bearing (degrees, clockwise from North).
///
/// Returns the anchor radius exactly at 0/90/180/270. Non-finite angles have no
/// bracket and fall back to the North radius.
pub fn interpolate_radius(radii: &DirectionalRadii, angle_degrees: f64) -> f64 {
    let a = normalize_degrees(angle_degrees);
    let anchors = Bearing::ALL;
    for (i, &b1) in anchors.iter().enumerate() {
        let b2 = anchors[(i + 1) % anchors.len()];
        let (w1, w2) = (b1.degrees(), b2.degrees());
        let inside = (w1 <= a && a < w2) || (w1 > w2 && (a >= w1 || a < w2));
        if !inside {
            continue;
        }
        let delta = (w2 - w1).rem_euclid(360.0);
        let f = if delta != 0.0 { (a - w1) / delta } else { 0.0 };
        let t = ease(f);
        return (1.0 - t) * radii.get(b1) + t * radii.get(b2);
    }
    radii.get(Bearing::North)
}
