//! Closed crown rings from directional radii.
//!
//! Angle convention
//! - Compass bearing: 0° = North (+y), increasing clockwise, so East is +x.
//!   Offsets are `(r·sin θ, r·cos θ)`, i.e. sine and cosine swapped relative
//!   to the mathematical convention.
//!
//! Code cross-refs: `interp::interpolate_radius`, `batch::build_crowns`

use nalgebra::Vector2;

use crate::error::CrownError;
use crate::interp::{interpolate_radius, normalize_degrees};
use crate::radii::{DirectionalRadii, MeasurementKind};

/// Angular sampling step in degrees.
///
/// Invariant: `0 < deg <= 360` and the ring has at most `MAX_VERTICES`
/// distinct vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngularStep(f64);

impl AngularStep {
    pub const MAX: f64 = 360.0;
    pub const MAX_VERTICES: usize = 3_600_000;

    pub fn new(deg: f64) -> Result<Self, CrownError> {
        if !(deg.is_finite() && deg > 0.0 && deg <= Self::MAX) {
            return Err(CrownError::InvalidStep(deg));
        }
        let step = Self(deg);
        if step.vertex_count() > Self::MAX_VERTICES {
            return Err(CrownError::InvalidStep(deg));
        }
        Ok(step)
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Number of distinct vertices: all `k` with `k·step < 360`.
    pub fn vertex_count(self) -> usize {
        let n = (360.0 / self.0).ceil() as usize;
        // Guard against ceil landing one past due to rounding.
        if n > 0 && (n - 1) as f64 * self.0 >= 360.0 {
            n - 1
        } else {
            n
        }
    }
}

impl Default for AngularStep {
    fn default() -> Self {
        Self(5.0)
    }
}

/// Crown construction settings.
#[derive(Clone, Copy, Debug, Default)]
pub struct CrownCfg {
    pub step: AngularStep,
    pub kind: MeasurementKind,
}

/// Closed ring: the first point is repeated as the last.
#[derive(Clone, Debug, PartialEq)]
pub struct CrownPolygon {
    ring: Vec<Vector2<f64>>,
}

impl CrownPolygon {
    #[inline]
    pub fn points(&self) -> &[Vector2<f64>] {
        &self.ring
    }

    /// Point count including the closing point.
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.ring.first(), self.ring.last()) {
            (Some(a), Some(b)) => self.ring.len() > 1 && a == b,
            _ => false,
        }
    }

    /// Enclosed area (shoelace). Rings run clockwise, so the signed sum is negated.
    pub fn area(&self) -> f64 {
        let s: f64 = self
            .ring
            .windows(2)
            .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
            .sum();
        (0.5 * s).abs()
    }

    /// Coordinates as `[x, y]` pairs, ready for serialization.
    pub fn exterior(&self) -> Vec<[f64; 2]> {
        self.ring.iter().map(|p| [p.x, p.y]).collect()
    }
}

/// Offset of length `r` along a compass bearing: `(r·sin θ, r·cos θ)`.
///
/// Exact at multiples of 90°: the angle is reduced to a quadrant first and the
/// quadrant rotation is applied by swapping/negating components.
pub fn compass_offset(angle_degrees: f64, r: f64) -> Vector2<f64> {
    let a = normalize_degrees(angle_degrees);
    let q = (a / 90.0).floor();
    let rem = (a - q * 90.0).to_radians();
    let (s, c) = rem.sin_cos();
    let (x, y) = match q as i32 {
        0 => (s, c),
        1 => (c, -s),
        2 => (-s, -c),
        _ => (-c, s),
    };
    Vector2::new(r * x, r * y)
}

/// Sample the crown outline around `center` every `step` degrees and close the ring.
///
/// Yields `vertex_count + 1` points; first and last are identical.
pub fn build_ring(radii: &DirectionalRadii, center: Vector2<f64>, step: AngularStep) -> CrownPolygon {
    let n = step.vertex_count();
    let mut ring = Vec::with_capacity(n + 1);
    for k in 0..n {
        let angle = k as f64 * step.degrees();
        let r = interpolate_radius(radii, angle);
        ring.push(center + compass_offset(angle, r));
    }
    if let Some(&first) = ring.first() {
        ring.push(first);
    }
    CrownPolygon { ring }
}
