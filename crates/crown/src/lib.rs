//! Tree crown outlines from four directional measurements.
//!
//! A crown is sampled around a projected stem position by blending the
//! North/East/South/West radii with a raised-cosine ease, producing a smooth,
//! closed polygon ring in the same linear unit as the input (metres).
//!
//! Layout
//! - `radii`: anchors, measurement parsing (`radius_from_measurement`).
//! - `interp`: `interpolate_radius`.
//! - `ring`: `build_ring`, `CrownPolygon`, `CrownCfg`.
//! - `batch`: per-feature driver that skips bad records.
//!
//! Everything here is pure; no I/O, no logging, no shared state.

pub mod batch;
pub mod error;
pub mod interp;
pub mod radii;
pub mod ring;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::batch::{build_crown, build_crowns, Crown, CrownBatch, Skipped, TreeRecord};
    pub use crate::error::{CrownError, MeasurementFault};
    pub use crate::interp::interpolate_radius;
    pub use crate::radii::{
        radius_from_measurement, Bearing, DirectionalRadii, FieldValue, MeasurementKind,
    };
    pub use crate::ring::{build_ring, AngularStep, CrownCfg, CrownPolygon};
    pub use nalgebra::Vector2 as Vec2;
}
