//! Directional crown radii and measurement parsing.
//!
//! - `Bearing`: the four compass anchors (0°, 90°, 180°, 270°), clockwise from North.
//! - `DirectionalRadii`: one strictly positive, finite radius per anchor.
//! - `radius_from_measurement`: raw attribute value → radius, halving diameters.
//!
//! Code cross-refs: `interp::interpolate_radius`, `batch::TreeRecord`

use crate::error::{CrownError, MeasurementFault};

/// Compass anchor of a directional measurement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bearing {
    North,
    East,
    South,
    West,
}

impl Bearing {
    /// Anchors in clockwise order starting at North.
    pub const ALL: [Bearing; 4] = [Bearing::North, Bearing::East, Bearing::South, Bearing::West];

    #[inline]
    pub fn degrees(self) -> f64 {
        match self {
            Bearing::North => 0.0,
            Bearing::East => 90.0,
            Bearing::South => 180.0,
            Bearing::West => 270.0,
        }
    }
}

impl std::fmt::Display for Bearing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Bearing::North => "north",
            Bearing::East => "east",
            Bearing::South => "south",
            Bearing::West => "west",
        };
        f.write_str(name)
    }
}

/// Whether a field holds a radius or a full diameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeasurementKind {
    Radius,
    #[default]
    Diameter,
}

/// Raw attribute value as it comes out of a table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Null,
    Number(f64),
    Text(String),
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(FieldValue::Null, FieldValue::Number)
    }
}

/// Convert one raw measurement into a radius.
///
/// Fails with `InvalidMeasurement` for null, non-numeric, non-finite, or
/// non-positive input. Text is accepted when it parses as a number.
pub fn radius_from_measurement(value: &FieldValue, kind: MeasurementKind) -> Result<f64, CrownError> {
    let v = match value {
        FieldValue::Null => return Err(CrownError::measurement(MeasurementFault::Missing)),
        FieldValue::Number(v) => *v,
        FieldValue::Text(raw) => raw.trim().parse::<f64>().map_err(|_| {
            CrownError::measurement(MeasurementFault::NonNumeric(raw.clone()))
        })?,
    };
    let v = positive(v)?;
    Ok(match kind {
        MeasurementKind::Radius => v,
        MeasurementKind::Diameter => v / 2.0,
    })
}

fn positive(v: f64) -> Result<f64, CrownError> {
    if !v.is_finite() {
        return Err(CrownError::measurement(MeasurementFault::NonFinite));
    }
    if v <= 0.0 {
        return Err(CrownError::measurement(MeasurementFault::NonPositive(v)));
    }
    Ok(v)
}

/// Radii at the four compass anchors.
///
/// Invariant: every value is finite and > 0 (enforced by all constructors).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalRadii {
    north: f64,
    east: f64,
    south: f64,
    west: f64,
}

impl DirectionalRadii {
    pub fn new(north: f64, east: f64, south: f64, west: f64) -> Result<Self, CrownError> {
        Ok(Self {
            north: positive(north).map_err(|e| e.at(Bearing::North))?,
            east: positive(east).map_err(|e| e.at(Bearing::East))?,
            south: positive(south).map_err(|e| e.at(Bearing::South))?,
            west: positive(west).map_err(|e| e.at(Bearing::West))?,
        })
    }

    /// Same radius in every direction (a circle).
    pub fn uniform(r: f64) -> Result<Self, CrownError> {
        Self::new(r, r, r, r)
    }

    /// Build from raw N/E/S/W field values; the first failing bearing is reported.
    pub fn from_measurements(values: &[FieldValue; 4], kind: MeasurementKind) -> Result<Self, CrownError> {
        let mut out = [0.0; 4];
        for ((slot, value), b) in out.iter_mut().zip(values).zip(Bearing::ALL) {
            *slot = radius_from_measurement(value, kind).map_err(|e| e.at(b))?;
        }
        let [north, east, south, west] = out;
        Ok(Self {
            north,
            east,
            south,
            west,
        })
    }

    #[inline]
    pub fn get(&self, b: Bearing) -> f64 {
        match b {
            Bearing::North => self.north,
            Bearing::East => self.east,
            Bearing::South => self.south,
            Bearing::West => self.west,
        }
    }

    /// Largest anchor radius; the interpolated outline never exceeds it.
    pub fn max(&self) -> f64 {
        self.north.max(self.east).max(self.south).max(self.west)
    }
}
