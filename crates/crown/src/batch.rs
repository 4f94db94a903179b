//! Per-feature crown construction with skip-and-continue.
//!
//! A record that has no position or a bad measurement is reported in
//! `CrownBatch::skipped` and the batch carries on. Output keeps input order.

use nalgebra::Vector2;

use crate::error::CrownError;
use crate::radii::{DirectionalRadii, FieldValue};
use crate::ring::{build_ring, CrownCfg, CrownPolygon};

/// One input tree: id, projected position, and raw N/E/S/W measurements.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeRecord {
    pub id: i64,
    pub position: Option<Vector2<f64>>,
    pub measurements: [FieldValue; 4],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Crown {
    pub id: i64,
    pub center: Vector2<f64>,
    pub radii: DirectionalRadii,
    pub polygon: CrownPolygon,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Skipped {
    pub id: i64,
    pub error: CrownError,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrownBatch {
    pub crowns: Vec<Crown>,
    pub skipped: Vec<Skipped>,
}

/// Build one crown, or the reason the record cannot produce one.
pub fn build_crown(rec: &TreeRecord, cfg: &CrownCfg) -> Result<Crown, CrownError> {
    let center = rec.position.ok_or(CrownError::MissingPosition)?;
    let radii = DirectionalRadii::from_measurements(&rec.measurements, cfg.kind)?;
    Ok(Crown {
        id: rec.id,
        center,
        radii,
        polygon: build_ring(&radii, center, cfg.step),
    })
}

pub fn build_crowns<'a, I>(records: I, cfg: &CrownCfg) -> CrownBatch
where
    I: IntoIterator<Item = &'a TreeRecord>,
{
    let mut out = CrownBatch::default();
    for rec in records {
        match build_crown(rec, cfg) {
            Ok(c) => out.crowns.push(c),
            Err(error) => out.skipped.push(Skipped { id: rec.id, error }),
        }
    }
    out
}
