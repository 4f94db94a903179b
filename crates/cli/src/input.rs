//! CSV tree tables → `TreeRecord`s.
//!
//! Columns are matched by name through `FieldMap`. Cells keep their raw form
//! (`FieldValue`) so that the kernel decides what a bad measurement is.

use std::path::Path;

use anyhow::{Context, Result};
use crown::prelude::{FieldValue, TreeRecord, Vec2};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column names for position, id and the four directional measurements.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    pub x: String,
    pub y: String,
    /// `None` → 1-based row number.
    pub id: Option<String>,
    pub north: String,
    pub east: String,
    pub south: String,
    pub west: String,
}

impl Default for FieldMap {
    fn default() -> Self {
        Self {
            x: "x".into(),
            y: "y".into(),
            id: None,
            north: "crown_diameter_1".into(),
            east: "crown_diameter_2".into(),
            south: "crown_diameter_3".into(),
            west: "crown_diameter_4".into(),
        }
    }
}

impl FieldMap {
    fn measurement_columns(&self) -> [&str; 4] {
        [&self.north, &self.east, &self.south, &self.west]
    }
}

pub fn read_csv(path: &Path) -> Result<DataFrame> {
    // Infer over every row: a stray "n/a" late in a column must not break parsing.
    LazyCsvReader::new(path)
        .with_infer_schema_length(None)
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", path.display()))
}

/// Turn a table into records. Rows whose id is not an integer are dropped with a warning.
pub fn records_from_frame(df: &DataFrame, fields: &FieldMap) -> Result<Vec<TreeRecord>> {
    let col = |name: &str| {
        df.column(name).with_context(|| {
            format!(
                "column {name:?} not found; available: {:?}",
                df.get_column_names()
            )
        })
    };
    let xs = col(&fields.x)?;
    let ys = col(&fields.y)?;
    let ids = fields.id.as_deref().map(|name| col(name)).transpose()?;
    let [n, e, s, w] = fields.measurement_columns();
    let measured = [col(n)?, col(e)?, col(s)?, col(w)?];

    let mut out = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let id = match ids {
            Some(c) => match integral(&field_value(c.get(row)?)) {
                Some(id) => id,
                None => {
                    tracing::warn!(row = row + 1, "skipping row with non-integer id");
                    continue;
                }
            },
            None => row as i64 + 1,
        };
        let x = finite(&field_value(xs.get(row)?));
        let y = finite(&field_value(ys.get(row)?));
        let mut measurements = [FieldValue::Null, FieldValue::Null, FieldValue::Null, FieldValue::Null];
        for (slot, c) in measurements.iter_mut().zip(measured.iter()) {
            *slot = field_value(c.get(row)?);
        }
        out.push(TreeRecord {
            id,
            position: x.zip(y).map(|(x, y)| Vec2::new(x, y)),
            measurements,
        });
    }
    Ok(out)
}

fn field_value(av: AnyValue) -> FieldValue {
    if av.is_null() {
        return FieldValue::Null;
    }
    if let Some(s) = av.get_str() {
        return FieldValue::Text(s.to_string());
    }
    match av.extract::<f64>() {
        Some(v) => FieldValue::Number(v),
        None => FieldValue::Text(av.to_string()),
    }
}

fn finite(v: &FieldValue) -> Option<f64> {
    let x = match v {
        FieldValue::Number(x) => *x,
        FieldValue::Text(s) => s.trim().parse().ok()?,
        FieldValue::Null => return None,
    };
    x.is_finite().then_some(x)
}

fn integral(v: &FieldValue) -> Option<i64> {
    let x = finite(v)?;
    (x.fract() == 0.0 && x.abs() < i64::MAX as f64).then_some(x as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn load(csv: &str, fields: &FieldMap) -> Vec<TreeRecord> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trees.csv");
        fs::write(&path, csv).unwrap();
        let df = read_csv(&path).unwrap();
        records_from_frame(&df, fields).unwrap()
    }

    #[test]
    fn default_columns_and_row_ids() {
        let csv = "x,y,crown_diameter_1,crown_diameter_2,crown_diameter_3,crown_diameter_4\n\
                   100.0,200.0,4,6,8,2\n\
                   101.5,,4,6,8,2\n";
        let recs = load(csv, &FieldMap::default());
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].id, 1);
        assert_eq!(recs[0].position, Some(Vec2::new(100.0, 200.0)));
        assert_eq!(recs[0].measurements[0], FieldValue::Number(4.0));
        assert_eq!(recs[0].measurements[3], FieldValue::Number(2.0));
        assert_eq!(recs[1].id, 2);
        assert_eq!(recs[1].position, None);
    }

    #[test]
    fn text_and_missing_cells_are_kept_raw() {
        let csv = "fid,e,n,dn,de,ds,dw\n\
                   10,1,2,3,n/a,3,3\n\
                   11,1,2,3,,3,3\n";
        let fields = FieldMap {
            x: "e".into(),
            y: "n".into(),
            id: Some("fid".into()),
            north: "dn".into(),
            east: "de".into(),
            south: "ds".into(),
            west: "dw".into(),
        };
        let recs = load(csv, &fields);
        assert_eq!(recs[0].id, 10);
        assert_eq!(recs[0].measurements[1], FieldValue::Text("n/a".into()));
        assert_eq!(recs[1].id, 11);
        assert_eq!(recs[1].measurements[1], FieldValue::Null);
        assert_eq!(recs[1].measurements[0], FieldValue::Number(3.0));
    }

    #[test]
    fn missing_column_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "x,y\n1,2\n").unwrap();
        let df = read_csv(&path).unwrap();
        let err = records_from_frame(&df, &FieldMap::default()).unwrap_err();
        assert!(err.to_string().contains("crown_diameter_1"));
    }

    #[test]
    fn integral_ids_only() {
        assert_eq!(integral(&FieldValue::Number(3.0)), Some(3));
        assert_eq!(integral(&FieldValue::Number(3.5)), None);
        assert_eq!(integral(&FieldValue::Text("7".into())), Some(7));
        assert_eq!(integral(&FieldValue::Null), None);
    }
}
