//! GeoJSON encoding of crown polygons.

use crown::prelude::{Bearing, Crown};
use serde_json::{json, Value};

use crate::crs::Crs;

/// Layer name carried in the collection.
pub const LAYER_NAME: &str = "Crown";

pub fn crown_feature(c: &Crown) -> Value {
    let radii: serde_json::Map<String, Value> = Bearing::ALL
        .iter()
        .map(|b| (format!("radius_{b}"), json!(c.radii.get(*b))))
        .collect();
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [c.polygon.exterior()],
        },
        "properties": {
            "id": c.id,
            "area": c.polygon.area(),
            "radii": radii,
        },
    })
}

pub fn feature_collection(crowns: &[Crown], crs: &Crs) -> Value {
    json!({
        "type": "FeatureCollection",
        "name": LAYER_NAME,
        "crs": {
            "type": "name",
            "properties": { "name": crs.urn() },
        },
        "features": crowns.iter().map(crown_feature).collect::<Vec<_>>(),
    })
}
