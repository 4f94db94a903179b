//! Print an asymmetric crown ring for a quick visual sanity check.
//!
//! Usage:
//!   cargo run -p crown --example asymmetric_crown -- 6 10 4 8
//!
//! Arguments are N/E/S/W diameters (metres); defaults to 6 10 4 8.

use crown::prelude::*;

fn main() {
    let args: Vec<f64> = std::env::args()
        .skip(1)
        .filter_map(|a| a.parse().ok())
        .collect();
    let d = match args.as_slice() {
        [n, e, s, w] => [*n, *e, *s, *w],
        _ => [6.0, 10.0, 4.0, 8.0],
    };
    let values = d.map(FieldValue::Number);
    let radii = match DirectionalRadii::from_measurements(&values, MeasurementKind::Diameter) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("asymmetric_crown: {e}");
            return;
        }
    };
    let ring = build_ring(&radii, Vec2::new(0.0, 0.0), AngularStep::new(15.0).unwrap_or_default());
    for (k, p) in ring.points().iter().enumerate() {
        println!("{:>3}°  x={:>7.3}  y={:>7.3}", (k * 15) % 360, p.x, p.y);
    }
    println!("area = {:.3} m²", ring.area());
}
