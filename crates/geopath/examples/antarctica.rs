//! Show the Antarctic corrections on a synthetic frame-hugging ring.
//!
//! Usage:
//!   cargo run -p geopath --example antarctica -- trim
//!   cargo run -p geopath --example antarctica -- lengthen
//!
//! Prints the `<path>` line and the label anchor for the corrected shape.

use geopath::api::{render_shapes, shape_centroid, FieldValue, PipelineCfg, PolarFix, ShapeRecord};
use geopath::Shape;
use nalgebra::Vector2;
use rand::{rngs::StdRng, SeedableRng};

fn ring() -> Shape {
    let mut pts = vec![Vector2::new(-180.0, -78.0), Vector2::new(-150.0, -70.0)];
    for k in 0..=12 {
        pts.push(Vector2::new(-150.0 + 25.0 * k as f64, -68.0 - (k % 3) as f64));
    }
    pts.push(Vector2::new(180.0, -78.0));
    for k in 0..=8 {
        pts.push(Vector2::new(180.0 - 45.0 * k as f64, -90.0));
    }
    pts.push(Vector2::new(-180.0, -78.0));
    Shape::from_points(pts)
}

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "trim".to_string());
    let polar = match mode.as_str() {
        "trim" => PolarFix::Trim,
        "lengthen" => PolarFix::Lengthen,
        _ => {
            eprintln!("usage: antarctica [trim|lengthen]");
            return;
        }
    };
    let cfg = PipelineCfg {
        polar,
        mark_antarctic: true,
        indent: 0,
        ..PipelineCfg::default()
    };
    let record = ShapeRecord::new(ring()).with_field("scalerank", FieldValue::Number(0.0));
    let mut out = std::io::stdout().lock();
    if let Err(err) = render_shapes([record], &cfg, &mut out) {
        eprintln!("write failed: {err}");
        return;
    }
    let mut rng = StdRng::seed_from_u64(2025);
    if let Some(c) = shape_centroid(&ring(), &mut rng) {
        println!("label anchor: lon {:.2}, lat {:.2}", c.x, c.y);
    }
}
