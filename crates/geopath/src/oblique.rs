//! Oblique-aspect rotation between a relative frame and absolute (lat, lon).
//!
//! Purpose
//! - `obliquify` maps a point given relative to a reference pole `(lat0, lon0)`
//!   onto the absolute sphere. `relativize` is its inverse.
//!
//! Conventions
//! - Radians everywhere except the `_deg` helpers, which take and return
//!   (lon, lat) degree points as stored in `Shape`.
//! - Output longitudes lie in [-π, π].
//! - No error conditions: NaN in, NaN out.
//!
//! The forward map is the rotation `Rz(lon0) · Ry(π/2 - lat0)` written out in
//! closed form; the branches cover the poles and the rounding cases where
//! `cos(lat1) → 0` pushes the acos argument out of [-1, 1].

use crate::types::Point;
use nalgebra::{Rotation3, Vector2, Vector3};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Relative `(lat1, lon1)` around pole `(lat0, lon0)` to absolute `(lat, lon)`.
pub fn obliquify(lat1: f64, lon1: f64, lat0: f64, lon0: f64) -> (f64, f64) {
    let latf = (lat0.sin() * lat1.sin() - lat0.cos() * lon1.cos() * lat1.cos()).asin();
    let k = lat1.sin() / lat0.cos() / latf.cos() - lat0.tan() * latf.tan();
    let lonf = if lat0 == FRAC_PI_2 {
        lon1 + lon0
    } else if lat0 == -FRAC_PI_2 {
        -lon1 + lon0 + PI
    } else if k.abs() > 1.0 {
        if (lon1 == 0.0 && lat1 < -lat0) || (lon1 != 0.0 && lat1 < lat0) {
            lon0 + PI
        } else {
            lon0
        }
    } else if lon1.sin() > 0.0 {
        lon0 + k.acos()
    } else {
        lon0 - k.acos()
    };
    (latf, normalize_lon(lonf))
}

/// Absolute `(lat, lon)` to the frame around pole `(lat0, lon0)`.
pub fn relativize(lat: f64, lon: f64, lat0: f64, lon0: f64) -> (f64, f64) {
    let dl = lon - lon0;
    let p = Vector3::new(lat.cos() * dl.cos(), lat.cos() * dl.sin(), lat.sin());
    let q = Rotation3::from_axis_angle(&Vector3::y_axis(), lat0 - FRAC_PI_2) * p;
    (q.z.clamp(-1.0, 1.0).asin(), q.y.atan2(q.x))
}

/// Shift by whole turns into [-π, π].
pub fn normalize_lon(mut lon: f64) -> f64 {
    while lon > PI {
        lon -= TAU;
    }
    while lon < -PI {
        lon += TAU;
    }
    lon
}

/// `obliquify` on a (lon, lat) degree point, pole given as (lat0, lon0) degrees.
pub fn obliquify_deg(p: Point, pole: (f64, f64)) -> Point {
    let (lat, lon) = obliquify(
        p.y.to_radians(),
        p.x.to_radians(),
        pole_lat_rad(pole.0),
        pole.1.to_radians(),
    );
    Vector2::new(lon.to_degrees(), lat.to_degrees())
}

/// Exact ±π/2 for polar poles so the degenerate branches are taken.
fn pole_lat_rad(lat0: f64) -> f64 {
    if lat0 == 90.0 {
        FRAC_PI_2
    } else if lat0 == -90.0 {
        -FRAC_PI_2
    } else {
        lat0.to_radians()
    }
}

/// Inverse of `obliquify_deg`.
pub fn relativize_deg(p: Point, pole: (f64, f64)) -> Point {
    let (lat, lon) = relativize(
        p.y.to_radians(),
        p.x.to_radians(),
        pole_lat_rad(pole.0),
        pole.1.to_radians(),
    );
    Vector2::new(lon.to_degrees(), lat.to_degrees())
}
