//! Polar edge corrections for shapes drawn on a plate carrée grid.
//!
//! Purpose
//! - `trim_edges`: drop the synthetic points that source data places along the
//!   map frame (|lon| = 180, |lat| = 90), keeping the outermost ones.
//! - `lengthen_edges`: densify long axis-aligned runs so they bend properly
//!   after a later reprojection.
//!
//! Conventions
//! - Points are (lon, lat) degrees.
//! - Both take the shape by value and return the corrected one; part starts are
//!   kept consistent with the new point indices.
//! - Both scan back to front so pending indices never shift under the cursor.

use crate::types::{Point, Shape};
use nalgebra::Vector2;

/// Thresholds for the edge heuristics.
#[derive(Clone, Copy, Debug)]
pub struct EdgeCfg {
    /// A point with `|lon|` above this lies on the east/west frame.
    pub edge_lon: f64,
    /// A point with `|lat|` above this lies on the polar frame.
    pub edge_lat: f64,
    /// Longest axis-aligned step left by `lengthen_edges`.
    pub max_step: f64,
}

impl Default for EdgeCfg {
    fn default() -> Self {
        Self {
            edge_lon: 179.99,
            edge_lat: 89.99,
            max_step: 1.0,
        }
    }
}

impl EdgeCfg {
    #[inline]
    pub fn on_edge(&self, p: Point) -> bool {
        p.x.abs() > self.edge_lon || p.y.abs() > self.edge_lat
    }
}

/// Remove interior points whose neighbours and self all sit on the map frame.
pub fn trim_edges(shape: Shape, cfg: &EdgeCfg) -> Shape {
    let Shape {
        mut points,
        mut parts,
    } = shape;
    for i in (0..points.len()).rev() {
        if i == 0 || parts.contains(&i) {
            continue;
        }
        let prev = points[i - 1];
        let curr = points[i];
        let next = points.get(i + 1).copied().unwrap_or(curr);
        if cfg.on_edge(prev) && cfg.on_edge(curr) && cfg.on_edge(next) {
            points.remove(i);
            for start in parts.iter_mut().filter(|s| **s > i) {
                *start -= 1;
            }
        }
    }
    Shape { points, parts }
}

/// Insert unit-spaced points along axis-aligned segments longer than `max_step`.
///
/// Segments ending on a part start join two parts and are not edges, so they
/// are left alone.
pub fn lengthen_edges(shape: Shape, cfg: &EdgeCfg) -> Shape {
    let Shape {
        mut points,
        mut parts,
    } = shape;
    if points.len() < 2 {
        return Shape { points, parts };
    }
    for i in (0..points.len() - 1).rev() {
        if parts.contains(&(i + 1)) {
            continue;
        }
        let fill = fill_between(points[i], points[i + 1], cfg.max_step);
        if fill.is_empty() {
            continue;
        }
        let added = fill.len();
        points.splice(i + 1..i + 1, fill);
        for start in parts.iter_mut().filter(|s| **s > i) {
            *start += added;
        }
    }
    Shape { points, parts }
}

/// Intermediate points from `a` toward `b`, stepping from `b`'s end.
fn fill_between(a: Point, b: Point, step: f64) -> Vec<Point> {
    if a.x == b.x && (b.y - a.y).abs() > step {
        let dir = if a.y > b.y { step } else { -step };
        let count = steps((b.y - a.y).abs(), step);
        (1..=count)
            .rev()
            .map(|k| Vector2::new(b.x, b.y + dir * k as f64))
            .collect()
    } else if a.y == b.y && (b.x - a.x).abs() > step {
        let dir = if a.x > b.x { step } else { -step };
        let count = steps((b.x - a.x).abs(), step);
        (1..=count)
            .rev()
            .map(|k| Vector2::new(b.x + dir * k as f64, b.y))
            .collect()
    } else {
        Vec::new()
    }
}

#[inline]
fn steps(span: f64, step: f64) -> usize {
    ((span / step).ceil() as usize).saturating_sub(1)
}
