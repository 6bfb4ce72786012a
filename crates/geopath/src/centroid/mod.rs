//! Representative interior point of a spherical polygon.
//!
//! Purpose
//! - Pick a label anchor for a (possibly multi-part) shape given as (lon, lat)
//!   degrees.
//!
//! Policy (first match wins)
//! 1. Compact box (lon extent < 15°, lat extent < 60°): the box midpoint.
//! 2. Several parts: recurse into the part with the largest bounding-box area;
//!    the others are ignored.
//! 3. Otherwise: Monte Carlo on the sphere (see `monte_carlo`).
//!
//! Randomness
//! - The caller owns the generator and passes it in; a seeded `StdRng` gives
//!   reproducible anchors, and concurrent callers each bring their own.

mod monte_carlo;

use crate::types::{part_ranges, Bounds, Point};
use rand::Rng;

pub use monte_carlo::{ray_crossings, Segment};

/// Thresholds and stopping rule for the estimator.
#[derive(Clone, Copy, Debug)]
pub struct CentroidCfg {
    /// Boxes narrower than this (degrees of longitude) take the midpoint path.
    pub box_lon_max: f64,
    /// Boxes shorter than this (degrees of latitude) take the midpoint path.
    pub box_lat_max: f64,
    /// Minimum number of samples drawn.
    pub min_samples: usize,
    /// Minimum number of samples that must land inside.
    pub min_inside: usize,
    /// Hard cap on samples; shapes with no interior stop here.
    pub max_samples: usize,
}

impl Default for CentroidCfg {
    fn default() -> Self {
        Self {
            box_lon_max: 15.0,
            box_lat_max: 60.0,
            min_samples: 4000,
            min_inside: 10,
            max_samples: 1_000_000,
        }
    }
}

/// Interior representative point (lon, lat) in degrees.
///
/// `parts` follows `Shape::parts` (index 0 implicit). Returns `None` only for
/// an empty point slice.
pub fn centroid<R: Rng + ?Sized>(
    points: &[Point],
    parts: &[usize],
    cfg: &CentroidCfg,
    rng: &mut R,
) -> Option<Point> {
    let bounds = Bounds::from_points(points)?;
    if bounds.width() < cfg.box_lon_max && bounds.height() < cfg.box_lat_max {
        return Some(bounds.center());
    }
    let ranges = part_ranges(parts, points.len());
    if ranges.len() > 1 {
        let mut best = 0..points.len();
        let mut best_area = f64::NEG_INFINITY;
        for r in ranges.into_iter().filter(|r| !r.is_empty()) {
            let area = Bounds::from_points(&points[r.clone()]).map_or(0.0, |b| b.area());
            if area > best_area {
                best_area = area;
                best = r;
            }
        }
        tracing::debug!(start = best.start, end = best.end, area = best_area, "centroid_part");
        return centroid(&points[best], &[], cfg, rng);
    }
    let est = monte_carlo::estimate(points, bounds, cfg, rng);
    tracing::debug!(drawn = est.drawn, inside = est.inside, "centroid_monte_carlo");
    Some(est.point)
}
