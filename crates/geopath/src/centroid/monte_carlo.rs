//! Monte Carlo centroid for a single irregular ring.
//!
//! Samples are uniform on the sphere inside the bounding box: latitude is drawn
//! through `asin` of a uniform sine, longitude uniformly. Each sample casts a
//! ray due north and counts segment crossings (even-odd rule). Inside samples
//! are averaged as unit vectors in R³, then mapped back to (lon, lat).

use super::CentroidCfg;
use crate::types::{Bounds, Point};
use nalgebra::{Vector2, Vector3};
use rand::Rng;

/// Segment between two consecutive (lon, lat) degree points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
}

impl Segment {
    /// Whether a northward ray from `(lon, lat)` crosses this segment.
    ///
    /// Half-open in longitude so a ray through a shared vertex counts once.
    #[inline]
    pub fn crossed_by_north_ray(&self, lon: f64, lat: f64) -> bool {
        let (l1, p1, l2, p2) = (self.a.x, self.a.y, self.b.x, self.b.y);
        let spans = (l1 <= lon && l2 > lon) || (l2 <= lon && l1 > lon);
        spans && p1 * (l2 - lon) / (l2 - l1) + p2 * (l1 - lon) / (l1 - l2) > lat
    }
}

/// Segments between consecutive points; the ring is not closed implicitly.
pub(crate) fn segments(points: &[Point]) -> Vec<Segment> {
    points
        .windows(2)
        .map(|w| Segment { a: w[0], b: w[1] })
        .collect()
}

/// Number of segments crossed by the northward ray from `(lon, lat)` degrees.
pub fn ray_crossings(segments: &[Segment], lon: f64, lat: f64) -> usize {
    segments
        .iter()
        .filter(|s| s.crossed_by_north_ray(lon, lat))
        .count()
}

/// Result of one estimator run with its sample counts.
#[derive(Clone, Copy, Debug)]
pub(super) struct Estimate {
    pub(super) point: Point,
    pub(super) drawn: usize,
    pub(super) inside: usize,
}

pub(super) fn estimate<R: Rng + ?Sized>(
    points: &[Point],
    bounds: Bounds,
    cfg: &CentroidCfg,
    rng: &mut R,
) -> Estimate {
    let segs = segments(points);
    let min_sin = bounds.min.y.to_radians().sin();
    let max_sin = bounds.max.y.to_radians().sin();
    let min_lon = bounds.min.x.to_radians();
    let max_lon = bounds.max.x.to_radians();

    let mut sum = Vector3::zeros();
    let mut drawn = 0usize;
    let mut inside = 0usize;
    while (drawn < cfg.min_samples || inside < cfg.min_inside) && drawn < cfg.max_samples {
        drawn += 1;
        let lat = (rng.gen::<f64>() * (max_sin - min_sin) + min_sin).asin();
        let lon = rng.gen::<f64>() * (max_lon - min_lon) + min_lon;
        if ray_crossings(&segs, lon.to_degrees(), lat.to_degrees()) % 2 == 1 {
            inside += 1;
            sum += Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin());
        }
    }
    let point = if inside == 0 {
        bounds.center()
    } else {
        let lon = sum.y.atan2(sum.x);
        let lat = sum.z.atan2(sum.x.hypot(sum.y));
        Vector2::new(lon.to_degrees(), lat.to_degrees())
    };
    Estimate {
        point,
        drawn,
        inside,
    }
}
