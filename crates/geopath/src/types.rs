//! Shape model shared by the edge corrector, centroid estimator and pipeline.
//!
//! - `Shape`: flat point sequence plus part start indices (sub-rings or
//!   disconnected lines).
//! - `Bounds`: axis-aligned bounding box over a point slice.
//! - `ShapeError`: validation failures reported by `Shape::try_new`.
//!
//! Conventions
//! - Points are `Vector2<f64>`; whether a point is (lon, lat) degrees or
//!   (lat, lon) radians is decided by the caller, nothing here converts.
//! - Index 0 is always a part start, listed or not.

use nalgebra::Vector2;
use std::fmt;
use std::ops::Range;

/// A single coordinate pair.
pub type Point = Vector2<f64>;

/// Validation errors for `Shape::try_new`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShapeError {
    EmptyPoints,
    PartsNotIncreasing { at: usize },
    PartOutOfRange { index: usize, len: usize },
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPoints => write!(f, "shape has no points"),
            Self::PartsNotIncreasing { at } => {
                write!(f, "part starts must strictly increase (position {at})")
            }
            Self::PartOutOfRange { index, len } => {
                write!(f, "part start {index} out of range for {len} points")
            }
        }
    }
}

impl std::error::Error for ShapeError {}

/// Ordered points with part boundaries.
///
/// Invariants (checked only by `try_new`):
/// - `parts` strictly increasing, each `< points.len()`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub points: Vec<Point>,
    pub parts: Vec<usize>,
}

impl Shape {
    /// Construct without checks; malformed input degrades downstream output.
    #[inline]
    pub fn new(points: Vec<Point>, parts: Vec<usize>) -> Self {
        Self { points, parts }
    }

    /// Single-part shape.
    #[inline]
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            points,
            parts: vec![0],
        }
    }

    /// Construct and validate the part invariants.
    pub fn try_new(points: Vec<Point>, parts: Vec<usize>) -> Result<Self, ShapeError> {
        if points.is_empty() {
            return Err(ShapeError::EmptyPoints);
        }
        for (k, &index) in parts.iter().enumerate() {
            if index >= points.len() {
                return Err(ShapeError::PartOutOfRange {
                    index,
                    len: points.len(),
                });
            }
            if k > 0 && parts[k - 1] >= index {
                return Err(ShapeError::PartsNotIncreasing { at: k });
            }
        }
        Ok(Self { points, parts })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn is_part_start(&self, i: usize) -> bool {
        i == 0 || self.parts.contains(&i)
    }

    /// Part starts with the implicit 0 included, in order.
    pub fn part_starts(&self) -> Vec<usize> {
        part_starts(&self.parts)
    }

    /// Index ranges of each part.
    pub fn part_ranges(&self) -> Vec<Range<usize>> {
        part_ranges(&self.parts, self.points.len())
    }

    #[inline]
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}

pub(crate) fn part_starts(parts: &[usize]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(parts.len() + 1);
    if parts.first() != Some(&0) {
        starts.push(0);
    }
    starts.extend_from_slice(parts);
    starts
}

pub(crate) fn part_ranges(parts: &[usize], len: usize) -> Vec<Range<usize>> {
    let starts = part_starts(parts);
    starts
        .iter()
        .enumerate()
        .map(|(k, &s)| {
            let end = starts.get(k + 1).copied().unwrap_or(len);
            let s = s.min(len);
            s..end.min(len).max(s)
        })
        .collect()
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Box over `points`; `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let mut b = Self {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    #[inline]
    pub fn center(&self) -> Point {
        (self.min + self.max) / 2.0
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn try_new_rejects_bad_parts() {
        let pts = vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![1.0, 1.0]];
        assert_eq!(
            Shape::try_new(Vec::new(), vec![0]),
            Err(ShapeError::EmptyPoints)
        );
        assert_eq!(
            Shape::try_new(pts.clone(), vec![0, 2, 2]),
            Err(ShapeError::PartsNotIncreasing { at: 2 })
        );
        assert_eq!(
            Shape::try_new(pts.clone(), vec![0, 3]),
            Err(ShapeError::PartOutOfRange { index: 3, len: 3 })
        );
        assert!(Shape::try_new(pts, vec![0, 2]).is_ok());
    }

    #[test]
    fn part_ranges_never_invert() {
        let ranges = part_ranges(&[0, 7, 3], 5);
        assert_eq!(ranges, vec![0..5, 5..5, 3..5]);
        assert!(ranges.iter().all(|r| r.start <= r.end && r.end <= 5));
    }

    #[test]
    fn part_ranges_include_implicit_start() {
        let pts = vec![vector![0.0, 0.0]; 5];
        let s = Shape::new(pts, vec![2, 4]);
        assert_eq!(s.part_ranges(), vec![0..2, 2..4, 4..5]);
        assert!(s.is_part_start(0));
        assert!(s.is_part_start(2));
        assert!(!s.is_part_start(3));
    }

    #[test]
    fn bounds_area_and_center() {
        let pts = [vector![-10.0, 5.0], vector![10.0, -5.0], vector![0.0, 0.0]];
        let b = Bounds::from_points(&pts).unwrap();
        assert!((b.area() - 200.0).abs() < 1e-12);
        assert_eq!(b.center(), vector![0.0, 0.0]);
        assert!(Bounds::from_points(&[]).is_none());
    }
}
