//! Primitive geometry and intersection algorithms
//!
//! Axis-aligned bounding boxes plus the segment and point tests the shape
//! variants are built on. Everything here is a pure function over values.

use crate::foundation::math::{Point2, Vec2};

/// Axis-aligned bounding box
///
/// `min` is the top-left corner and `max` the bottom-right corner (y grows
/// downward in screen space, so "top" is the smaller y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Smallest x and y
    pub min: Point2,
    /// Largest x and y
    pub max: Point2,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::from_point(Point2::origin())
    }
}

impl BoundingBox {
    /// Creates a box spanning two corners given in any order
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Zero-area box at a single point
    pub fn from_point(p: Point2) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing every point, `None` for an empty iterator
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::from_point(first), |bb, p| bb.including(*p)))
    }

    /// Grows the box to include `p`
    pub fn including(self, p: Point2) -> Self {
        Self {
            min: Point2::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point2::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// The same box moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Left edge
    pub fn left(&self) -> f32 {
        self.min.x
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Top edge
    pub fn top(&self) -> f32 {
        self.min.y
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Width of the box
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    ///
    /// See <https://developer.mozilla.org/en-US/docs/Games/Techniques/2D_collision_detection>
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Closed containment test: points on the boundary are inside
    pub fn contains_point(&self, p: Point2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Squared distance from `p` to the closest point of the box (0 inside)
    pub fn distance_sq_to_point(&self, p: Point2) -> f32 {
        let dx = (self.min.x - p.x).max(0.0).max(p.x - self.max.x);
        let dy = (self.min.y - p.y).max(0.0).max(p.y - self.max.y);
        dx * dx + dy * dy
    }

    /// Squared gap between two boxes (0 when they touch or overlap)
    pub fn distance_sq_to_box(&self, other: &BoundingBox) -> f32 {
        let dx = (other.min.x - self.max.x).max(0.0).max(self.min.x - other.max.x);
        let dy = (other.min.y - self.max.y).max(0.0).max(self.min.y - other.max.y);
        dx * dx + dy * dy
    }
}

/// Twice the signed area of the triangle (a, b, c)
///
/// Positive when `c` is counter-clockwise of a→b (in y-up terms), negative
/// when clockwise, zero when the three points are collinear.
pub fn orientation(a: Point2, b: Point2, c: Point2) -> f32 {
    (b - a).perp(&(c - a))
}

/// Whether `p`, known to be collinear with [s1, s2], lies within its extent
pub(crate) fn on_segment(s1: Point2, s2: Point2, p: Point2) -> bool {
    p.x >= s1.x.min(s2.x)
        && p.x <= s1.x.max(s2.x)
        && p.y >= s1.y.min(s2.y)
        && p.y <= s1.y.max(s2.y)
}

/// Closed segment-segment intersection test
///
/// Touching endpoints and overlapping collinear segments count as
/// intersecting.
pub fn segments_intersect(a1: Point2, a2: Point2, b1: Point2, b2: Point2) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b1, b2, a1))
        || (d2 == 0.0 && on_segment(b1, b2, a2))
        || (d3 == 0.0 && on_segment(a1, a2, b1))
        || (d4 == 0.0 && on_segment(a1, a2, b2))
}

/// Squared distance from `p` to the closest point on the closed segment
/// [s1, s2]
///
/// A zero-length segment degenerates to the point distance.
pub fn point_to_segment_dist_sq(p: Point2, s1: Point2, s2: Point2) -> f32 {
    let seg = s2 - s1;
    let len_sq = seg.norm_squared();
    if len_sq == 0.0 {
        return (p - s1).norm_squared();
    }

    let t = ((p - s1).dot(&seg) / len_sq).clamp(0.0, 1.0);
    let closest = s1 + seg * t;
    (p - closest).norm_squared()
}
