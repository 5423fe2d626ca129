//! Rectangle and polygon collision shapes
//!
//! Shapes keep their geometry in a local *source* frame and derive working
//! geometry from an owner [`Transform2D`] on [`validate`](Shape::validate).
//! Queries read the last validated state; callers decide when to validate.
//!
//! Rectangles are never rotated. Rotated rectangular collision goes through
//! the four-corner polygon built by [`RectangleShape::to_polygon`].

use std::borrow::Cow;

use crate::foundation::math::{Point2, Vec2, Vertex};
use crate::physics::transform::Transform2D;
use super::primitives::{
    on_segment, orientation, point_to_segment_dist_sq, segments_intersect, BoundingBox,
};

/// Shape variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Axis-aligned rectangle
    Rectangle,
    /// Arbitrary simple polygon
    Polygon,
}

/// Narrow-phase test required for a pair of shape kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionTest {
    /// Overlapping bounding boxes already prove the collision
    BoundingBox,
    /// Full polygon-polygon test
    Polygon,
}

/// Pick the cheapest sufficient narrow-phase test for a pair of shape kinds
pub const fn choose_test(a: ShapeKind, b: ShapeKind) -> CollisionTest {
    match (a, b) {
        (ShapeKind::Rectangle, ShapeKind::Rectangle) => CollisionTest::BoundingBox,
        _ => CollisionTest::Polygon,
    }
}

/// Shape construction errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// Polygons need at least three vertices
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices {
        /// Number of vertices supplied
        count: usize,
    },

    /// A vertex had a NaN or infinite coordinate
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex {
        /// Index of the offending vertex
        index: usize,
    },
}

fn assert_valid_scale(scale: Vec2, allow_negative: bool, shape: &str) {
    assert!(
        scale.x.is_finite() && scale.y.is_finite(),
        "{shape} validated against non-finite scale ({}, {})",
        scale.x,
        scale.y
    );
    assert!(
        allow_negative || (scale.x >= 0.0 && scale.y >= 0.0),
        "{shape} validated against negative scale ({}, {})",
        scale.x,
        scale.y
    );
}

/// Axis-aligned rectangle given by two corners
#[derive(Debug, Clone, PartialEq)]
pub struct RectangleShape {
    source_top_left: Point2,
    source_bottom_right: Point2,
    top_left: Point2,
    bottom_right: Point2,
}

impl RectangleShape {
    /// Creates a rectangle from two corners (any orientation)
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let a = Point2::new(x1, y1);
        let b = Point2::new(x2, y2);
        Self {
            source_top_left: a,
            source_bottom_right: b,
            top_left: a,
            bottom_right: b,
        }
    }

    /// Replace both source corners
    pub fn set_corners(&mut self, top_left: Point2, bottom_right: Point2) {
        self.source_top_left = top_left;
        self.source_bottom_right = bottom_right;
    }

    /// Replace the first source corner
    pub fn set_top_left(&mut self, x: f32, y: f32) {
        self.source_top_left = Point2::new(x, y);
    }

    /// Replace the second source corner
    pub fn set_bottom_right(&mut self, x: f32, y: f32) {
        self.source_bottom_right = Point2::new(x, y);
    }

    /// First source corner, as supplied
    pub fn source_top_left(&self) -> Point2 {
        self.source_top_left
    }

    /// Second source corner, as supplied
    pub fn source_bottom_right(&self) -> Point2 {
        self.source_bottom_right
    }

    /// Scale the source corners; rotation is ignored
    ///
    /// # Panics
    ///
    /// Panics on a negative or non-finite scale.
    pub fn validate(&mut self, transform: &Transform2D) {
        assert_valid_scale(transform.scale, false, "rectangle");
        self.top_left = Point2::from(self.source_top_left.coords.component_mul(&transform.scale));
        self.bottom_right =
            Point2::from(self.source_bottom_right.coords.component_mul(&transform.scale));
    }

    /// Smallest scaled corner
    pub fn top_left(&self) -> Point2 {
        self.bounding_box().min
    }

    /// Largest scaled corner
    pub fn bottom_right(&self) -> Point2 {
        self.bounding_box().max
    }

    /// Local bounding box of the scaled corners
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.top_left, self.bottom_right)
    }

    /// Closed containment of a local point
    pub fn contains_local(&self, p: Point2) -> bool {
        self.bounding_box().contains_point(p)
    }

    /// Squared distance from a local point (0 inside)
    pub fn distance_to_point_sq(&self, p: Point2) -> f32 {
        self.bounding_box().distance_sq_to_point(p)
    }

    /// Four-corner polygon over the *source* corners, not yet validated
    ///
    /// Validating it against the owner transform applies scale and rotation
    /// exactly once.
    pub fn to_polygon(&self) -> PolygonShape {
        PolygonShape::from_box(BoundingBox::new(self.source_top_left, self.source_bottom_right))
    }

    /// Four-corner polygon over the current scaled corners
    pub fn scaled_polygon(&self) -> PolygonShape {
        PolygonShape::from_box(self.bounding_box())
    }
}

/// Simple polygon given by its vertices in winding order
///
/// Convexity is not required. The working vertices always hold the source
/// vertices scaled and rotated by the last validated transform.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    source: Vec<Vertex>,
    working: Vec<Vertex>,
    bounds: BoundingBox,
}

impl PolygonShape {
    /// Creates a polygon from at least three finite vertices
    pub fn new(vertices: impl Into<Vec<Vertex>>) -> Result<Self, ShapeError> {
        let source = vertices.into();
        if source.len() < 3 {
            return Err(ShapeError::TooFewVertices { count: source.len() });
        }
        if let Some(index) = source.iter().position(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(ShapeError::NonFiniteVertex { index });
        }

        let polygon = Self::from_source(source);
        if polygon.signed_area() == 0.0 {
            log::warn!("Polygon with {} vertices has zero area", polygon.source.len());
        }
        Ok(polygon)
    }

    fn from_source(source: Vec<Vertex>) -> Self {
        let bounds = BoundingBox::from_points(&source).unwrap_or_default();
        Self {
            working: source.clone(),
            source,
            bounds,
        }
    }

    fn from_box(bb: BoundingBox) -> Self {
        Self::from_source(vec![
            Point2::new(bb.min.x, bb.min.y),
            Point2::new(bb.max.x, bb.min.y),
            Point2::new(bb.max.x, bb.max.y),
            Point2::new(bb.min.x, bb.max.y),
        ])
    }

    /// Scale then rotate every source vertex into the working set
    ///
    /// # Panics
    ///
    /// Panics on a non-finite scale or rotation.
    pub fn validate(&mut self, transform: &Transform2D) {
        assert_valid_scale(transform.scale, true, "polygon");
        assert!(
            transform.rotation.is_finite(),
            "polygon validated against non-finite rotation {}",
            transform.rotation
        );

        let (sin, cos) = transform.rotation.sin_cos();
        let scale = transform.scale;
        let mut bounds: Option<BoundingBox> = None;

        for (src, dst) in self.source.iter().zip(self.working.iter_mut()) {
            let x = src.x * scale.x;
            let y = src.y * scale.y;
            let v = Point2::new(x * cos - y * sin, x * sin + y * cos);
            *dst = v;
            bounds = Some(bounds.map_or_else(|| BoundingBox::from_point(v), |bb| bb.including(v)));
        }

        self.bounds = bounds.unwrap_or_default();
    }

    /// A validated copy, leaving `self` untouched
    pub fn validated(&self, transform: &Transform2D) -> Self {
        let mut copy = self.clone();
        copy.validate(transform);
        copy
    }

    /// Working vertices in the owner's local frame
    pub fn vertices(&self) -> &[Vertex] {
        &self.working
    }

    /// Source vertices as constructed
    pub fn source_vertices(&self) -> &[Vertex] {
        &self.source
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Always false; polygons have at least three vertices
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Local bounding box of the working vertices
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Smallest working x and y
    pub fn top_left(&self) -> Point2 {
        self.bounds.min
    }

    /// Largest working x and y
    pub fn bottom_right(&self) -> Point2 {
        self.bounds.max
    }

    /// Shoelace area of the working vertices (sign follows winding)
    pub fn signed_area(&self) -> f32 {
        self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum::<f32>() * 0.5
    }

    fn edges(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        self.working
            .iter()
            .zip(self.working.iter().cycle().skip(1))
            .map(|(a, b)| (*a, *b))
    }

    fn min_edge_distance_sq(&self, p: Point2, offset: Vec2) -> f32 {
        self.edges()
            .map(|(a, b)| point_to_segment_dist_sq(p, a + offset, b + offset))
            .fold(f32::INFINITY, f32::min)
    }

    /// Closed point-in-polygon test for a point in the local frame
    ///
    /// Points exactly on an edge are inside; everything else uses the
    /// even-odd rule.
    pub fn contains_local(&self, p: Point2) -> bool {
        if self.edges().any(|(a, b)| orientation(a, b, p) == 0.0 && on_segment(a, b, p)) {
            return true;
        }

        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Containment of a world point, given the owner's world position
    pub fn contains_point(&self, origin: Point2, p: Point2) -> bool {
        self.contains_local(p - origin.coords)
    }

    /// Squared distance from a world point (0 when contained)
    pub fn distance_to_point_sq(&self, origin: Point2, p: Point2) -> f32 {
        let local = p - origin.coords;
        if self.contains_local(local) {
            return 0.0;
        }
        self.min_edge_distance_sq(local, Vec2::zeros())
    }

    /// Narrow-phase test against `other` placed at `offset` in this
    /// polygon's frame
    ///
    /// Checks a single representative vertex of each polygon against the
    /// other first, so one polygon fully inside the other is caught without
    /// any edge crossing. This can miss containment of a non-convex polygon
    /// whose first vertex lies outside; the edge sweep still catches every
    /// case with crossing edges.
    pub fn collide_with(&self, other: &PolygonShape, offset: Vec2) -> bool {
        if self.contains_local(other.working[0] + offset)
            || other.contains_local(self.working[0] - offset)
        {
            return true;
        }

        self.edges().any(|(a1, a2)| {
            other
                .edges()
                .any(|(b1, b2)| segments_intersect(a1, a2, b1 + offset, b2 + offset))
        })
    }

    /// Squared distance to `other` placed at `offset` (0 when colliding)
    ///
    /// Scans vertices against edges in both directions; the minimum
    /// vertex-to-edge distance is not symmetric for non-convex polygons.
    pub fn distance_to_shape_sq(&self, other: &PolygonShape, offset: Vec2) -> f32 {
        if self.collide_with(other, offset) {
            return 0.0;
        }

        let theirs_to_ours = other
            .working
            .iter()
            .map(|v| self.min_edge_distance_sq(*v + offset, Vec2::zeros()))
            .fold(f32::INFINITY, f32::min);
        let ours_to_theirs = self
            .working
            .iter()
            .map(|v| other.min_edge_distance_sq(*v, offset))
            .fold(f32::INFINITY, f32::min);

        theirs_to_ours.min(ours_to_theirs)
    }

    /// Whether the world segment [v1, v2] touches this polygon
    pub fn collides_with_segment(&self, origin: Point2, v1: Point2, v2: Point2) -> bool {
        let a = v1 - origin.coords;
        let b = v2 - origin.coords;
        if self.contains_local(a) || self.contains_local(b) {
            return true;
        }
        self.edges().any(|(e1, e2)| segments_intersect(a, b, e1, e2))
    }
}

/// A rectangle or polygon shape
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle
    Rectangle(RectangleShape),
    /// General polygon
    Polygon(PolygonShape),
}

impl From<RectangleShape> for Shape {
    fn from(rectangle: RectangleShape) -> Self {
        Self::Rectangle(rectangle)
    }
}

impl From<PolygonShape> for Shape {
    fn from(polygon: PolygonShape) -> Self {
        Self::Polygon(polygon)
    }
}

impl Shape {
    /// Rectangle from two corners
    pub fn rectangle(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::Rectangle(RectangleShape::new(x1, y1, x2, y2))
    }

    /// Polygon from at least three vertices
    pub fn polygon(vertices: impl Into<Vec<Vertex>>) -> Result<Self, ShapeError> {
        PolygonShape::new(vertices).map(Self::Polygon)
    }

    /// Variant tag
    pub fn kind(&self) -> ShapeKind {
        self.view().kind()
    }

    /// Borrowed view exposing the query capabilities
    pub fn view(&self) -> ShapeRef<'_> {
        match self {
            Self::Rectangle(rectangle) => ShapeRef::Rectangle(rectangle),
            Self::Polygon(polygon) => ShapeRef::Polygon(polygon),
        }
    }

    /// Recompute working geometry from the owner transform
    pub fn validate(&mut self, transform: &Transform2D) {
        match self {
            Self::Rectangle(rectangle) => rectangle.validate(transform),
            Self::Polygon(polygon) => polygon.validate(transform),
        }
    }

    /// Local bounding box of the working geometry
    pub fn bounding_box(&self) -> BoundingBox {
        self.view().bounding_box()
    }

    /// The rectangle, if this is one
    pub fn as_rectangle(&self) -> Option<&RectangleShape> {
        match self {
            Self::Rectangle(rectangle) => Some(rectangle),
            Self::Polygon(_) => None,
        }
    }

    /// The polygon, if this is one
    pub fn as_polygon(&self) -> Option<&PolygonShape> {
        match self {
            Self::Polygon(polygon) => Some(polygon),
            Self::Rectangle(_) => None,
        }
    }
}

/// Borrowed shape of either kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeRef<'a> {
    /// Axis-aligned rectangle
    Rectangle(&'a RectangleShape),
    /// General polygon
    Polygon(&'a PolygonShape),
}

impl<'a> ShapeRef<'a> {
    /// Variant tag
    pub fn kind(self) -> ShapeKind {
        match self {
            Self::Rectangle(_) => ShapeKind::Rectangle,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }

    /// Local bounding box
    pub fn bounding_box(self) -> BoundingBox {
        match self {
            Self::Rectangle(rectangle) => rectangle.bounding_box(),
            Self::Polygon(polygon) => polygon.bounding_box(),
        }
    }

    /// Polygon form of the current working geometry
    pub fn to_polygon(self) -> Cow<'a, PolygonShape> {
        match self {
            Self::Rectangle(rectangle) => Cow::Owned(rectangle.scaled_polygon()),
            Self::Polygon(polygon) => Cow::Borrowed(polygon),
        }
    }

    /// Closed containment of a local point
    pub fn contains_local(self, p: Point2) -> bool {
        match self {
            Self::Rectangle(rectangle) => rectangle.contains_local(p),
            Self::Polygon(polygon) => polygon.contains_local(p),
        }
    }

    /// Squared distance from a local point (0 when contained)
    pub fn distance_to_point_sq(self, p: Point2) -> f32 {
        match self {
            Self::Rectangle(rectangle) => rectangle.distance_to_point_sq(p),
            Self::Polygon(polygon) => polygon.distance_to_point_sq(Point2::origin(), p),
        }
    }

    /// Whether `other`, placed at `offset` in this shape's frame, touches it
    pub fn collide_with(self, other: ShapeRef<'_>, offset: Vec2) -> bool {
        match choose_test(self.kind(), other.kind()) {
            CollisionTest::BoundingBox => {
                let other_box = other.bounding_box().translated(offset);
                self.bounding_box().distance_sq_to_box(&other_box) == 0.0
            }
            CollisionTest::Polygon => {
                self.to_polygon()
                    .collide_with(&other.to_polygon(), offset)
            }
        }
    }

    /// Squared distance to `other` placed at `offset` (0 when colliding)
    pub fn distance_to_shape_sq(self, other: ShapeRef<'_>, offset: Vec2) -> f32 {
        match choose_test(self.kind(), other.kind()) {
            CollisionTest::BoundingBox => {
                self.bounding_box().distance_sq_to_box(&other.bounding_box().translated(offset))
            }
            CollisionTest::Polygon => {
                self.to_polygon()
                    .distance_to_shape_sq(&other.to_polygon(), offset)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::{HALF_PI, TAU};
    use approx::assert_relative_eq;

    fn p(x: f32, y: f32) -> Point2 {
        Point2::new(x, y)
    }

    fn square(half: f32) -> PolygonShape {
        PolygonShape::new(vec![
            p(-half, -half),
            p(half, -half),
            p(half, half),
            p(-half, half),
        ])
        .unwrap()
    }

    /// U-shaped (non-convex) polygon opening upward
    fn cup() -> PolygonShape {
        PolygonShape::new(vec![
            p(0.0, 0.0),
            p(30.0, 0.0),
            p(30.0, 30.0),
            p(20.0, 30.0),
            p(20.0, 10.0),
            p(10.0, 10.0),
            p(10.0, 30.0),
            p(0.0, 30.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_choose_test_table() {
        use ShapeKind::{Polygon, Rectangle};
        assert_eq!(choose_test(Rectangle, Rectangle), CollisionTest::BoundingBox);
        assert_eq!(choose_test(Rectangle, Polygon), CollisionTest::Polygon);
        assert_eq!(choose_test(Polygon, Rectangle), CollisionTest::Polygon);
        assert_eq!(choose_test(Polygon, Polygon), CollisionTest::Polygon);
    }

    #[test]
    fn test_polygon_rejects_bad_input() {
        assert_eq!(
            PolygonShape::new(vec![p(0.0, 0.0), p(1.0, 0.0)]).unwrap_err(),
            ShapeError::TooFewVertices { count: 2 }
        );
        assert_eq!(
            PolygonShape::new(vec![p(0.0, 0.0), p(f32::NAN, 0.0), p(1.0, 1.0)]).unwrap_err(),
            ShapeError::NonFiniteVertex { index: 1 }
        );
    }

    #[test]
    fn test_rectangle_scaling() {
        let mut rect = RectangleShape::new(-20.0, -20.0, 20.0, 20.0);
        rect.validate(&Transform2D::identity().with_scale(2.0, 1.0));
        assert_eq!(rect.top_left(), p(-40.0, -20.0));
        assert_eq!(rect.bottom_right(), p(40.0, 20.0));
    }

    #[test]
    fn test_rectangle_ignores_rotation() {
        let mut rect = RectangleShape::new(-5.0, -5.0, 5.0, 5.0);
        rect.validate(&Transform2D::identity().with_rotation(1.0));
        assert_eq!(rect.bounding_box(), BoundingBox::new(p(-5.0, -5.0), p(5.0, 5.0)));
    }

    #[test]
    fn test_rectangle_corners_in_any_order() {
        let rect = RectangleShape::new(10.0, 10.0, -10.0, -4.0);
        assert_eq!(rect.top_left(), p(-10.0, -4.0));
        assert_eq!(rect.bottom_right(), p(10.0, 10.0));
    }

    #[test]
    #[should_panic(expected = "negative scale")]
    fn test_rectangle_negative_scale_panics() {
        let mut rect = RectangleShape::new(0.0, 0.0, 1.0, 1.0);
        rect.validate(&Transform2D::identity().with_scale(-1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "non-finite scale")]
    fn test_polygon_nan_scale_panics() {
        square(1.0).validate(&Transform2D::identity().with_scale(f32::NAN, 1.0));
    }

    #[test]
    fn test_polygon_validate_rotates_and_scales() {
        let mut poly = PolygonShape::new(vec![p(10.0, 0.0), p(0.0, 5.0), p(-10.0, 0.0)]).unwrap();
        poly.validate(&Transform2D::identity().with_scale(2.0, 1.0).with_rotation(HALF_PI));

        // (20, 0) -> (0, 20); (0, 5) -> (-5, 0); (-20, 0) -> (0, -20)
        let v = poly.vertices();
        assert_relative_eq!(v[0].x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(v[0].y, 20.0, epsilon = 1e-5);
        assert_relative_eq!(v[1].x, -5.0, epsilon = 1e-5);
        assert_relative_eq!(v[1].y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(v[2].y, -20.0, epsilon = 1e-5);

        assert_relative_eq!(poly.top_left().x, -5.0, epsilon = 1e-5);
        assert_relative_eq!(poly.top_left().y, -20.0, epsilon = 1e-5);
        assert_relative_eq!(poly.bottom_right().y, 20.0, epsilon = 1e-5);
        assert_eq!(poly.source_vertices()[0], p(10.0, 0.0));
        assert_eq!(poly.len(), 3);
    }

    #[test]
    fn test_full_turn_restores_vertices() {
        let mut poly = cup();
        let original = poly.vertices().to_vec();
        poly.validate(&Transform2D::identity().with_rotation(TAU));
        for (before, after) in original.iter().zip(poly.vertices()) {
            assert_relative_eq!(before.x, after.x, epsilon = 1e-4);
            assert_relative_eq!(before.y, after.y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_contains_local_non_convex() {
        let cup = cup();
        assert!(cup.contains_local(p(5.0, 20.0)));
        assert!(cup.contains_local(p(15.0, 5.0)));
        // Inside the notch, outside the polygon
        assert!(!cup.contains_local(p(15.0, 20.0)));
        // Boundary is closed
        assert!(cup.contains_local(p(15.0, 10.0)));
        assert!(cup.contains_local(p(0.0, 0.0)));
        assert!(!cup.contains_local(p(-1.0, 5.0)));
    }

    #[test]
    fn test_contains_point_uses_origin() {
        let poly = square(5.0);
        assert!(poly.contains_point(p(100.0, 100.0), p(104.0, 96.0)));
        assert!(!poly.contains_point(p(100.0, 100.0), p(4.0, -4.0)));
    }

    #[test]
    fn test_distance_to_point() {
        let poly = square(5.0);
        assert_relative_eq!(poly.distance_to_point_sq(Point2::origin(), p(1.0, 1.0)), 0.0);
        assert_relative_eq!(poly.distance_to_point_sq(Point2::origin(), p(8.0, 0.0)), 9.0);
        assert_relative_eq!(poly.distance_to_point_sq(p(10.0, 0.0), p(18.0, 0.0)), 9.0);
        assert_relative_eq!(poly.distance_to_point_sq(Point2::origin(), p(8.0, 9.0)), 25.0);
    }

    #[test]
    fn test_collide_edge_crossing() {
        let a = square(10.0);
        let b = square(10.0);
        assert!(a.collide_with(&b, Vec2::new(15.0, 0.0)));
        assert!(!a.collide_with(&b, Vec2::new(25.0, 0.0)));
    }

    #[test]
    fn test_collide_full_containment() {
        let big = square(20.0);
        let small = square(2.0);
        assert!(big.collide_with(&small, Vec2::new(3.0, 3.0)));
        assert!(small.collide_with(&big, Vec2::new(-3.0, -3.0)));
    }

    #[test]
    fn test_collide_touching_edges() {
        let a = square(10.0);
        assert!(a.collide_with(&a.clone(), Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_shape_in_notch_does_not_collide() {
        let cup = cup();
        let peg = square(2.0);
        assert!(!cup.collide_with(&peg, Vec2::new(15.0, 22.0)));
        assert!(cup.collide_with(&peg, Vec2::new(15.0, 11.0)));
    }

    #[test]
    fn test_distance_between_polygons() {
        let a = square(10.0);
        let b = square(10.0);
        assert_relative_eq!(a.distance_to_shape_sq(&b, Vec2::new(25.0, 0.0)), 25.0);
        assert_relative_eq!(a.distance_to_shape_sq(&b, Vec2::new(15.0, 0.0)), 0.0);
    }

    #[test]
    fn test_distance_vertex_to_edge_both_directions() {
        // The triangle's apex is closest to the square's right edge, while the
        // square's corners are much farther from any triangle edge.
        let square = square(10.0);
        let wedge = PolygonShape::new(vec![p(-3.0, 0.0), p(3.0, -20.0), p(3.0, 20.0)]).unwrap();
        let d_square = square.distance_to_shape_sq(&wedge, Vec2::new(16.0, 0.0));
        let d_wedge = wedge.distance_to_shape_sq(&square, Vec2::new(-16.0, 0.0));
        assert_relative_eq!(d_square, 9.0, epsilon = 1e-4);
        assert_relative_eq!(d_wedge, 9.0, epsilon = 1e-4);
    }

    #[test]
    fn test_distance_and_collision_agree() {
        let a = cup();
        let b = square(3.0);
        for i in -10..50 {
            let offset = Vec2::new(i as f32, 15.0);
            let colliding = a.collide_with(&b, offset);
            let distance = a.distance_to_shape_sq(&b, offset);
            assert_eq!(colliding, distance == 0.0, "offset {offset:?}");
        }
    }

    #[test]
    fn test_segment_collision() {
        let poly = square(5.0);
        // Crosses through
        assert!(poly.collides_with_segment(Point2::origin(), p(-10.0, 0.0), p(10.0, 0.0)));
        // One endpoint inside
        assert!(poly.collides_with_segment(Point2::origin(), p(0.0, 0.0), p(10.0, 10.0)));
        // Misses
        assert!(!poly.collides_with_segment(Point2::origin(), p(-10.0, 8.0), p(10.0, 8.0)));
        // Same segment against a translated owner
        assert!(poly.collides_with_segment(p(0.0, 8.0), p(-10.0, 8.0), p(10.0, 8.0)));
    }

    #[test]
    fn test_degenerate_polygon_point() {
        let dot = PolygonShape::new(vec![p(1.0, 1.0), p(1.0, 1.0), p(1.0, 1.0)]).unwrap();
        assert!(dot.contains_local(p(1.0, 1.0)));
        assert!(!dot.contains_local(p(1.0, 1.5)));
        assert_relative_eq!(dot.distance_to_point_sq(Point2::origin(), p(4.0, 5.0)), 25.0);
        assert_relative_eq!(dot.signed_area(), 0.0);
    }

    #[test]
    fn test_shape_ref_mixed_kinds() {
        let rect = Shape::rectangle(-5.0, -5.0, 5.0, 5.0);
        let poly = Shape::polygon(vec![p(0.0, -3.0), p(3.0, 3.0), p(-3.0, 3.0)]).unwrap();

        assert!(rect.view().collide_with(poly.view(), Vec2::new(6.0, 0.0)));
        assert!(!rect.view().collide_with(poly.view(), Vec2::new(9.0, 0.0)));
        assert!(poly.view().collide_with(rect.view(), Vec2::new(-6.0, 0.0)));
        assert_relative_eq!(
            rect.view()
                .distance_to_shape_sq(poly.view(), Vec2::new(0.0, 10.0)),
            4.0
        );
    }

    #[test]
    fn test_shape_ref_rectangles_use_boxes() {
        let a = Shape::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Shape::rectangle(0.0, 0.0, 4.0, 4.0);
        assert!(a.view().collide_with(b.view(), Vec2::new(10.0, 3.0)));
        assert!(!a.view().collide_with(b.view(), Vec2::new(13.0, 14.0)));
        assert_relative_eq!(a.view().distance_to_shape_sq(b.view(), Vec2::new(13.0, 14.0)), 25.0);
        assert_eq!(a.kind(), ShapeKind::Rectangle);
        assert!(a.as_polygon().is_none());
    }

    #[test]
    fn test_rectangle_proxy_uses_source_corners() {
        let mut rect = RectangleShape::new(-2.0, -1.0, 2.0, 1.0);
        rect.validate(&Transform2D::identity().with_scale(3.0, 3.0));
        let proxy = rect.to_polygon();
        assert_eq!(proxy.bounding_box(), BoundingBox::new(p(-2.0, -1.0), p(2.0, 1.0)));
        let scaled = rect.scaled_polygon();
        assert_eq!(scaled.bounding_box(), BoundingBox::new(p(-6.0, -3.0), p(6.0, 3.0)));
    }

    #[test]
    fn test_points_on_edges_are_inside() {
        let mut polygon = square(5.0);
        polygon.validate(&Transform2D::identity().with_scale(0.3, 0.7));
        let (min, max) = (polygon.top_left(), polygon.bottom_right());

        for i in 0..=10 {
            let x = (min.x + (max.x - min.x) * i as f32 / 10.0).min(max.x);
            let y = (min.y + (max.y - min.y) * i as f32 / 10.0).min(max.y);
            for edge_point in [p(min.x, y), p(max.x, y), p(x, min.y), p(x, max.y)] {
                assert!(polygon.contains_local(edge_point), "{edge_point:?}");
                assert_eq!(polygon.distance_to_point_sq(Point2::origin(), edge_point), 0.0);
            }
        }

        assert!(!polygon.contains_local(p(max.x + 0.1, 0.0)));
        assert!(polygon.distance_to_point_sq(Point2::origin(), p(max.x + 0.1, 0.0)) > 0.0);
    }
}
