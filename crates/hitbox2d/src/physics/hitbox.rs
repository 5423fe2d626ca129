//! Per-entity hitbox: shape, owner transform and cached bounds
//!
//! A [`Hitbox`] wraps exactly one shape and reads its owner's transform
//! through a [`TransformRef`]. It decides per query which test is cheapest
//! and still sufficient:
//!
//! - **Broad phase**: cached bounding boxes, this one shifted to the
//!   candidate position.
//! - **Narrow phase**: nothing more for two plain rectangles, the
//!   polygon-polygon test for anything else.
//!
//! Rectangles carry a four-corner polygon proxy that stands in for them
//! while their owner is rotated.

use std::borrow::Cow;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::foundation::math::{Point2, Vec2, Vertex};
use crate::physics::collision::{
    choose_test, BoundingBox, CollisionTest, PolygonShape, RectangleShape, Shape, ShapeError,
    ShapeKind, ShapeRef,
};
use crate::physics::transform::{Transform2D, TransformRef, TransformSource};

/// When [`Hitbox::update`] revalidates without being asked to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevalidationPolicy {
    /// Only `update(true)` or a pending invalidation revalidates
    #[default]
    OnRequest,
    /// While the owner is rotated, every `update` revalidates
    AlwaysWhileRotated,
}

#[derive(Debug)]
enum Geometry {
    Rectangle {
        rectangle: RectangleShape,
        proxy: PolygonShape,
        /// Proxy was validated by the last update (owner was rotated)
        proxy_fresh: bool,
    },
    Polygon(PolygonShape),
}

impl Geometry {
    fn new(shape: Shape) -> Self {
        match shape {
            Shape::Rectangle(rectangle) => Self::Rectangle {
                proxy: rectangle.to_polygon(),
                rectangle,
                proxy_fresh: false,
            },
            Shape::Polygon(polygon) => Self::Polygon(polygon),
        }
    }

    fn kind(&self) -> ShapeKind {
        match self {
            Self::Rectangle { .. } => ShapeKind::Rectangle,
            Self::Polygon(_) => ShapeKind::Polygon,
        }
    }
}

/// Collision volume of one entity
#[derive(Debug)]
pub struct Hitbox {
    transform: TransformRef,
    geometry: Geometry,
    policy: RevalidationPolicy,
    dirty: bool,
    /// Local bounding box as of the last revalidation
    bounds: BoundingBox,
}

impl Hitbox {
    /// Hitbox with no owner, bound to the identity transform
    pub fn new(shape: Shape) -> Self {
        Self::with_transform(shape, TransformRef::detached())
    }

    /// Hitbox following `owner`'s transform without keeping it alive
    pub fn following<T: TransformSource + 'static>(owner: &Rc<T>, shape: Shape) -> Self {
        Self::with_transform(shape, TransformRef::follow(owner))
    }

    /// Hitbox reading its owner through `transform`
    pub fn with_transform(shape: Shape, transform: TransformRef) -> Self {
        let mut hitbox = Self {
            transform,
            geometry: Geometry::new(shape),
            policy: RevalidationPolicy::default(),
            dirty: true,
            bounds: BoundingBox::default(),
        };
        hitbox.update(true);
        log::debug!(
            "Created {:?} hitbox, local bounds {:?}",
            hitbox.original_kind(),
            hitbox.bounds
        );
        hitbox
    }

    /// Detached rectangle hitbox from two corners
    pub fn rectangle(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Shape::rectangle(x1, y1, x2, y2))
    }

    /// Detached polygon hitbox from at least three vertices
    pub fn polygon(vertices: impl Into<Vec<Vertex>>) -> Result<Self, ShapeError> {
        Ok(Self::new(Shape::polygon(vertices)?))
    }

    /// Use a different revalidation policy
    pub fn with_policy(mut self, policy: RevalidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current revalidation policy
    pub fn policy(&self) -> RevalidationPolicy {
        self.policy
    }

    /// Rebind to another owner and revalidate
    pub fn set_transform(&mut self, transform: TransformRef) {
        self.transform = transform;
        self.mark_dirty();
        self.update(true);
    }

    /// Owner transform as of now
    pub fn transform(&self) -> Transform2D {
        self.transform.snapshot()
    }

    /// Owner world position
    pub fn position(&self) -> Point2 {
        self.transform().position
    }

    /// Flag the cached state as stale; the next `update` revalidates
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Whether a revalidation is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Kind of the wrapped shape
    pub fn original_kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Kind of the shape queries currently run against
    pub fn kind(&self) -> ShapeKind {
        self.effective_shape().kind()
    }

    /// The wrapped shape
    pub fn original_shape(&self) -> ShapeRef<'_> {
        match &self.geometry {
            Geometry::Rectangle { rectangle, .. } => ShapeRef::Rectangle(rectangle),
            Geometry::Polygon(polygon) => ShapeRef::Polygon(polygon),
        }
    }

    /// The polygon standing in for a rectangle, `None` for polygon hitboxes
    pub fn polygon_proxy(&self) -> Option<&PolygonShape> {
        match &self.geometry {
            Geometry::Rectangle { proxy, .. } => Some(proxy),
            Geometry::Polygon(_) => None,
        }
    }

    /// Revalidate against the owner transform
    ///
    /// With `recalculate` false this only revalidates when the hitbox is
    /// dirty, or when the policy asks for it while the owner is rotated.
    pub fn update(&mut self, recalculate: bool) {
        let transform = self.transform();
        let rotated = transform.is_rotated();
        let forced = self.policy == RevalidationPolicy::AlwaysWhileRotated && rotated;
        if !(recalculate || self.dirty || forced) {
            return;
        }

        match &mut self.geometry {
            Geometry::Rectangle { proxy, proxy_fresh, .. } if rotated => {
                proxy.validate(&transform);
                *proxy_fresh = true;
            }
            Geometry::Rectangle { rectangle, proxy_fresh, .. } => {
                rectangle.validate(&transform);
                *proxy_fresh = false;
            }
            Geometry::Polygon(polygon) => polygon.validate(&transform),
        }

        self.bounds = self.effective_shape_for(rotated).bounding_box();
        self.dirty = false;
        log::trace!("Hitbox revalidated, local bounds {:?}", self.bounds);
    }

    /// React to a change of the wrapped shape
    ///
    /// Rebuilds the rectangle's proxy unless the proxy itself was the
    /// source of the change, then revalidates.
    pub fn invalidate(&mut self, source: ShapeKind) {
        if let Geometry::Rectangle { rectangle, proxy, proxy_fresh } = &mut self.geometry {
            if source != ShapeKind::Polygon {
                *proxy = rectangle.to_polygon();
            }
            *proxy_fresh = false;
        }
        log::debug!("Hitbox invalidated by {source:?} change");
        self.mark_dirty();
        self.update(true);
    }

    fn rectangle_mut(&mut self, operation: &str) -> &mut RectangleShape {
        match &mut self.geometry {
            Geometry::Rectangle { rectangle, .. } => rectangle,
            Geometry::Polygon(_) => {
                panic!("{operation} called on a polygon hitbox; only rectangles have corners")
            }
        }
    }

    /// Replace the rectangle's first corner
    ///
    /// # Panics
    ///
    /// Panics on a polygon hitbox.
    pub fn set_top_left(&mut self, x: f32, y: f32) {
        self.rectangle_mut("set_top_left").set_top_left(x, y);
        self.invalidate(ShapeKind::Rectangle);
    }

    /// Replace the rectangle's second corner
    ///
    /// # Panics
    ///
    /// Panics on a polygon hitbox.
    pub fn set_bottom_right(&mut self, x: f32, y: f32) {
        self.rectangle_mut("set_bottom_right").set_bottom_right(x, y);
        self.invalidate(ShapeKind::Rectangle);
    }

    /// Replace both rectangle corners
    ///
    /// # Panics
    ///
    /// Panics on a polygon hitbox.
    pub fn set_corners(&mut self, top_left: Point2, bottom_right: Point2) {
        self.rectangle_mut("set_corners").set_corners(top_left, bottom_right);
        self.invalidate(ShapeKind::Rectangle);
    }

    fn effective_shape_for(&self, rotated: bool) -> ShapeRef<'_> {
        match &self.geometry {
            Geometry::Rectangle { proxy, .. } if rotated => ShapeRef::Polygon(proxy),
            Geometry::Rectangle { rectangle, .. } => ShapeRef::Rectangle(rectangle),
            Geometry::Polygon(polygon) => ShapeRef::Polygon(polygon),
        }
    }

    /// The proxy while the owner is rotated, the wrapped shape otherwise
    pub fn effective_shape(&self) -> ShapeRef<'_> {
        self.effective_shape_for(self.transform().is_rotated())
    }

    /// Polygon form used by the exact queries
    ///
    /// A rectangle's proxy is borrowed as-is when the last update validated
    /// it (owner rotated). Otherwise a validated copy is made against the
    /// live transform.
    pub fn effective_polygon(&self) -> Cow<'_, PolygonShape> {
        match &self.geometry {
            Geometry::Polygon(polygon) => Cow::Borrowed(polygon),
            Geometry::Rectangle {
                proxy,
                proxy_fresh: true,
                ..
            } if !self.dirty => Cow::Borrowed(proxy),
            Geometry::Rectangle { proxy, .. } => Cow::Owned(proxy.validated(&self.transform())),
        }
    }

    /// Cached bounding box in the owner's local frame
    pub fn local_bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    /// Cached bounding box in world space
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds.translated(self.position().coords)
    }

    /// World x of the left edge
    pub fn bounding_box_left(&self) -> f32 {
        self.bounding_box().left()
    }

    /// World x of the right edge
    pub fn bounding_box_right(&self) -> f32 {
        self.bounding_box().right()
    }

    /// World y of the top edge
    pub fn bounding_box_top(&self) -> f32 {
        self.bounding_box().top()
    }

    /// World y of the bottom edge
    pub fn bounding_box_bottom(&self) -> f32 {
        self.bounding_box().bottom()
    }

    /// Closed containment of a world point in the cached bounding box
    pub fn bounding_box_contains_point(&self, x: f32, y: f32) -> bool {
        self.bounding_box().contains_point(Point2::new(x, y))
    }

    /// Broad phase: would the bounding boxes overlap with this hitbox at
    /// world position `(x, y)`
    pub fn check_bounding_box(&self, other: &Hitbox, x: f32, y: f32) -> bool {
        self.bounds
            .translated(Vec2::new(x, y))
            .overlaps(&other.bounding_box())
    }

    /// Would this hitbox, placed at world position `(x, y)`, touch `other`
    ///
    /// A hitbox never collides with itself.
    pub fn do_collision(&self, other: &Hitbox, x: f32, y: f32) -> bool {
        if std::ptr::eq(self, other) {
            return false;
        }
        if !self.check_bounding_box(other, x, y) {
            return false;
        }

        match choose_test(self.kind(), other.kind()) {
            // A plain rectangle is its own bounding box.
            CollisionTest::BoundingBox => true,
            CollisionTest::Polygon => {
                let offset = other.position() - Point2::new(x, y);
                self.effective_polygon()
                    .collide_with(&other.effective_polygon(), offset)
            }
        }
    }

    /// Closed containment of a world point
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        match self.effective_shape() {
            ShapeRef::Rectangle(_) => self.bounding_box_contains_point(x, y),
            ShapeRef::Polygon(polygon) => {
                polygon.contains_point(self.position(), Point2::new(x, y))
            }
        }
    }

    /// Squared distance from a world point (0 when contained)
    pub fn distance_to_point_sq(&self, x: f32, y: f32) -> f32 {
        self.effective_polygon()
            .distance_to_point_sq(self.position(), Point2::new(x, y))
    }

    /// Squared distance between the two hitboxes at their owners' positions
    pub fn distance_to_hitbox_sq(&self, other: &Hitbox) -> f32 {
        let offset = other.position() - self.position();
        self.effective_polygon()
            .distance_to_shape_sq(&other.effective_polygon(), offset)
    }

    /// Whether the world segment [v1, v2] touches this hitbox
    pub fn check_line_collision(&self, v1: Point2, v2: Point2) -> bool {
        self.effective_polygon()
            .collides_with_segment(self.position(), v1, v2)
    }
}
