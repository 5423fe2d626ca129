//! Collision geometry
//!
//! Pure shape data and the intersection algorithms that run on it. Nothing
//! here knows about owners or caching; that lives in [`Hitbox`](super::Hitbox).
//!
//! # Architecture
//!
//! - **Source/working split**: every shape keeps its authored vertices and a
//!   working copy produced by `validate(transform)`
//! - **Local space**: working vertices are relative to the owner's position,
//!   queries take the other shape's offset instead of world coordinates
//! - **Closed tests**: boundary contact counts as contact, so a point at
//!   distance zero is always contained
//!
//! # Module Organization
//!
//! - [`primitives`] - Bounding boxes, segment intersection, point-segment distance
//! - [`shape`] - Rectangle and polygon shapes plus the test dispatch table

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{orientation, point_to_segment_dist_sq, segments_intersect, BoundingBox};
pub use shape::{
    choose_test, CollisionTest, PolygonShape, RectangleShape, Shape, ShapeError, ShapeKind,
    ShapeRef,
};
