//! Physics module for 2D hitboxes
//!
//! Shape geometry, owner transforms, the per-entity [`Hitbox`] and
//! data-driven hitbox definitions.

pub mod collision;
pub mod descriptor;
pub mod hitbox;
pub mod transform;

pub use collision::{BoundingBox, PolygonShape, RectangleShape, Shape, ShapeError, ShapeKind};
pub use descriptor::{HitboxDescriptor, HitboxLibrary, LibraryError};
pub use hitbox::{Hitbox, RevalidationPolicy};
pub use transform::{Transform2D, TransformRef, TransformSource};
