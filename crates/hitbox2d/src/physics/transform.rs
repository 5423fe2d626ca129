//! Owner transforms consumed by hitboxes
//!
//! The kernel never owns an entity's transform. A [`Hitbox`](super::Hitbox)
//! reads it through a [`TransformRef`], which is either a non-owning
//! `Weak` handle to something implementing [`TransformSource`] or the
//! detached identity transform used for standalone shapes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::foundation::math::{Point2, Vec2};

/// Position, scale and rotation of an owning entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// World position
    pub position: Point2,
    /// Non-uniform scale factors
    pub scale: Vec2,
    /// Rotation in radians
    pub rotation: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Point2::origin(),
            scale: Vec2::new(1.0, 1.0),
            rotation: 0.0,
        }
    }
}

impl Transform2D {
    /// Identity transform: origin, unit scale, no rotation
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(x: f32, y: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            ..Default::default()
        }
    }

    /// Replace the scale
    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    /// Replace the rotation (radians)
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Whether any rotation is applied
    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }
}

/// Read-only view of an owner's transform
pub trait TransformSource {
    /// World position
    fn position(&self) -> Point2;

    /// Scale factors
    fn scale(&self) -> Vec2;

    /// Rotation in radians
    fn rotation(&self) -> f32;

    /// All three values at once
    fn snapshot(&self) -> Transform2D {
        Transform2D {
            position: self.position(),
            scale: self.scale(),
            rotation: self.rotation(),
        }
    }
}

impl TransformSource for Transform2D {
    fn position(&self) -> Point2 {
        self.position
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn snapshot(&self) -> Transform2D {
        *self
    }
}

impl TransformSource for Cell<Transform2D> {
    fn position(&self) -> Point2 {
        self.get().position
    }

    fn scale(&self) -> Vec2 {
        self.get().scale
    }

    fn rotation(&self) -> f32 {
        self.get().rotation
    }

    fn snapshot(&self) -> Transform2D {
        self.get()
    }
}

impl<T: TransformSource> TransformSource for RefCell<T> {
    fn position(&self) -> Point2 {
        self.borrow().position()
    }

    fn scale(&self) -> Vec2 {
        self.borrow().scale()
    }

    fn rotation(&self) -> f32 {
        self.borrow().rotation()
    }

    fn snapshot(&self) -> Transform2D {
        self.borrow().snapshot()
    }
}

/// Non-owning handle from a hitbox to its owner's transform
#[derive(Clone, Default)]
pub struct TransformRef {
    owner: Option<Weak<dyn TransformSource>>,
}

impl TransformRef {
    /// Identity transform, for hitboxes with no owning entity
    pub fn detached() -> Self {
        Self { owner: None }
    }

    /// Follow `owner` without keeping it alive
    pub fn follow<T: TransformSource + 'static>(owner: &Rc<T>) -> Self {
        let weak: Weak<T> = Rc::downgrade(owner);
        Self { owner: Some(weak) }
    }

    /// Whether this handle is bound to an owner
    pub fn is_detached(&self) -> bool {
        self.owner.is_none()
    }

    /// Current owner transform
    ///
    /// # Panics
    ///
    /// Panics if the owner has been dropped while the hitbox still follows it.
    pub fn snapshot(&self) -> Transform2D {
        match &self.owner {
            None => Transform2D::identity(),
            Some(weak) => match weak.upgrade() {
                Some(owner) => owner.snapshot(),
                None => panic!("hitbox outlived the owner transform it follows"),
            },
        }
    }
}

impl fmt::Debug for TransformRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            None => f.write_str("TransformRef::Detached"),
            Some(weak) => f
                .debug_struct("TransformRef")
                .field("alive", &(weak.strong_count() > 0))
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_is_identity() {
        let transform = TransformRef::detached();
        assert!(transform.is_detached());
        assert_eq!(transform.snapshot(), Transform2D::identity());
        assert!(!transform.snapshot().is_rotated());
    }

    #[test]
    fn test_follow_sees_owner_mutations() {
        let owner = Rc::new(RefCell::new(Transform2D::from_position(3.0, 4.0)));
        let transform = TransformRef::follow(&owner);
        assert_eq!(transform.snapshot().position, Point2::new(3.0, 4.0));

        owner.borrow_mut().rotation = 0.5;
        owner.borrow_mut().scale = Vec2::new(2.0, 3.0);
        let snapshot = transform.snapshot();
        assert_eq!(snapshot.rotation, 0.5);
        assert_eq!(snapshot.scale, Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_follow_does_not_keep_owner_alive() {
        let owner = Rc::new(Cell::new(Transform2D::identity()));
        let _transform = TransformRef::follow(&owner);
        assert_eq!(Rc::strong_count(&owner), 1);
    }

    #[test]
    #[should_panic(expected = "outlived")]
    fn test_dropped_owner_is_a_contract_violation() {
        let owner = Rc::new(Cell::new(Transform2D::identity()));
        let transform = TransformRef::follow(&owner);
        drop(owner);
        let _ = transform.snapshot();
    }
}
