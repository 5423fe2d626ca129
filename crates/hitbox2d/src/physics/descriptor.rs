//! Data-driven hitbox definitions
//!
//! Hosts can author hitboxes as data (TOML or RON) instead of code. A
//! [`HitboxLibrary`] is a named set of [`HitboxDescriptor`]s plus the
//! revalidation policy new hitboxes start with.
//!
//! ```ron
//! (
//!     policy: AlwaysWhileRotated,
//!     hitboxes: {
//!         "ship": Polygon(vertices: [(0.0, -12.0), (8.0, 10.0), (-8.0, 10.0)]),
//!         "crate": Rectangle(x1: -4.0, y1: -4.0, x2: 4.0, y2: 4.0),
//!     },
//! )
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::Point2;
use crate::physics::collision::{Shape, ShapeError, ShapeRef};
use crate::physics::hitbox::{Hitbox, RevalidationPolicy};
use crate::physics::transform::{TransformRef, TransformSource};

/// Source geometry of one hitbox
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HitboxDescriptor {
    /// Rectangle from two corners
    Rectangle {
        /// First corner x
        x1: f32,
        /// First corner y
        y1: f32,
        /// Second corner x
        x2: f32,
        /// Second corner y
        y2: f32,
    },
    /// Polygon from its vertices in winding order
    Polygon {
        /// `(x, y)` pairs
        vertices: Vec<(f32, f32)>,
    },
}

impl HitboxDescriptor {
    /// Build the described shape
    pub fn to_shape(&self) -> Result<Shape, ShapeError> {
        match self {
            Self::Rectangle { x1, y1, x2, y2 } => Ok(Shape::rectangle(*x1, *y1, *x2, *y2)),
            Self::Polygon { vertices } => Shape::polygon(
                vertices
                    .iter()
                    .map(|&(x, y)| Point2::new(x, y))
                    .collect::<Vec<_>>(),
            ),
        }
    }
}

impl From<ShapeRef<'_>> for HitboxDescriptor {
    fn from(shape: ShapeRef<'_>) -> Self {
        match shape {
            ShapeRef::Rectangle(rectangle) => {
                let a = rectangle.source_top_left();
                let b = rectangle.source_bottom_right();
                Self::Rectangle { x1: a.x, y1: a.y, x2: b.x, y2: b.y }
            }
            ShapeRef::Polygon(polygon) => Self::Polygon {
                vertices: polygon.source_vertices().iter().map(|v| (v.x, v.y)).collect(),
            },
        }
    }
}

impl From<&Hitbox> for HitboxDescriptor {
    fn from(hitbox: &Hitbox) -> Self {
        hitbox.original_shape().into()
    }
}

/// Errors from building hitboxes out of a library
#[derive(thiserror::Error, Debug)]
pub enum LibraryError {
    /// No descriptor under that name
    #[error("Unknown hitbox: {0}")]
    UnknownHitbox(String),

    /// A descriptor's geometry was rejected
    #[error("Invalid shape: {0}")]
    Shape(#[from] ShapeError),

    /// The library file could not be read
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Named hitbox descriptors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitboxLibrary {
    /// Policy every built hitbox starts with
    #[serde(default)]
    pub policy: RevalidationPolicy,
    /// Descriptors by name
    #[serde(default)]
    pub hitboxes: BTreeMap<String, HitboxDescriptor>,
}

impl Config for HitboxLibrary {}

impl HitboxLibrary {
    /// Empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library and check that every descriptor builds
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LibraryError> {
        let path = path.as_ref();
        let library = Self::load_from_file(path)?;
        library.check()?;
        log::debug!(
            "Loaded {} hitbox descriptors from {}",
            library.hitboxes.len(),
            path.display()
        );
        Ok(library)
    }

    /// Fail on the first descriptor whose shape is invalid
    pub fn check(&self) -> Result<(), LibraryError> {
        for descriptor in self.hitboxes.values() {
            descriptor.to_shape()?;
        }
        Ok(())
    }

    /// Add or replace a descriptor, returning the previous one
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        descriptor: HitboxDescriptor,
    ) -> Option<HitboxDescriptor> {
        self.hitboxes.insert(name.into(), descriptor)
    }

    /// Descriptor by name
    pub fn get(&self, name: &str) -> Option<&HitboxDescriptor> {
        self.hitboxes.get(name)
    }

    fn build_with(&self, name: &str, transform: TransformRef) -> Result<Hitbox, LibraryError> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| LibraryError::UnknownHitbox(name.to_string()))?;
        let shape = descriptor.to_shape()?;
        let mut hitbox = Hitbox::with_transform(shape, transform).with_policy(self.policy);
        hitbox.update(false);
        Ok(hitbox)
    }

    /// Detached hitbox from the named descriptor
    pub fn build(&self, name: &str) -> Result<Hitbox, LibraryError> {
        self.build_with(name, TransformRef::detached())
    }

    /// Hitbox from the named descriptor, following `owner`
    pub fn build_following<T: TransformSource + 'static>(
        &self,
        name: &str,
        owner: &Rc<T>,
    ) -> Result<Hitbox, LibraryError> {
        self.build_with(name, TransformRef::follow(owner))
    }
}
