//! # hitbox2d
//!
//! 2D collision geometry for game entities.
//!
//! ## Features
//!
//! - **Shapes**: axis-aligned rectangles and arbitrary (non-convex) polygons
//! - **Cached Transforms**: shapes revalidate against their owner's position,
//!   scale and rotation only when asked to
//! - **Two-Phase Tests**: bounding-box rejection before any exact edge test
//! - **Distance Queries**: squared distances to points and other hitboxes
//! - **Data-Driven**: hitbox libraries loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use hitbox2d::prelude::*;
//!
//! let ship = Rc::new(RefCell::new(Transform2D::from_position(0.0, 0.0)));
//! let rock = Rc::new(RefCell::new(Transform2D::from_position(25.0, 0.0)));
//!
//! let ship_box = Hitbox::following(&ship, Shape::rectangle(-10.0, -10.0, 10.0, 10.0));
//! let rock_box = Hitbox::following(&rock, Shape::rectangle(-10.0, -10.0, 10.0, 10.0));
//! assert!(!ship_box.do_collision(&rock_box, 0.0, 0.0));
//!
//! rock.borrow_mut().position = Point2::new(15.0, 0.0);
//! assert!(ship_box.do_collision(&rock_box, 0.0, 0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::math::{Point2, Vec2, Vertex},
        physics::{
            BoundingBox, Hitbox, HitboxDescriptor, HitboxLibrary, LibraryError, PolygonShape,
            RectangleShape, RevalidationPolicy, Shape, ShapeError, ShapeKind, Transform2D,
            TransformRef, TransformSource,
        },
    };
}
