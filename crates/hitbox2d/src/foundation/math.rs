//! Math utilities and types
//!
//! Provides the 2D math types used by the hitbox kernel.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// A polygon vertex in local or world units
pub type Vertex = Point2;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Squared Euclidean distance between two points
    pub fn distance_sq(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
        let dx = x2 - x1;
        let dy = y2 - y1;
        dx * dx + dy * dy
    }

    /// Euclidean distance between two points
    pub fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
        distance_sq(x1, y1, x2, y2).sqrt()
    }

    /// Signed shortest difference from `from` to `to`, wrapped into [-PI, PI)
    pub fn angle_diff(from: f32, to: f32) -> f32 {
        (to - from + constants::PI).rem_euclid(constants::TAU) - constants::PI
    }
}
