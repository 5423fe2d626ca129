//! Foundation module - shared utilities
//!
//! - [`math`]: nalgebra aliases, angle constants and distance helpers
//! - [`logging`]: `log` macros and `env_logger` setup

pub mod math;
pub mod logging;
