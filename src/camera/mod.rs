//! Camera for 3D scene viewing.
//!
//! A perspective camera whose orientation is fixed at startup and whose
//! position is driven by the scroll offset.

/// Core camera struct and GPU uniform type.
pub mod core;

pub use self::core::{Camera, CameraUniform};
