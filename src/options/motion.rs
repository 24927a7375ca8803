use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
/// Scroll-to-camera coefficients and per-update rotation increments.
///
/// Rotation increments are radians added per invocation of the owning loop
/// (per scroll event or per frame), not per second.
pub struct MotionOptions {
    /// Camera Z per pixel of scroll offset.
    pub camera_z_per_pixel: f32,
    /// Camera X and Y per pixel of scroll offset.
    pub camera_xy_per_pixel: f32,
    /// Moon rotation added on every scroll event.
    pub moon_scroll_spin: [f32; 3],
    /// Avatar rotation added on every scroll event.
    pub avatar_scroll_spin: [f32; 3],
    /// Torus rotation added on every frame.
    pub torus_frame_spin: [f32; 3],
    /// Moon rotation added on every frame.
    pub moon_frame_spin: [f32; 3],
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            camera_z_per_pixel: -0.01,
            camera_xy_per_pixel: -0.0002,
            moon_scroll_spin: [0.05, 0.075, 0.05],
            avatar_scroll_spin: [0.0, 0.01, 0.0],
            torus_frame_spin: [0.01, 0.005, 0.01],
            moon_frame_spin: [0.005, 0.0, 0.0],
        }
    }
}
