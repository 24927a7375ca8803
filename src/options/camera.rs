use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and initial placement.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Camera position before the first scroll update.
    pub start_position: [f32; 3],
    /// Point the camera faces at startup. The orientation is fixed after
    /// that; scrolling only translates the camera.
    pub look_at: [f32; 3],
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            start_position: [-3.0, 0.0, 30.0],
            look_at: [0.0, 0.0, 0.0],
        }
    }
}
