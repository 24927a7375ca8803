use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Point light plus ambient fill.
pub struct LightingOptions {
    /// Point light colour as `0xRRGGBB` (sRGB).
    pub point_color: u32,
    /// Point light luminous intensity.
    #[schemars(title = "Point Light", range(min = 0.0, max = 2000.0), extend("step" = 10.0))]
    pub point_intensity: f32,
    /// Point light world position.
    pub point_position: [f32; 3],
    /// Distance falloff exponent (2 = physically based inverse square).
    pub point_decay: f32,
    /// Ambient colour as `0xRRGGBB` (sRGB).
    pub ambient_color: u32,
    /// Ambient intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 10.0), extend("step" = 0.1))]
    pub ambient_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            point_color: 0xFF_FF_FF,
            point_intensity: 300.0,
            point_position: [0.0, 0.0, 0.0],
            point_decay: 2.0,
            ambient_color: 0xFF_FF_FF,
            ambient_intensity: 3.0,
        }
    }
}
