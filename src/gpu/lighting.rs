use crate::options::LightingOptions;
use crate::scene::srgb_hex_to_linear;

/// Point + ambient light shared by every lit shader.
/// NOTE: Must match WGSL struct layout exactly (48 bytes)
///
/// WGSL layout:
///   point_position: vec3<f32>   (offset 0,  align 16)
///   point_intensity: f32        (offset 12)
///   point_color: vec3<f32>      (offset 16, align 16)
///   point_decay: f32            (offset 28)
///   ambient_color: vec3<f32>    (offset 32, align 16)
///   ambient_intensity: f32      (offset 44)
///   Total: 48 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// World-space light position.
    pub point_position: [f32; 3],
    /// Luminous intensity of the point light.
    pub point_intensity: f32,
    /// Linear RGB colour of the point light.
    pub point_color: [f32; 3],
    /// Distance falloff exponent.
    pub point_decay: f32,
    /// Linear RGB colour of the ambient light.
    pub ambient_color: [f32; 3],
    /// Ambient intensity.
    pub ambient_intensity: f32,
}

impl LightingUniform {
    /// Build the GPU uniform from options, converting hex colours to linear.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            point_position: options.point_position,
            point_intensity: options.point_intensity,
            point_color: srgb_hex_to_linear(options.point_color),
            point_decay: options.point_decay,
            ambient_color: srgb_hex_to_linear(options.ambient_color),
            ambient_intensity: options.ambient_intensity,
        }
    }
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_wgsl() {
        assert_eq!(size_of::<LightingUniform>(), 48);
    }

    #[test]
    fn defaults_are_white_point_at_origin() {
        let u = LightingUniform::default();
        assert_eq!(u.point_position, [0.0, 0.0, 0.0]);
        assert_eq!(u.point_intensity, 300.0);
        assert_eq!(u.point_decay, 2.0);
        assert_eq!(u.ambient_intensity, 3.0);
        for c in u.point_color.iter().chain(u.ambient_color.iter()) {
            assert!((c - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn options_flow_through() {
        let options = LightingOptions {
            point_position: [1.0, 2.0, 3.0],
            point_intensity: 10.0,
            ambient_color: 0x000000,
            ..LightingOptions::default()
        };
        let u = LightingUniform::from_options(&options);
        assert_eq!(u.point_position, [1.0, 2.0, 3.0]);
        assert_eq!(u.point_intensity, 10.0);
        assert_eq!(u.ambient_color, [0.0, 0.0, 0.0]);
    }
}
