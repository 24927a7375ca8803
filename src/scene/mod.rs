//! Scene state: the camera plus every object the update loops mutate.
//!
//! [`SceneState`] replaces the process-wide singletons a page script would
//! use. Both update loops take it by `&mut`, so tests can build isolated
//! instances without a GPU or a window.

mod stars;

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

pub use self::stars::scatter_stars;
use crate::camera::Camera;
use crate::options::Options;

/// A renderable entity with a position and Euler rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    /// World-space position.
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order. Unbounded; the
    /// trigonometry wraps them.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

impl SceneObject {
    /// Unrotated, unit-scale object at `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Add `delta` radians to each rotation axis.
    pub fn spin(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Object-to-world matrix (translation * rotation * scale).
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            rotation,
            self.position,
        )
    }
}

/// Everything the scroll and frame loops read and write.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneState {
    /// The single viewpoint.
    pub camera: Camera,
    /// Ring at the origin, spun every frame.
    pub torus: SceneObject,
    /// Textured sphere, spun on scroll and every frame.
    pub moon: SceneObject,
    /// Textured cube, spun on scroll.
    pub avatar: SceneObject,
    /// Star positions. Stars never move after construction.
    pub stars: Vec<Vec3>,
}

impl SceneState {
    /// Lay out the scene from `options`, scattering stars with `rng`.
    pub fn new(options: &Options, aspect: f32, rng: &mut impl Rng) -> Self {
        let scene = &options.scene;
        Self {
            camera: Camera::new(&options.camera, aspect),
            torus: SceneObject::default(),
            moon: SceneObject::at(Vec3::from_array(scene.moon_position)),
            avatar: SceneObject::at(Vec3::from_array(scene.avatar_position)),
            stars: scatter_stars(
                rng,
                scene.star_count as usize,
                scene.star_spread,
            ),
        }
    }

    /// Like [`SceneState::new`], seeding the starfield from
    /// `options.scene.star_seed` when set.
    #[must_use]
    pub fn from_options(options: &Options, aspect: f32) -> Self {
        use rand::SeedableRng;

        match options.scene.star_seed {
            Some(seed) => {
                let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
                Self::new(options, aspect, &mut rng)
            }
            None => Self::new(options, aspect, &mut rand::rng()),
        }
    }

    /// Follow a viewport resize: only the camera aspect changes. Ignores
    /// zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }
}

/// Convert a `0xRRGGBB` sRGB colour to linear RGB.
#[must_use]
pub fn srgb_hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xFF) as f32 / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn state() -> SceneState {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        SceneState::new(&Options::default(), 1.0, &mut rng)
    }

    #[test]
    fn default_layout() {
        let s = state();
        assert_eq!(s.torus.position, Vec3::ZERO);
        assert_eq!(s.moon.position, Vec3::new(-10.0, 0.0, 30.0));
        assert_eq!(s.avatar.position, Vec3::new(2.0, 0.0, -5.0));
        assert_eq!(s.stars.len(), 200);
        assert_eq!(s.moon.rotation, Vec3::ZERO);
    }

    #[test]
    fn resize_changes_aspect_only() {
        use crate::motion::{advance_frame, apply_scroll};

        let motion = Options::default().motion;
        let mut s = state();
        apply_scroll(&mut s, -600, &motion);
        for _ in 0..5 {
            advance_frame(&mut s, &motion);
        }
        let before = s.clone();

        s.resize(1280, 720);
        assert_eq!(s.camera.aspect, 1280.0 / 720.0);
        assert_eq!(s.camera.position, before.camera.position);
        assert_eq!(s.camera.orientation, before.camera.orientation);
        assert_eq!(s.torus, before.torus);
        assert_eq!(s.moon, before.moon);
        assert_eq!(s.avatar, before.avatar);
        assert_eq!(s.stars, before.stars);
    }

    #[test]
    fn zero_sized_resize_is_ignored() {
        let mut s = state();
        let before = s.clone();
        s.resize(0, 720);
        s.resize(1280, 0);
        assert_eq!(s, before);
    }

    #[test]
    fn seeded_starfield_is_reproducible() {
        let mut opts = Options::default();
        opts.scene.star_seed = Some(42);
        let a = SceneState::from_options(&opts, 1.0);
        let b = SceneState::from_options(&opts, 1.0);
        assert_eq!(a.stars, b.stars);
    }

    #[test]
    fn model_matrix_places_and_rotates() {
        let mut obj = SceneObject::at(Vec3::new(1.0, 2.0, 3.0));
        assert!(obj
            .model_matrix()
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));

        obj.position = Vec3::ZERO;
        obj.spin(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
        let x = obj.model_matrix().transform_vector3(Vec3::X);
        assert!(x.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn hex_colors_linearize() {
        let white = srgb_hex_to_linear(0xFF_FF_FF);
        assert!(white.iter().all(|c| (c - 1.0).abs() < 1e-5));
        assert_eq!(srgb_hex_to_linear(0x00_00_00), [0.0, 0.0, 0.0]);
        let tomato = srgb_hex_to_linear(0xFF_63_47);
        assert!((tomato[0] - 1.0).abs() < 1e-5);
        assert!((tomato[1] - 0.1248).abs() < 1e-3);
        assert!((tomato[2] - 0.0630).abs() < 1e-3);
    }
}
