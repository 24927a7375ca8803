use glam::{Mat4, Quat, Vec3};

use crate::options::CameraOptions;

/// Perspective camera with a free position and a fixed orientation.
///
/// The orientation is derived once from a look-at target; afterwards only
/// the position moves (driven by the scroll offset).
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub position: Vec3,
    /// Camera-to-world rotation.
    pub orientation: Quat,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and eye position.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
}

impl Camera {
    /// Camera at `options.start_position` facing `options.look_at`.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let position = Vec3::from_array(options.start_position);
        let target = Vec3::from_array(options.look_at);
        Self {
            position,
            orientation: look_rotation(position, target),
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Recompute the aspect ratio for a new viewport size. Ignores
    /// zero-sized dimensions.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Direction the camera faces in world space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// World-to-camera matrix.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
            .inverse()
    }

    /// Projection matrix.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }
}

/// Rotation that points the camera's -Z axis from `eye` toward `target`
/// with +Y up. Falls back to identity when the two points coincide.
fn look_rotation(eye: Vec3, target: Vec3) -> Quat {
    if eye.distance_squared(target) <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    let view = Mat4::look_at_rh(eye, target, Vec3::Y);
    let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
    rotation.normalize()
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.position.to_array();
        self.aspect = camera.aspect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(&CameraOptions::default(), 16.0 / 9.0)
    }

    #[test]
    fn starts_facing_the_origin() {
        let cam = camera();
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!(cam.forward().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = camera();
        let clip = cam.build_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4);
        assert!(ndc.y.abs() < 1e-4);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn viewport_sets_aspect() {
        let mut cam = camera();
        cam.set_viewport(800, 400);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn zero_viewport_is_ignored() {
        let mut cam = camera();
        cam.set_viewport(0, 400);
        cam.set_viewport(800, 0);
        assert_eq!(cam.aspect, 16.0 / 9.0);
    }

    #[test]
    fn moving_keeps_orientation() {
        let mut cam = camera();
        let before = cam.forward();
        cam.position = Vec3::new(0.2, 0.2, 10.0);
        assert!(cam.forward().abs_diff_eq(before, 1e-6));
    }

    #[test]
    fn uniform_tracks_camera() {
        let mut cam = camera();
        cam.position = Vec3::new(1.0, 2.0, 3.0);
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&cam);
        assert_eq!(uniform.position, [1.0, 2.0, 3.0]);
        assert_eq!(uniform.aspect, cam.aspect);
    }
}
