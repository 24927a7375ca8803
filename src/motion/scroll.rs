//! Scroll-driven camera update.

use glam::Vec3;

use crate::options::MotionOptions;
use crate::scene::SceneState;

/// Camera position for scroll `offset` (pixels from the top, non-positive
/// as the page scrolls down). Pure in `offset`.
#[must_use]
pub fn camera_position(offset: i32, motion: &MotionOptions) -> Vec3 {
    let t = offset as f32;
    let xy = t * motion.camera_xy_per_pixel;
    Vec3::new(xy, xy, t * motion.camera_z_per_pixel)
}

/// Handle one scroll event: place the camera from `offset` and advance the
/// moon and avatar by one scroll increment.
///
/// Camera placement is idempotent; the rotation step is not. Every call
/// counts, so spin speed follows the scroll-event rate of the host.
pub fn apply_scroll(state: &mut SceneState, offset: i32, motion: &MotionOptions) {
    state.moon.spin(Vec3::from_array(motion.moon_scroll_spin));
    state.avatar.spin(Vec3::from_array(motion.avatar_scroll_spin));
    place_camera(state, offset, motion);
}

/// Move the camera to the position for `offset` without a rotation step.
///
/// Used to catch up with scrolling that happened while no scroll handler
/// was listening.
pub fn place_camera(state: &mut SceneState, offset: i32, motion: &MotionOptions) {
    state.camera.position = camera_position(offset, motion);
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;
    use crate::options::Options;

    fn state() -> SceneState {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        SceneState::new(&Options::default(), 1.0, &mut rng)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn offset_maps_to_camera_position() {
        let pos = camera_position(-1000, &MotionOptions::default());
        assert!(close(pos.z, 10.0));
        assert!(close(pos.x, 0.2));
        assert!(close(pos.y, 0.2));
    }

    #[test]
    fn top_of_page_puts_camera_at_origin() {
        let mut s = state();
        apply_scroll(&mut s, 0, &MotionOptions::default());
        assert_eq!(s.camera.position, Vec3::ZERO);
    }

    #[test]
    fn same_offset_same_camera_but_rotation_accumulates() {
        let motion = MotionOptions::default();
        let mut s = state();

        apply_scroll(&mut s, -250, &motion);
        let cam_first = s.camera.position;
        let moon_first = s.moon.rotation;
        let avatar_first = s.avatar.rotation;

        apply_scroll(&mut s, -250, &motion);
        assert_eq!(s.camera.position, cam_first);
        assert!(s.moon.rotation.x > moon_first.x);
        assert!(s.moon.rotation.y > moon_first.y);
        assert!(s.moon.rotation.z > moon_first.z);
        assert!(s.avatar.rotation.y > avatar_first.y);
    }

    #[test]
    fn two_scroll_events_scenario() {
        let motion = MotionOptions::default();
        let mut s = state();

        apply_scroll(&mut s, -500, &motion);
        assert!(close(s.camera.position.z, 5.0));
        apply_scroll(&mut s, -1000, &motion);
        assert!(close(s.camera.position.z, 10.0));

        assert!(close(s.moon.rotation.x, 0.10));
        assert!(close(s.moon.rotation.y, 0.15));
        assert!(close(s.moon.rotation.z, 0.10));
        assert!(close(s.avatar.rotation.y, 0.02));
        assert_eq!(s.avatar.rotation.x, 0.0);
    }

    #[test]
    fn rotation_step_ignores_offset_magnitude() {
        let motion = MotionOptions::default();
        let mut near = state();
        let mut far = state();
        apply_scroll(&mut near, -1, &motion);
        apply_scroll(&mut far, -100_000, &motion);
        assert_eq!(near.moon.rotation, far.moon.rotation);
        assert_eq!(near.avatar.rotation, far.avatar.rotation);
    }

    #[test]
    fn scroll_leaves_torus_and_stars_alone() {
        let mut s = state();
        let torus = s.torus;
        let stars = s.stars.clone();
        apply_scroll(&mut s, -700, &MotionOptions::default());
        assert_eq!(s.torus, torus);
        assert_eq!(s.stars, stars);
    }

    #[test]
    fn placing_the_camera_does_not_spin_anything() {
        let motion = MotionOptions::default();
        let mut s = state();
        apply_scroll(&mut s, -200, &motion);
        let moon = s.moon;
        let avatar = s.avatar;

        place_camera(&mut s, -1000, &motion);
        assert!(close(s.camera.position.z, 10.0));
        assert!(close(s.camera.position.x, 0.2));
        assert_eq!(s.moon, moon);
        assert_eq!(s.avatar, avatar);
    }
}
