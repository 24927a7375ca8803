use glam::Vec3;
use rand::Rng;

/// Scatter `count` points uniformly in a cube of edge `spread` centered on
/// the origin.
pub fn scatter_stars(rng: &mut impl Rng, count: usize, spread: f32) -> Vec<Vec3> {
    let half = spread.abs() * 0.5;
    if half == 0.0 || !half.is_finite() {
        return vec![Vec3::ZERO; count];
    }
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.random_range(-half..half),
                rng.random_range(-half..half),
                rng.random_range(-half..half),
            )
        })
        .collect()
}
