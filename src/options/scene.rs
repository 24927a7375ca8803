use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Object placement, colours, starfield and texture file names.
pub struct SceneOptions {
    /// Directory (native) or URL prefix (web) holding the textures.
    pub asset_dir: String,
    /// Backdrop texture file.
    pub background_texture: String,
    /// Avatar cube texture file.
    pub avatar_texture: String,
    /// Moon colour map file.
    pub moon_texture: String,
    /// Moon normal map file.
    pub moon_normal_texture: String,
    /// Torus colour as `0xRRGGBB` (sRGB).
    pub torus_color: u32,
    /// Star colour as `0xRRGGBB` (sRGB).
    pub star_color: u32,
    /// Number of stars scattered around the scene.
    #[schemars(title = "Stars", range(min = 0, max = 5000))]
    pub star_count: u32,
    /// Edge length of the cube stars are scattered in, centered on the
    /// origin.
    pub star_spread: f32,
    /// Fixed RNG seed for the starfield. `None` gives a new field per run.
    pub star_seed: Option<u64>,
    /// Moon world position.
    pub moon_position: [f32; 3],
    /// Avatar world position.
    pub avatar_position: [f32; 3],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            asset_dir: "assets".to_owned(),
            background_texture: "space.jpg".to_owned(),
            avatar_texture: "sara.jpeg".to_owned(),
            moon_texture: "moon.jpg".to_owned(),
            moon_normal_texture: "normal.jpg".to_owned(),
            torus_color: 0xFF_63_47,
            star_color: 0xFF_FF_FF,
            star_count: 200,
            star_spread: 100.0,
            star_seed: None,
            moon_position: [-10.0, 0.0, 30.0],
            avatar_position: [2.0, 0.0, -5.0],
        }
    }
}
