//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (camera, motion constants, lighting, scene layout,
//! viewer window) are consolidated here. Options serialize to/from TOML so a
//! preset file can override any subset of them.

mod camera;
mod lighting;
mod motion;
mod scene;
mod viewer;

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use camera::CameraOptions;
pub use lighting::LightingOptions;
pub use motion::MotionOptions;
pub use scene::SceneOptions;
pub use viewer::ViewerOptions;

use crate::error::StardriftError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and initial placement.
    pub camera: CameraOptions,
    /// Scroll coefficients and rotation increments.
    pub motion: MotionOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Object layout, colours and textures.
    pub scene: SceneOptions,
    /// Native window settings.
    #[schemars(skip)]
    pub viewer: ViewerOptions,
}

impl Options {
    /// Generate JSON Schema describing the tunable options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StardriftError::OptionsParse`] on malformed TOML.
    pub fn from_toml(content: &str) -> Result<Self, StardriftError> {
        toml::from_str(content)
            .map_err(|e| StardriftError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StardriftError::Io`] if the file cannot be read, or
    /// [`StardriftError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, StardriftError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`StardriftError::OptionsParse`] if serialization fails, or
    /// [`StardriftError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), StardriftError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| StardriftError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[motion]
camera_z_per_pixel = -0.02
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.motion.camera_z_per_pixel, -0.02);
        // Everything else should be default
        assert_eq!(opts.motion.camera_xy_per_pixel, -0.0002);
        assert_eq!(opts.scene.star_count, 200);
        assert_eq!(opts.camera.fovy, 75.0);
    }

    #[test]
    fn seed_is_optional() {
        let opts = Options::from_toml("[scene]\nstar_seed = 7\n").unwrap();
        assert_eq!(opts.scene.star_seed, Some(7));
        assert_eq!(Options::default().scene.star_seed, None);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[motion\n").unwrap_err();
        assert!(matches!(err, StardriftError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load() {
        let dir = std::env::temp_dir().join("stardrift-options-test");
        let path = dir.join("preset.toml");
        let mut opts = Options::default();
        opts.scene.star_count = 12;
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn bundled_presets_parse() {
        let slow = Options::from_toml(include_str!(
            "../../assets/presets/slow-drift.toml"
        ))
        .unwrap();
        assert_eq!(slow.motion.camera_z_per_pixel, -0.005);
        assert_eq!(slow.scene, SceneOptions::default());

        let dense = Options::from_toml(include_str!(
            "../../assets/presets/dense-field.toml"
        ))
        .unwrap();
        assert_eq!(dense.scene.star_count, 800);
        assert_eq!(dense.scene.star_seed, Some(42));
    }

    #[test]
    fn list_presets_returns_sorted_toml_stems() {
        let dir = std::env::temp_dir()
            .join(format!("stardrift-presets-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        Options::default().save(&dir.join("slow.toml")).unwrap();
        Options::default().save(&dir.join("dense.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let names = Options::list_presets(&dir);
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(names, vec!["dense".to_owned(), "slow".to_owned()]);
        assert!(Options::list_presets(&dir).is_empty());
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("motion"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("scene"));
        assert!(!props.contains_key("viewer"));

        let motion = &props["motion"]["properties"];
        assert!(motion.get("camera_z_per_pixel").is_some());
        assert!(motion.get("torus_frame_spin").is_some());
    }
}
