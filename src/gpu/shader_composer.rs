use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor, ShaderLanguage,
    ShaderType,
};

use crate::error::StardriftError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads all shared WGSL modules at construction time. Consuming shaders
/// use `#import stardrift::module_name` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/fullscreen.wgsl"),
        file_path: "modules/fullscreen.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/mesh.wgsl"),
        file_path: "modules/mesh.wgsl",
    },
];

/// Top-level shaders the renderer builds pipelines from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shader {
    /// Lit, optionally textured and normal-mapped meshes.
    Standard,
    /// Unlit textured meshes.
    Basic,
    /// Fullscreen background image.
    Background,
}

impl Shader {
    /// Every shader, for eager compilation checks.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Basic, Self::Background];

    fn source(self) -> &'static str {
        match self {
            Self::Standard => {
                include_str!("../../assets/shaders/raster/standard.wgsl")
            }
            Self::Basic => include_str!("../../assets/shaders/raster/basic.wgsl"),
            Self::Background => {
                include_str!("../../assets/shaders/raster/background.wgsl")
            }
        }
    }

    /// Path used in composer diagnostics.
    pub fn file_path(self) -> &'static str {
        match self {
            Self::Standard => "raster/standard.wgsl",
            Self::Basic => "raster/basic.wgsl",
            Self::Background => "raster/background.wgsl",
        }
    }
}

impl ShaderComposer {
    /// Register every shared module.
    ///
    /// # Errors
    ///
    /// Returns [`StardriftError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, StardriftError> {
        let mut composer = Composer::default();

        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    StardriftError::Shader(format!(
                        "failed to register '{}': {e:?}",
                        m.file_path
                    ))
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose `shader` into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`StardriftError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        shader: Shader,
    ) -> Result<wgpu::ShaderModule, StardriftError> {
        let naga_module = self.compose_naga(shader).map_err(|e| {
            StardriftError::Shader(format!("{}: {e}", shader.file_path()))
        })?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without creating a wgpu shader
    /// module. Useful for testing shader composition without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns the composer error unchanged.
    pub fn compose_naga(
        &mut self,
        shader: Shader,
    ) -> Result<naga::Module, Box<naga_oil::compose::ComposerError>> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source(),
                file_path: shader.file_path(),
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in Shader::ALL {
            let _ = composer.compose_naga(shader).unwrap_or_else(|e| {
                panic!("Shader '{}' failed to compose: {e}", shader.file_path())
            });
        }
    }

    #[test]
    fn composed_shaders_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in Shader::ALL {
            let module = composer.compose_naga(shader).unwrap();
            let mut validator = naga::valid::Validator::new(
                naga::valid::ValidationFlags::all(),
                naga::valid::Capabilities::empty(),
            );
            let _ = validator.validate(&module).unwrap_or_else(|e| {
                panic!("Shader '{}' failed validation: {e:?}", shader.file_path())
            });
        }
    }

    #[test]
    fn shaders_expose_vs_and_fs_entry_points() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in Shader::ALL {
            let module = composer.compose_naga(shader).unwrap();
            let names: Vec<&str> =
                module.entry_points.iter().map(|e| e.name.as_str()).collect();
            assert!(names.contains(&"vs_main"), "{}", shader.file_path());
            assert!(names.contains(&"fs_main"), "{}", shader.file_path());
        }
    }
}
