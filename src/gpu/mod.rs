//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, lighting, textures, and
//! shader composition.

/// GPU lighting uniform.
pub mod lighting;
/// Shared wgpu boilerplate helpers for bind group layouts and pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Sampled image textures and the depth attachment.
pub mod texture;
