//! Rendering for the scene.
//!
//! [`scene_renderer::SceneRenderer`] owns the pipelines and draws a
//! [`crate::scene::SceneState`] in a single forward pass; [`mesh`] builds the
//! procedural geometry it uploads.

pub(crate) mod background;
pub mod mesh;
pub(crate) mod mesh_pass;
pub(crate) mod pipeline_util;
pub mod scene_renderer;

pub use scene_renderer::{ObjectUniform, SceneRenderer};
