//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the stardrift crate.
#[derive(Debug)]
pub enum StardriftError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// WGSL composition failure (bad `#import` or syntax error).
    Shader(String),
    /// Failed to decode a texture image.
    TextureDecode(image::ImageError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser API failure (missing canvas, fetch error, ...).
    Web(String),
}

impl fmt::Display for StardriftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(msg) => write!(f, "shader composition error: {msg}"),
            Self::TextureDecode(e) => write!(f, "texture decode error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "web error: {msg}"),
        }
    }
}

impl std::error::Error for StardriftError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::TextureDecode(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for StardriftError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for StardriftError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<image::ImageError> for StardriftError {
    fn from(e: image::ImageError) -> Self {
        Self::TextureDecode(e)
    }
}
