//! Sampled image textures and the depth attachment.

use crate::error::StardriftError;

/// Format of the depth attachment used by every scene pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// How texel values should be interpreted when sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureEncoding {
    /// Colour maps: decoded from sRGB to linear on sample.
    Srgb,
    /// Data maps (normals): sampled as stored.
    Linear,
}

impl TextureEncoding {
    fn format(self) -> wgpu::TextureFormat {
        match self {
            Self::Srgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            Self::Linear => wgpu::TextureFormat::Rgba8Unorm,
        }
    }
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaPixels {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// Tightly packed RGBA8 rows, top row first.
    pub data: Vec<u8>,
}

/// Decode an encoded image (PNG or JPEG) into RGBA8 pixels.
///
/// # Errors
///
/// Returns [`StardriftError::TextureDecode`] if the bytes are not a
/// supported image.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaPixels, StardriftError> {
    let rgba = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RgbaPixels {
        width,
        height,
        data: rgba.into_raw(),
    })
}

/// A sampled 2D texture and its default view.
pub struct SceneTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl SceneTexture {
    /// Upload RGBA8 pixels.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        pixels: &RgbaPixels,
        encoding: TextureEncoding,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: pixels.width,
            height: pixels.height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: encoding.format(),
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(pixels.width * 4),
                rows_per_image: Some(pixels.height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// A 1x1 texture of a single texel.
    pub fn solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        rgba: [u8; 4],
        encoding: TextureEncoding,
    ) -> Self {
        let pixels = RgbaPixels {
            width: 1,
            height: 1,
            data: rgba.to_vec(),
        };
        Self::from_rgba(device, queue, label, &pixels, encoding)
    }

    /// Upload `bytes` if present and decodable, otherwise a 1x1 `fallback`.
    ///
    /// A missing or broken image never stops the scene; it only logs.
    pub fn load_or_placeholder(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        bytes: Option<&[u8]>,
        encoding: TextureEncoding,
        fallback: [u8; 4],
    ) -> Self {
        match bytes.map(decode_rgba) {
            Some(Ok(pixels)) => {
                log::debug!("{label}: {}x{}", pixels.width, pixels.height);
                Self::from_rgba(device, queue, label, &pixels, encoding)
            }
            Some(Err(e)) => {
                log::warn!("{label}: {e}; using placeholder");
                Self::solid(device, queue, label, fallback, encoding)
            }
            None => {
                log::warn!("{label}: image not available; using placeholder");
                Self::solid(device, queue, label, fallback, encoding)
            }
        }
    }
}

/// Depth attachment sized to the surface.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Create a depth texture of the given size.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png(width: u32, height: u32, pixel: [u8; 4]) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(pixel));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba8() {
        let pixels = decode_rgba(&png(3, 2, [10, 20, 30, 255])).unwrap();
        assert_eq!((pixels.width, pixels.height), (3, 2));
        assert_eq!(pixels.data.len(), 3 * 2 * 4);
        assert_eq!(&pixels.data[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = decode_rgba(b"definitely not an image").unwrap_err();
        assert!(matches!(err, StardriftError::TextureDecode(_)));
    }

    #[test]
    fn encoding_picks_format() {
        assert_eq!(
            TextureEncoding::Srgb.format(),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
        assert_eq!(
            TextureEncoding::Linear.format(),
            wgpu::TextureFormat::Rgba8Unorm
        );
    }
}
