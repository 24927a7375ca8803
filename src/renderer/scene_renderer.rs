//! Single-pass forward renderer for the whole scene.
//!
//! Draw order inside one render pass: backdrop, then the lit meshes (torus,
//! starfield, moon), then the unlit avatar cube. Bind group 0 carries the
//! camera and light; group 1 carries one object's uniform and maps.

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::background::BackgroundPass;
use super::mesh::MeshData;
use super::mesh_pass::{create_mesh_pipeline, MeshPass};
use crate::{
    assets::{TextureSet, TextureSlot},
    camera::CameraUniform,
    error::StardriftError,
    gpu::{
        lighting::LightingUniform,
        pipeline_helpers::{
            filtering_sampler, repeat_sampler, texture_2d, uniform_buffer,
        },
        render_context::RenderContext,
        shader_composer::{Shader, ShaderComposer},
        texture::{DepthTexture, SceneTexture, TextureEncoding},
    },
    options::Options,
    scene::{srgb_hex_to_linear, SceneState},
};

// ==================== GEOMETRY ====================

const TORUS_RADIUS: f32 = 10.0;
const TORUS_TUBE: f32 = 3.0;
const TORUS_RADIAL_SEGMENTS: u32 = 16;
const TORUS_TUBULAR_SEGMENTS: u32 = 100;

const STAR_RADIUS: f32 = 0.25;
const STAR_SEGMENTS: u32 = 24;

const MOON_RADIUS: f32 = 3.0;
const MOON_SEGMENTS: u32 = 32;

const AVATAR_SIZE: f32 = 2.0;

// Placeholder texels for maps that are absent or failed to load.
const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const FLAT_NORMAL: [u8; 4] = [128, 128, 255, 255];

// ==================== UNIFORMS ====================

/// Per-object uniform.
/// NOTE: Must match `ObjectUniform` in `modules/mesh.wgsl` (160 bytes)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    /// Object-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, for normals.
    pub normal_matrix: [[f32; 4]; 4],
    /// Linear RGBA base colour, multiplied with the colour map.
    pub color: [f32; 4],
    /// `x`: normal map strength (0 disables). `yzw` unused.
    pub params: [f32; 4],
}

impl ObjectUniform {
    /// Uniform for an object drawn with `model`.
    #[must_use]
    pub fn new(model: Mat4, color: [f32; 3], normal_strength: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            color: [color[0], color[1], color[2], 1.0],
            params: [normal_strength, 0.0, 0.0, 0.0],
        }
    }
}

// ==================== DRAW ITEMS ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Material {
    /// Lit by the point and ambient lights.
    Standard,
    /// Unlit.
    Basic,
}

/// Maps and base colour for one object.
struct Surface<'a> {
    color_map: &'a SceneTexture,
    normal_map: &'a SceneTexture,
    color: [f32; 3],
    normal_strength: f32,
}

/// One mesh plus its object uniform and bind group.
struct DrawItem {
    pass: MeshPass,
    material: Material,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    color: [f32; 3],
    normal_strength: f32,
}

impl DrawItem {
    fn new(
        device: &wgpu::Device,
        label: &str,
        pass: MeshPass,
        material: Material,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        surface: &Surface<'_>,
    ) -> Self {
        let uniform = ObjectUniform::new(
            Mat4::IDENTITY,
            surface.color,
            surface.normal_strength,
        );
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Object Buffer")),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(
                        &surface.color_map.view,
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(
                        &surface.normal_map.view,
                    ),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            pass,
            material,
            uniform_buffer,
            bind_group,
            color: surface.color,
            normal_strength: surface.normal_strength,
        }
    }

    fn write(&self, queue: &wgpu::Queue, model: Mat4) {
        let uniform = ObjectUniform::new(model, self.color, self.normal_strength);
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[uniform]),
        );
    }

    fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        self.pass.draw(render_pass);
    }
}

// ==================== RENDERER ====================

/// Owns every GPU resource needed to draw a [`SceneState`].
pub struct SceneRenderer {
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    standard_pipeline: wgpu::RenderPipeline,
    basic_pipeline: wgpu::RenderPipeline,
    background: BackgroundPass,
    torus: DrawItem,
    stars: DrawItem,
    moon: DrawItem,
    avatar: DrawItem,
    depth: DepthTexture,
}

impl SceneRenderer {
    /// Build pipelines, upload meshes and textures, and lay out the
    /// starfield from `state`.
    ///
    /// Missing or undecodable images become 1x1 placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`StardriftError::Shader`] if a shader fails to compose.
    pub fn new(
        context: &RenderContext,
        state: &SceneState,
        options: &Options,
        textures: &TextureSet,
    ) -> Result<Self, StardriftError> {
        let device = &context.device;
        let queue = &context.queue;
        let mut shader_composer = ShaderComposer::new()?;

        // Group 0: camera + lighting
        let frame_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Frame Layout"),
                entries: &[
                    uniform_buffer(
                        0,
                        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ),
                    uniform_buffer(1, wgpu::ShaderStages::FRAGMENT),
                ],
            });

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&state.camera);
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let lighting_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[LightingUniform::from_options(
                    &options.lighting,
                )]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let frame_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Frame Bind Group"),
                layout: &frame_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: lighting_buffer.as_entire_binding(),
                    },
                ],
            });

        // Group 1: object uniform + colour map + normal map + sampler
        let object_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Object Layout"),
                entries: &[
                    uniform_buffer(
                        0,
                        wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ),
                    texture_2d(1),
                    texture_2d(2),
                    filtering_sampler(3),
                ],
            });

        let layouts = [&frame_layout, &object_layout];
        let standard_pipeline = create_mesh_pipeline(
            context,
            "Standard Mesh",
            Shader::Standard,
            Some(wgpu::Face::Back),
            &layouts,
            &mut shader_composer,
        )?;
        let basic_pipeline = create_mesh_pipeline(
            context,
            "Basic Mesh",
            Shader::Basic,
            Some(wgpu::Face::Back),
            &layouts,
            &mut shader_composer,
        )?;

        // Textures
        let load = |slot: TextureSlot, encoding, fallback| {
            SceneTexture::load_or_placeholder(
                device,
                queue,
                slot.file_name(&options.scene),
                textures.get(slot),
                encoding,
                fallback,
            )
        };
        let background_texture =
            load(TextureSlot::Background, TextureEncoding::Srgb, BLACK);
        let avatar_texture =
            load(TextureSlot::Avatar, TextureEncoding::Srgb, WHITE);
        let moon_texture = load(TextureSlot::Moon, TextureEncoding::Srgb, WHITE);
        let moon_normal =
            load(TextureSlot::MoonNormal, TextureEncoding::Linear, FLAT_NORMAL);
        let white = SceneTexture::solid(
            device,
            queue,
            "White",
            WHITE,
            TextureEncoding::Srgb,
        );
        let flat_normal = SceneTexture::solid(
            device,
            queue,
            "Flat Normal",
            FLAT_NORMAL,
            TextureEncoding::Linear,
        );
        let sampler = repeat_sampler(device, "Surface Sampler");

        let background =
            BackgroundPass::new(context, &background_texture, &mut shader_composer)?;

        // Meshes
        let star_offsets: Vec<[f32; 3]> =
            state.stars.iter().map(|p| p.to_array()).collect();
        let item = |label: &'static str, pass, material, surface| {
            DrawItem::new(
                device,
                label,
                pass,
                material,
                &object_layout,
                &sampler,
                &surface,
            )
        };

        let torus = item(
            "Torus",
            MeshPass::single(
                device,
                "Torus",
                &MeshData::torus(
                    TORUS_RADIUS,
                    TORUS_TUBE,
                    TORUS_RADIAL_SEGMENTS,
                    TORUS_TUBULAR_SEGMENTS,
                ),
            ),
            Material::Standard,
            Surface {
                color_map: &white,
                normal_map: &flat_normal,
                color: srgb_hex_to_linear(options.scene.torus_color),
                normal_strength: 0.0,
            },
        );
        let stars = item(
            "Stars",
            MeshPass::new(
                device,
                "Stars",
                &MeshData::sphere(STAR_RADIUS, STAR_SEGMENTS, STAR_SEGMENTS),
                &star_offsets,
            ),
            Material::Standard,
            Surface {
                color_map: &white,
                normal_map: &flat_normal,
                color: srgb_hex_to_linear(options.scene.star_color),
                normal_strength: 0.0,
            },
        );
        let moon = item(
            "Moon",
            MeshPass::single(
                device,
                "Moon",
                &MeshData::sphere(MOON_RADIUS, MOON_SEGMENTS, MOON_SEGMENTS),
            ),
            Material::Standard,
            Surface {
                color_map: &moon_texture,
                normal_map: &moon_normal,
                color: [1.0; 3],
                normal_strength: 1.0,
            },
        );
        let avatar = item(
            "Avatar",
            MeshPass::single(
                device,
                "Avatar",
                &MeshData::cuboid(AVATAR_SIZE, AVATAR_SIZE, AVATAR_SIZE),
            ),
            Material::Basic,
            Surface {
                color_map: &avatar_texture,
                normal_map: &flat_normal,
                color: [1.0; 3],
                normal_strength: 0.0,
            },
        );

        log::info!(
            "scene renderer ready: {} stars, surface {:?}",
            stars.pass.instance_count(),
            context.render_format()
        );

        Ok(Self {
            camera_uniform,
            camera_buffer,
            lighting_buffer,
            frame_bind_group,
            standard_pipeline,
            basic_pipeline,
            background,
            torus,
            stars,
            moon,
            avatar,
            depth: DepthTexture::new(device, context.width(), context.height()),
        })
    }

    /// Recreate size-dependent targets after the surface was resized.
    pub fn resize(&mut self, context: &RenderContext) {
        self.depth =
            DepthTexture::new(&context.device, context.width(), context.height());
    }

    /// Upload the camera and object transforms from `state`.
    pub fn update(&mut self, queue: &wgpu::Queue, state: &SceneState) {
        self.camera_uniform.update_view_proj(&state.camera);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        self.torus.write(queue, state.torus.model_matrix());
        self.stars.write(queue, Mat4::IDENTITY);
        self.moon.write(queue, state.moon.model_matrix());
        self.avatar.write(queue, state.avatar.model_matrix());
    }

    /// Draw `state` to the next swapchain image and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if no swapchain image could be
    /// acquired.
    pub fn render(
        &mut self,
        context: &RenderContext,
        state: &SceneState,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = context.get_next_frame()?;
        let view = context.frame_view(&frame);
        self.update(&context.queue, state);

        let mut encoder = context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });
            self.encode(&mut render_pass);
        }
        context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn encode<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        self.background.draw(render_pass);

        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        for material in [Material::Standard, Material::Basic] {
            render_pass.set_pipeline(match material {
                Material::Standard => &self.standard_pipeline,
                Material::Basic => &self.basic_pipeline,
            });
            for item in [&self.torus, &self.stars, &self.moon, &self.avatar] {
                if item.material == material {
                    item.draw(render_pass);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::{EulerRot, Quat, Vec3, Vec4};

    use super::*;

    #[test]
    fn object_uniform_matches_wgsl_size() {
        assert_eq!(size_of::<ObjectUniform>(), 160);
    }

    #[test]
    fn normal_matrix_of_rigid_transform_is_its_rotation() {
        let rotation = Quat::from_euler(EulerRot::XYZ, 0.3, 1.1, -0.4);
        let model =
            Mat4::from_rotation_translation(rotation, Vec3::new(-10.0, 0.0, 30.0));
        let u = ObjectUniform::new(model, [1.0; 3], 1.0);
        let n = Mat4::from_cols_array_2d(&u.normal_matrix);
        let expected = Mat4::from_quat(rotation);
        assert!(n
            .transform_vector3(Vec3::X)
            .abs_diff_eq(expected.transform_vector3(Vec3::X), 1e-5));
        assert!(n
            .transform_vector3(Vec3::Y)
            .abs_diff_eq(expected.transform_vector3(Vec3::Y), 1e-5));
    }

    #[test]
    fn object_uniform_packs_color_and_strength() {
        let u = ObjectUniform::new(Mat4::IDENTITY, [1.0, 0.5, 0.25], 0.75);
        assert_eq!(u.color, [1.0, 0.5, 0.25, 1.0]);
        assert_eq!(u.params[0], 0.75);
        assert_eq!(
            Vec4::from_array(u.model[3]),
            Vec4::new(0.0, 0.0, 0.0, 1.0)
        );
    }
}
