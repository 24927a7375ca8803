//! Shared indexed-mesh pipeline and buffer helpers.
//!
//! Every scene mesh is drawn with the same vertex format plus a per-instance
//! offset buffer, so the torus, moon and avatar are one-instance draws and
//! the starfield is one instanced draw.

use wgpu::util::DeviceExt;

use super::mesh::{
    instance_offset_buffer_layout, mesh_vertex_buffer_layout, MeshData,
};
use crate::{
    error::StardriftError,
    gpu::{
        render_context::RenderContext,
        shader_composer::{Shader, ShaderComposer},
    },
    renderer::pipeline_util,
};

/// Create a standard indexed-mesh render pipeline.
pub(crate) fn create_mesh_pipeline(
    context: &RenderContext,
    label: &str,
    shader: Shader,
    cull_mode: Option<wgpu::Face>,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    shader_composer: &mut ShaderComposer,
) -> Result<wgpu::RenderPipeline, StardriftError> {
    let module = shader_composer.compose(&context.device, label, shader)?;

    let pipeline_layout = context.device.create_pipeline_layout(
        &wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        },
    );

    Ok(context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some("vs_main"),
                buffers: &[
                    mesh_vertex_buffer_layout(),
                    instance_offset_buffer_layout(),
                ],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: Some("fs_main"),
                targets: &pipeline_util::color_target(context.render_format()),
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode,
                ..Default::default()
            },
            depth_stencil: Some(pipeline_util::depth_stencil_state()),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        }))
}

/// A mesh uploaded to the GPU with its instance offsets.
pub(crate) struct MeshPass {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    index_count: u32,
    instance_count: u32,
}

impl MeshPass {
    /// Upload `mesh` once, drawn at each offset in `instances`.
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        mesh: &MeshData,
        instances: &[[f32; 3]],
    ) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        // A zero-length vertex buffer is invalid; keep one slot around even
        // for an empty starfield.
        let placeholder = [[0.0_f32; 3]];
        let instance_data = if instances.is_empty() {
            &placeholder[..]
        } else {
            instances
        };
        let instance_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Instances")),
                contents: bytemuck::cast_slice(instance_data),
                usage: wgpu::BufferUsages::VERTEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            instance_buffer,
            index_count: mesh.index_count(),
            instance_count: instances.len() as u32,
        }
    }

    /// A single instance at the object's own origin.
    pub fn single(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        Self::new(device, label, mesh, &[[0.0; 3]])
    }

    /// Bind buffers and draw every instance.
    ///
    /// Caller must set the pipeline and bind groups before calling this.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.index_count == 0 || self.instance_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }

    /// Number of instances drawn.
    pub fn instance_count(&self) -> u32 {
        self.instance_count
    }
}
