//! Fullscreen backdrop image drawn before any mesh.

use crate::{
    error::StardriftError,
    gpu::{
        pipeline_helpers::{
            create_screen_space_pipeline, filtering_sampler, linear_sampler,
            texture_2d,
        },
        render_context::RenderContext,
        shader_composer::{Shader, ShaderComposer},
        texture::SceneTexture,
    },
    renderer::pipeline_util,
};

/// Fullscreen triangle sampling the background texture.
pub(crate) struct BackgroundPass {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
}

impl BackgroundPass {
    pub fn new(
        context: &RenderContext,
        texture: &SceneTexture,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, StardriftError> {
        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Background Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            },
        );
        let sampler = linear_sampler(&context.device, "Background Sampler");
        let bind_group =
            context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Background Bind Group"),
                    layout: &layout,
                    entries: &[
                        wgpu::BindGroupEntry {
                            binding: 0,
                            resource: wgpu::BindingResource::TextureView(
                                &texture.view,
                            ),
                        },
                        wgpu::BindGroupEntry {
                            binding: 1,
                            resource: wgpu::BindingResource::Sampler(&sampler),
                        },
                    ],
                });

        let shader = shader_composer.compose(
            &context.device,
            "Background Shader",
            Shader::Background,
        )?;
        let pipeline = create_screen_space_pipeline(
            &context.device,
            "Background",
            &shader,
            context.render_format(),
            Some(pipeline_util::backdrop_depth_stencil_state()),
            &[&layout],
        );

        Ok(Self {
            pipeline,
            bind_group,
        })
    }

    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..3, 0..1);
    }
}
