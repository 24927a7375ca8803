//! The scene engine: GPU context, renderer, and the state both update loops
//! mutate.
//!
//! Hosts own the event loop. They forward three things:
//! - scroll offsets via [`SceneEngine::scroll_to`]
//! - surface size changes via [`SceneEngine::resize`]
//! - display refresh ticks via [`SceneEngine::frame`]

use crate::{
    assets::TextureSet,
    error::StardriftError,
    gpu::render_context::RenderContext,
    motion::{
        apply_scroll, place_camera, FrameLoop, FrameRenderer, FrameScheduler,
    },
    options::Options,
    renderer::SceneRenderer,
    scene::SceneState,
    util::frame_timing::FrameTiming,
};

/// Renders [`SceneState`] through a borrowed context and renderer.
struct FrameTarget<'a> {
    context: &'a RenderContext,
    renderer: &'a mut SceneRenderer,
}

impl FrameRenderer for FrameTarget<'_> {
    type Error = wgpu::SurfaceError;

    fn render(&mut self, state: &SceneState) -> Result<(), Self::Error> {
        self.renderer.render(self.context, state)
    }
}

/// The scroll-driven scene, ready to draw.
///
/// # Construction
///
/// [`SceneEngine::new`] sets up the GPU, lays out the scene, and applies the
/// initial scroll offset before anything is drawn.
///
/// # Frame loop
///
/// Call [`frame`](Self::frame) once per display refresh. It asks the
/// scheduler for the next refresh, advances the frame animation, and
/// presents. Pass surface errors to
/// [`recover_surface`](Self::recover_surface).
pub struct SceneEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    renderer: SceneRenderer,
    state: SceneState,
    options: Options,
    frame_loop: FrameLoop,
    frame_timing: FrameTiming,
    scroll_offset: i32,
}

impl SceneEngine {
    /// Create the engine for a window or canvas.
    ///
    /// `initial_scroll` is the page's scroll offset at startup, applied once
    /// exactly as a scroll event would be.
    ///
    /// # Errors
    ///
    /// Returns [`StardriftError`] if GPU initialization or shader
    /// composition fails.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
        textures: &TextureSet,
        initial_scroll: i32,
    ) -> Result<Self, StardriftError> {
        let context = RenderContext::new(target, size).await?;
        let aspect = context.width() as f32 / context.height() as f32;

        let mut state = SceneState::from_options(&options, aspect);
        apply_scroll(&mut state, initial_scroll, &options.motion);

        let renderer = SceneRenderer::new(&context, &state, &options, textures)?;

        log::info!(
            "scene ready: {} stars, camera at {:?}",
            state.stars.len(),
            state.camera.position
        );

        Ok(Self {
            context,
            renderer,
            state,
            options,
            frame_loop: FrameLoop::new(),
            frame_timing: FrameTiming::new(),
            scroll_offset: initial_scroll,
        })
    }

    /// Handle a page scroll event at `offset` (`0` at the top, negative
    /// further down).
    pub fn scroll_to(&mut self, offset: i32) {
        self.scroll_offset = offset;
        apply_scroll(&mut self.state, offset, &self.options.motion);
        log::trace!("scroll {offset}: camera {:?}", self.state.camera.position);
    }

    /// Catch up with a scroll offset that changed while no scroll event was
    /// delivered. Moves the camera only; the moon and avatar keep their
    /// rotation. Does nothing if `offset` is already applied.
    pub fn sync_scroll(&mut self, offset: i32) {
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            place_camera(&mut self.state, offset, &self.options.motion);
            log::debug!("caught up with scroll offset {offset}");
        }
    }

    /// Resize the surface and camera projection. Ignores zero-sized
    /// dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.state.resize(width, height);
            self.renderer.resize(&self.context);
        }
    }

    /// Run one frame: schedule the next, animate, draw, present.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired. The next frame is already scheduled.
    pub fn frame<S: FrameScheduler + ?Sized>(
        &mut self,
        scheduler: &mut S,
    ) -> Result<(), wgpu::SurfaceError> {
        let mut target = FrameTarget {
            context: &self.context,
            renderer: &mut self.renderer,
        };
        let result = self.frame_loop.tick(
            &mut self.state,
            &self.options.motion,
            scheduler,
            &mut target,
        );
        self.frame_timing.end_frame();
        if let Some(fps) = self.frame_timing.take_report() {
            log::debug!("{fps:.1} fps ({} frames)", self.frame_loop.frames());
        }
        result
    }

    /// React to a failed [`frame`](Self::frame): reconfigure a lost or
    /// outdated surface, log anything else.
    pub fn recover_surface(&mut self, error: &wgpu::SurfaceError) {
        match error {
            wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost => {
                log::debug!("surface {error:?}; reconfiguring");
                let (width, height) = (self.context.width(), self.context.height());
                self.resize(width, height);
            }
            other => log::error!("render error: {other:?}"),
        }
    }

    /// Current scene state.
    #[must_use]
    pub fn state(&self) -> &SceneState {
        &self.state
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Last scroll offset applied.
    #[must_use]
    pub fn scroll_offset(&self) -> i32 {
        self.scroll_offset
    }

    /// Number of frames run so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frame_loop.frames()
    }
}
