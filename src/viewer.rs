//! Standalone scene window backed by winit.
//!
//! A native window has no document to scroll, so the viewer keeps a
//! simulated page ([`PageScroll`]) and feeds its offset to the engine
//! whenever the wheel or a navigation key moves it.
//!
//! ```no_run
//! # use stardrift::Viewer;
//! Viewer::builder()
//!     .with_title("Stardrift")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::{path::Path, sync::Arc};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    assets::TextureSet, error::StardriftError, input::PageScroll,
    motion::FrameScheduler, options::Options, SceneEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
    textures: Option<TextureSet>,
}

impl ViewerBuilder {
    /// Create a builder with default options and textures read from the
    /// configured asset directory.
    fn new() -> Self {
        Self {
            options: None,
            title: None,
            textures: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title (defaults to `options.viewer.title`).
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Use already-loaded textures instead of reading the asset directory.
    #[must_use]
    pub fn with_textures(mut self, textures: TextureSet) -> Self {
        self.textures = Some(textures);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let title = self.title.unwrap_or_else(|| options.viewer.title.clone());
        Viewer {
            options,
            title,
            textures: self.textures,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    textures: Option<TextureSet>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`StardriftError::Viewer`] if the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<(), StardriftError> {
        let event_loop = EventLoop::new()
            .map_err(|e| StardriftError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let textures = self.textures.unwrap_or_else(|| {
            TextureSet::load_dir(
                Path::new(&self.options.scene.asset_dir),
                &self.options.scene,
            )
        });

        let mut app = ViewerApp {
            window: None,
            engine: None,
            page: PageScroll::new(self.options.viewer.page_height),
            line_pixels: self.options.viewer.line_pixels,
            options: Some(self.options),
            textures,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| StardriftError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Schedules the next frame tick as a winit redraw.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        self.0.request_redraw();
    }
}

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<SceneEngine>,
    page: PageScroll,
    line_pixels: f32,
    /// Taken when the engine is built.
    options: Option<Options>,
    textures: TextureSet,
    title: String,
}

/// Surface size: the full window, never zero.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Page scroll requested by a navigation key.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeyScroll {
    By(f32),
    Top,
    Bottom,
}

fn key_scroll(code: KeyCode, line: f32, viewport: f32) -> Option<KeyScroll> {
    match code {
        KeyCode::ArrowDown => Some(KeyScroll::By(line)),
        KeyCode::ArrowUp => Some(KeyScroll::By(-line)),
        KeyCode::PageDown | KeyCode::Space => Some(KeyScroll::By(viewport)),
        KeyCode::PageUp => Some(KeyScroll::By(-viewport)),
        KeyCode::Home => Some(KeyScroll::Top),
        KeyCode::End => Some(KeyScroll::Bottom),
        _ => None,
    }
}

/// Wheel delta in page pixels (positive scrolls down the page).
fn wheel_pixels(delta: MouseScrollDelta, line: f32) -> f32 {
    #[allow(clippy::cast_possible_truncation)]
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * line,
        MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let engine = match pollster::block_on(SceneEngine::new(
            Arc::clone(&window),
            viewport_size(window.inner_size()),
            options,
            &self.textures,
            self.page.offset(),
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                engine.resize(vp_w, vp_h);
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let (vp_w, vp_h) = viewport_size(window.inner_size());
                engine.resize(vp_w, vp_h);
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = engine.frame(&mut RedrawScheduler(window)) {
                    engine.recover_surface(&e);
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let pixels = wheel_pixels(delta, self.line_pixels);
                if let Some(offset) = self.page.scroll_by(pixels) {
                    engine.scroll_to(offset);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let viewport = window.inner_size().height as f32;
                let change = match key_scroll(code, self.line_pixels, viewport) {
                    Some(KeyScroll::By(px)) => self.page.scroll_by(px),
                    Some(KeyScroll::Top) => self.page.to_top(),
                    Some(KeyScroll::Bottom) => self.page.to_bottom(),
                    None => None,
                };
                if let Some(offset) = change {
                    engine.scroll_to(offset);
                }
            }

            _ => (),
        }
    }
}
