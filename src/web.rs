//! Browser host: draws into `<canvas id="bg">` behind the page.
//!
//! The page keeps its normal document scroll. Every scroll event reads how
//! far the body has moved up (`body.getBoundingClientRect().top`) and hands
//! it to the engine; `requestAnimationFrame` drives the frame loop.
//!
//! Options come from `stardrift.toml` next to the page when present, and the
//! textures are fetched from `options.scene.asset_dir`.

use std::{cell::RefCell, rc::Rc};

use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, HtmlCanvasElement, Response, Window};

use crate::{
    assets::{asset_url, TextureSet, TextureSlot},
    error::StardriftError,
    motion::FrameScheduler,
    options::Options,
    util::viewport::CanvasSize,
    SceneEngine,
};

const CANVAS_ID: &str = "bg";
const OPTIONS_URL: &str = "stardrift.toml";

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn js_error(what: &str, value: &JsValue) -> StardriftError {
    StardriftError::Web(format!("{what}: {value:?}"))
}

/// Wasm entry point. Installs the panic hook and logger, then starts the
/// scene asynchronously. Startup errors are logged to the console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    spawn_local(async {
        if let Err(e) = run().await {
            log::error!("stardrift failed to start: {e}");
        }
    });
}

/// Requests the next frame tick from the browser.
struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&mut self) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        if let Err(e) = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }
}

async fn run() -> Result<(), StardriftError> {
    let window = web_sys::window()
        .ok_or_else(|| StardriftError::Web("no window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| StardriftError::Web("no document".to_owned()))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| StardriftError::Web(format!("missing #{CANVAS_ID}")))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|e| js_error("#bg is not a canvas", &e))?;

    let options = fetch_options(&window).await;
    let textures = fetch_textures(&window, &options).await;

    let size = fit_canvas(&window, &canvas);
    let engine = SceneEngine::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        size,
        options,
        &textures,
        page_offset(&document),
    )
    .await?;
    let engine = Rc::new(RefCell::new(engine));

    listen_for_scroll(&window, &document, &engine)?;
    // Scrolling during GPU setup had no listener to report it.
    engine.borrow_mut().sync_scroll(page_offset(&document));
    listen_for_resize(&window, &canvas, &engine)?;
    start_frame_loop(&window, &engine);
    Ok(())
}

/// `body.getBoundingClientRect().top`: `0` at the top of the page and
/// negative once scrolled.
fn page_offset(document: &Document) -> i32 {
    document
        .body()
        .map_or(0, |body| body.get_bounding_client_rect().top().round() as i32)
}

/// Make the canvas cover the viewport: CSS size in CSS pixels, backing
/// store in device pixels. Returns the backing store size.
fn fit_canvas(window: &Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
    let css = |dim: Result<JsValue, JsValue>| {
        dim.ok().and_then(|v| v.as_f64()).unwrap_or(1.0)
    };
    let size = CanvasSize::fill(
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio(),
    );
    let (width, height) = size.backing;
    canvas.set_width(width);
    canvas.set_height(height);

    let style = canvas.style();
    for (property, value) in [("width", size.css.0), ("height", size.css.1)] {
        if let Err(e) = style.set_property(property, &format!("{value}px")) {
            log::warn!("canvas style {property}: {e:?}");
        }
    }
    size.backing
}

async fn fetch_response(
    window: &Window,
    url: &str,
) -> Result<Response, StardriftError> {
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| js_error(url, &e))?
        .dyn_into::<Response>()
        .map_err(|e| js_error(url, &e))?;
    if !response.ok() {
        return Err(StardriftError::Web(format!(
            "{url}: HTTP {}",
            response.status()
        )));
    }
    Ok(response)
}

async fn fetch_bytes(
    window: &Window,
    url: &str,
) -> Result<Vec<u8>, StardriftError> {
    let response = fetch_response(window, url).await?;
    let promise = response.array_buffer().map_err(|e| js_error(url, &e))?;
    let buffer = JsFuture::from(promise)
        .await
        .map_err(|e| js_error(url, &e))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

async fn fetch_text(
    window: &Window,
    url: &str,
) -> Result<String, StardriftError> {
    let response = fetch_response(window, url).await?;
    let promise = response.text().map_err(|e| js_error(url, &e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| js_error(url, &e))?
        .as_string()
        .ok_or_else(|| StardriftError::Web(format!("{url}: body is not text")))
}

async fn fetch_options(window: &Window) -> Options {
    match fetch_text(window, OPTIONS_URL).await {
        Ok(text) => Options::from_toml(&text).unwrap_or_else(|e| {
            log::warn!("{OPTIONS_URL}: {e}; using defaults");
            Options::default()
        }),
        Err(e) => {
            log::debug!("{e}; using default options");
            Options::default()
        }
    }
}

/// Fetch every texture. Failures are logged and leave the slot empty.
async fn fetch_textures(window: &Window, options: &Options) -> TextureSet {
    let mut set = TextureSet::default();
    for slot in TextureSlot::ALL {
        let scene = &options.scene;
        let url = asset_url(&scene.asset_dir, slot.file_name(scene));
        match fetch_bytes(window, &url).await {
            Ok(bytes) => set.insert(slot, bytes),
            Err(e) => log::warn!("{e}"),
        }
    }
    set
}

fn listen_for_scroll(
    window: &Window,
    document: &Document,
    engine: &Rc<RefCell<SceneEngine>>,
) -> Result<(), StardriftError> {
    let document = document.clone();
    let engine = Rc::clone(engine);
    let on_scroll = Closure::<dyn FnMut()>::new(move || {
        engine.borrow_mut().scroll_to(page_offset(&document));
    });
    // The document scrolls the window; `body.onscroll` is an alias for it.
    window
        .add_event_listener_with_callback(
            "scroll",
            on_scroll.as_ref().unchecked_ref(),
        )
        .map_err(|e| js_error("scroll listener", &e))?;
    on_scroll.forget();
    Ok(())
}

fn listen_for_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    engine: &Rc<RefCell<SceneEngine>>,
) -> Result<(), StardriftError> {
    let target = window.clone();
    let canvas = canvas.clone();
    let engine = Rc::clone(engine);
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let (width, height) = fit_canvas(&target, &canvas);
        engine.borrow_mut().resize(width, height);
    });
    window
        .add_event_listener_with_callback(
            "resize",
            on_resize.as_ref().unchecked_ref(),
        )
        .map_err(|e| js_error("resize listener", &e))?;
    on_resize.forget();
    Ok(())
}

/// Install the self-rescheduling `requestAnimationFrame` callback and
/// request the first frame.
fn start_frame_loop(window: &Window, engine: &Rc<RefCell<SceneEngine>>) {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let mut scheduler = AnimationFrameScheduler {
        window: window.clone(),
        callback: Rc::clone(&callback),
    };
    let engine = Rc::clone(engine);
    *callback.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        let mut engine = engine.borrow_mut();
        if let Err(e) = engine.frame(&mut scheduler) {
            engine.recover_surface(&e);
        }
    }));

    AnimationFrameScheduler {
        window: window.clone(),
        callback,
    }
    .request_frame();
}
