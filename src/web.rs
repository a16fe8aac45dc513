//! Browser activation: canvas lookup, loading, intro timer, drag and resize wiring.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

use crate::debounce::ResizeDebouncer;
use crate::loader::load_assets;
use crate::loader::web::{sleep_ms, ImageElementProvider};
use crate::registry::{ActivationRegistry, ACTIVE_CLASS};
use crate::render::web::CanvasSurface;
use crate::sizing::parse_css_px;
use crate::viewer::{Handoff, Viewer};
use crate::{ViewerConfig, ViewerError};

type SharedViewer = Rc<RefCell<Viewer<CanvasSurface>>>;

thread_local! {
    static ACTIVE: RefCell<ActivationRegistry<String>> = RefCell::new(ActivationRegistry::new());
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging(log::Level::Info);
}

/// Route `log` records to the browser console.
pub fn init_logging(level: log::Level) {
    if console_log::init_with_level(level).is_err() {
        log::debug!("Console logger already installed");
    }
}

/// JavaScript entry point taking the configuration as a JSON object string.
///
/// Resolves to `true` if a viewer was attached, `false` if the canvas was
/// missing or already active.
#[wasm_bindgen(js_name = init)]
pub fn init_js(config_json: &str) -> Result<bool, JsValue> {
    let config = ViewerConfig::from_json_str(config_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e)))?;
    init(config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Attach a viewer to the canvas named by `config.canvas`.
///
/// A selector that matches no canvas, or a canvas that already hosts a
/// viewer, makes this a no-op returning `Ok(false)`.
pub fn init(config: ViewerConfig) -> Result<bool, ViewerError> {
    config.validate()?;

    let Some(window) = web_sys::window() else {
        log::warn!("No window available");
        return Ok(false);
    };
    let Some(canvas) = find_canvas(&window, &config.canvas) else {
        log::warn!("No canvas matches selector '{}'", config.canvas);
        return Ok(false);
    };
    let has_marker = canvas.class_list().contains(ACTIVE_CLASS);
    if !ACTIVE.with(|active| active.borrow().can_activate(&config.canvas, has_marker)) {
        log::debug!("Canvas '{}' is already active", config.canvas);
        return Ok(false);
    }
    let surface = match CanvasSurface::new(canvas.clone()) {
        Ok(surface) => surface,
        Err(err) => {
            log::warn!("Canvas '{}' unusable: {}", config.canvas, err);
            return Ok(false);
        }
    };

    let selector = config.canvas.clone();
    let viewer = Viewer::new(config, surface, container_width(&window, &canvas))?;
    let viewer: SharedViewer = Rc::new(RefCell::new(viewer));

    ACTIVE.with(|active| active.borrow_mut().try_activate(selector.clone()));
    if let Err(err) = canvas.class_list().add_1(ACTIVE_CLASS) {
        log::warn!("Failed to mark canvas '{}' active: {:?}", selector, err);
    }

    if let Err(err) = attach_resize(&window, &canvas, &viewer) {
        log::warn!("Responsive resizing disabled: {:?}", err);
    }
    wasm_bindgen_futures::spawn_local(run(window, canvas, viewer));

    log::info!("Activated viewer on '{}'", selector);
    Ok(true)
}

/// Load everything, play the intro if enabled, then attach drag navigation.
async fn run(window: Window, canvas: HtmlCanvasElement, viewer: SharedViewer) {
    let (sequence, icon_url) = {
        let viewer = viewer.borrow();
        (
            viewer.sequence().clone(),
            viewer.config().icon_url().map(str::to_owned),
        )
    };

    let loaded = load_assets(
        &ImageElementProvider,
        &sequence,
        icon_url.as_deref(),
        |loaded, total| viewer.borrow_mut().on_frame_loaded(loaded, total),
    )
    .await;

    let assets = match loaded {
        Ok(assets) => assets,
        Err(err) => {
            viewer.borrow_mut().on_load_failed(err);
            return;
        }
    };

    let outcome = viewer.borrow_mut().on_load_complete(assets);
    let handoff = match outcome {
        Ok(Some(handoff)) => handoff,
        Ok(None) => return,
        Err(err) => {
            log::error!("{}", err);
            return;
        }
    };

    if let Handoff::PlayIntro { interval_ms } = handoff {
        loop {
            sleep_ms(interval_ms).await;
            let tick = viewer.borrow_mut().tick_intro();
            match tick {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => {
                    log::error!("{}", err);
                    return;
                }
            }
        }
    }

    match attach_navigation(&window, &canvas, &viewer) {
        Ok(()) => log::debug!("Drag navigation attached"),
        Err(err) => log::error!("Failed to attach drag navigation: {:?}", err),
    }
}

fn attach_navigation(
    window: &Window,
    canvas: &HtmlCanvasElement,
    viewer: &SharedViewer,
) -> Result<(), JsValue> {
    for event in ["mousedown", "touchstart"] {
        let viewer = Rc::clone(viewer);
        listen(canvas, event, move |e: Event| {
            if let Some(x) = pointer_x(&e) {
                viewer.borrow_mut().pointer_down(x);
            }
        })?;
    }

    for event in ["mousemove", "touchmove"] {
        let viewer = Rc::clone(viewer);
        listen(window, event, move |e: Event| {
            let Some(x) = pointer_x(&e) else { return };
            let stepped = viewer.borrow_mut().pointer_move(x);
            if let Err(err) = stepped {
                log::error!("{}", err);
            }
        })?;
    }

    for event in ["mouseup", "touchend"] {
        let viewer = Rc::clone(viewer);
        listen(window, event, move |_e: Event| viewer.borrow_mut().pointer_up())?;
    }

    Ok(())
}

fn attach_resize(
    window: &Window,
    canvas: &HtmlCanvasElement,
    viewer: &SharedViewer,
) -> Result<(), JsValue> {
    let debouncer = Rc::new(RefCell::new(ResizeDebouncer::new(viewport_width(window))));
    let pending_timer: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let window_handle = window.clone();
    let canvas = canvas.clone();
    let viewer = Rc::clone(viewer);

    listen(window, "resize", move |_e: Event| {
        let window = &window_handle;
        let Some(generation) = debouncer.borrow_mut().schedule(viewport_width(window)) else {
            return;
        };
        if let Some(handle) = pending_timer.take() {
            window.clear_timeout_with_handle(handle);
        }

        let delay = debouncer.borrow().delay_ms() as i32;
        let fire = {
            let window = window.clone();
            let canvas = canvas.clone();
            let viewer = Rc::clone(&viewer);
            let debouncer = Rc::clone(&debouncer);
            Closure::once_into_js(move || {
                if !debouncer.borrow_mut().fire(generation, viewport_width(&window)) {
                    return;
                }
                let resized = viewer.borrow_mut().on_resize(container_width(&window, &canvas));
                if let Err(err) = resized {
                    log::error!("{}", err);
                }
            })
        };

        let scheduled = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(fire.unchecked_ref(), delay);
        match scheduled {
            Ok(handle) => pending_timer.set(Some(handle)),
            Err(err) => log::warn!("Failed to schedule resize: {:?}", err),
        }
    })
}

/// Register a listener that lives as long as the page.
fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Horizontal position of the primary pointer or first touch point.
fn pointer_x(event: &Event) -> Option<f64> {
    if event.type_().starts_with("touch") {
        let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
        Some(touch.client_x() as f64)
    } else {
        event.dyn_ref::<MouseEvent>().map(|e| e.client_x() as f64)
    }
}

fn find_canvas(window: &Window, selector: &str) -> Option<HtmlCanvasElement> {
    if selector.is_empty() {
        return None;
    }
    window
        .document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()
}

/// Computed width of the canvas's parent element.
fn container_width(window: &Window, canvas: &HtmlCanvasElement) -> u32 {
    let Some(parent) = canvas.parent_element() else {
        return canvas.width();
    };
    window
        .get_computed_style(&parent)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("width").ok())
        .and_then(|width| parse_css_px(&width))
        .unwrap_or_else(|| parent.client_width().max(0) as u32)
}

fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}
