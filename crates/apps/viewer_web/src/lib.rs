use console_error_panic_hook::set_once;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use foundation::math::Vec2;
use foundation::time::Time;
use plot::{PlotConfig, PlotState};
use scene::viewpoint::Viewport;

mod canvas;

struct Viewer {
    plot: PlotState,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

thread_local! {
    static STATE: RefCell<Option<Viewer>> = const { RefCell::new(None) };
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Host clock in milliseconds; same origin as `requestAnimationFrame` timestamps.
fn now() -> Time {
    let ms = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0);
    Time::from_millis(ms)
}

fn with_viewer<R>(f: impl FnOnce(&mut Viewer) -> R) -> Result<R, JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let viewer = s
            .as_mut()
            .ok_or_else(|| JsValue::from_str("plot not mounted"))?;
        Ok(f(viewer))
    })
}

fn render(viewer: &Viewer) -> Result<(), JsValue> {
    let viewport = viewer.plot.viewport();
    canvas::paint(
        &viewer.ctx,
        viewport.width,
        viewport.height,
        &viewer.plot.draw_list(),
    )
}

fn render_scene() -> Result<(), JsValue> {
    with_viewer(|v| render(v))?
}

fn flush_diagnostics(viewer: &mut Viewer) {
    for event in viewer.plot.drain_events() {
        log::warn!("[frame {}] {}: {}", event.frame_index, event.kind, event.message);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    console_log::init_with_level(log::Level::Info).ok();
    Ok(())
}

/// Binds the plot to a canvas and builds the scene. An empty `config_json`
/// uses the defaults.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    let config = if config_json.trim().is_empty() {
        PlotConfig::default()
    } else {
        PlotConfig::from_json(config_json).map_err(js_err)?
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("missing {canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()?;

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u32;
    let mut plot = PlotState::new(config, seed).map_err(js_err)?;
    let viewport = Viewport::new(canvas.width() as f64, canvas.height() as f64);
    let report = plot.rebuild(viewport, now());
    log::info!("plot mounted on #{canvas_id}: {} points", report.points.entered);

    let mut viewer = Viewer { plot, canvas, ctx };
    flush_diagnostics(&mut viewer);
    render(&viewer)?;
    STATE.with(|state| *state.borrow_mut() = Some(viewer));
    Ok(())
}

/// Resizes the canvas and rebuilds the scene from scratch.
#[wasm_bindgen]
pub fn resize(width: f64, height: f64) -> Result<(), JsValue> {
    with_viewer(|v| {
        v.canvas.set_width(width.max(1.0) as u32);
        v.canvas.set_height(height.max(1.0) as u32);
        v.plot.rebuild(Viewport::new(width, height), now());
    })?;
    render_scene()
}

/// Per-animation-frame tick with the `requestAnimationFrame` timestamp.
#[wasm_bindgen]
pub fn frame(now_ms: f64) -> Result<(), JsValue> {
    with_viewer(|v| {
        v.plot.frame(Time::from_millis(now_ms));
        flush_diagnostics(v);
    })?;
    render_scene()
}

/// Returns `true` when the hovered point changed.
#[wasm_bindgen]
pub fn pointer_move(x: f64, y: f64) -> Result<bool, JsValue> {
    with_viewer(|v| v.plot.pointer_move(Vec2::new(x, y)))
}

#[wasm_bindgen]
pub fn pointer_leave() -> Result<(), JsValue> {
    with_viewer(|v| {
        v.plot.pointer_leave();
    })
}

/// Returns the clicked point's new state (`"clicked"` / `"unclicked"`), or
/// `undefined` when nothing was under the pointer.
#[wasm_bindgen]
pub fn pointer_click(x: f64, y: f64) -> Result<Option<String>, JsValue> {
    with_viewer(|v| {
        v.plot
            .click(Vec2::new(x, y))
            .map(|state| state.as_str().to_string())
    })
}

/// Play/pause. Returns `true` when playing.
#[wasm_bindgen]
pub fn toggle_playback() -> Result<bool, JsValue> {
    let playing = with_viewer(|v| {
        let playback = v.plot.toggle_playback(now());
        flush_diagnostics(v);
        playback.is_playing()
    })?;
    log::info!("playback {}", if playing { "on" } else { "off" });
    Ok(playing)
}

#[wasm_bindgen]
pub fn clear_highlighting() -> Result<u32, JsValue> {
    with_viewer(|v| v.plot.clear_highlighting() as u32)
}

#[wasm_bindgen]
pub fn export_x3d() -> Result<String, JsValue> {
    with_viewer(|v| formats::to_x3d_string(v.plot.world()))
}
