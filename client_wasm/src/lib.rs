//! Browser client for the gem hunt
//!
//! Game flow, layout, and input classification are plain Rust so they run
//! under native tests; DOM, canvas, audio, and fetch plumbing compile for
//! wasm32 only.

pub mod audio;
pub mod fsm;
pub mod gesture;
pub mod hud;
pub mod input;
pub mod settings;

#[cfg(target_arch = "wasm32")]
mod announcer;
#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod leaderboard;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
use app::App;

#[cfg(target_arch = "wasm32")]
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

/// Runs a closure against the live app, if one has been booted.
#[cfg(target_arch = "wasm32")]
pub(crate) fn with_app(f: impl FnOnce(&mut App)) {
    APP.with(|cell| {
        if let Some(app) = cell.borrow_mut().as_mut() {
            f(app);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/// Entry point called from the host page once the module is loaded.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn boot(canvas_id: &str) -> Result<(), JsValue> {
    let app = App::new(canvas_id)?;
    let canvas = app.canvas.clone();
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    install_pointer_listeners(&canvas)?;
    install_key_listener()?;
    start_frame_loop()?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn install_pointer_listeners(canvas: &web_sys::HtmlCanvasElement) -> Result<(), JsValue> {
    let on_mouse = Closure::wrap(Box::new(move |event: web_sys::MouseEvent| {
        with_app(|app| app.pointer_down(event.client_x() as f32, event.client_y() as f32, 1));
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("mousedown", on_mouse.as_ref().unchecked_ref())?;
    on_mouse.forget();

    let on_touch_start = Closure::wrap(Box::new(move |event: web_sys::TouchEvent| {
        event.prevent_default();
        let touches = event.touches();
        let contacts = touches.length() as u8;
        if let Some(first) = touches.get(0) {
            let span = touch_span(&touches);
            with_app(|app| {
                app.touch_start(
                    contacts,
                    span,
                    first.client_x() as f32,
                    first.client_y() as f32,
                );
            });
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchstart", on_touch_start.as_ref().unchecked_ref())?;
    on_touch_start.forget();

    let on_touch_move = Closure::wrap(Box::new(move |event: web_sys::TouchEvent| {
        event.prevent_default();
        if let Some(span) = touch_span(&event.touches()) {
            with_app(|app| app.touch_move(span));
        }
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchmove", on_touch_move.as_ref().unchecked_ref())?;
    on_touch_move.forget();

    let on_touch_end = Closure::wrap(Box::new(move |event: web_sys::TouchEvent| {
        with_app(|app| app.touch_end(event.touches().length() as u8));
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchend", on_touch_end.as_ref().unchecked_ref())?;
    on_touch_end.forget();

    Ok(())
}

/// Distance in client pixels between the first two touches, when present.
#[cfg(target_arch = "wasm32")]
fn touch_span(touches: &web_sys::TouchList) -> Option<f32> {
    let a = touches.get(0)?;
    let b = touches.get(1)?;
    let dx = (a.client_x() - b.client_x()) as f32;
    let dy = (a.client_y() - b.client_y()) as f32;
    Some((dx * dx + dy * dy).sqrt())
}

#[cfg(target_arch = "wasm32")]
fn install_key_listener() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let on_key = Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
        with_app(|app| app.key_down(&event));
    }) as Box<dyn FnMut(_)>);
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

#[cfg(target_arch = "wasm32")]
fn start_frame_loop() -> Result<(), JsValue> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let inner = callback.clone();
    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        with_app(|app| app.frame(ts));
        if let Some(cb) = inner.borrow().as_ref() {
            request_frame(cb).ok();
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = callback.borrow().as_ref() {
        request_frame(cb)?;
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn request_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .request_animation_frame(callback.as_ref().unchecked_ref())
}
