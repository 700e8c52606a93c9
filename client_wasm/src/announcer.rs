//! Screen-reader announcements
//!
//! Each announcement is a transient polite live region; assistive tech
//! picks it up and the node is removed a second later.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const DISPLAY_MS: i32 = 1000;

/// Announce text to screen readers, best-effort
pub fn announce(text: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;

    let region = document.create_element("div")?;
    region.set_attribute("aria-live", "polite")?;
    region.set_attribute("role", "status")?;
    // Visually hidden, still exposed to the accessibility tree
    region.set_attribute(
        "style",
        "position:absolute; left:-9999px; width:1px; height:1px; overflow:hidden;",
    )?;
    region.set_text_content(Some(text));
    body.append_child(&region)?;

    let node = region.clone();
    let cleanup = Closure::once(move || {
        node.remove();
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        cleanup.as_ref().unchecked_ref(),
        DISPLAY_MS,
    )?;
    cleanup.forget();
    Ok(())
}
