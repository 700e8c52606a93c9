//! Leaderboard REST client
//!
//! Thin JSON wrappers over the worker's /api/scores routes. Callers run
//! these through `spawn_local` and treat every failure as non-fatal.

use js_sys::encode_uri_component;
use proto::{ScoreRow, ScoreSubmission};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// Submit a score; resolves to the stored row
pub async fn post_score(submission: &ScoreSubmission) -> Result<ScoreRow, JsValue> {
    let body = submission
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init("/api/scores", &init)?;
    let (status, text) = run(request).await?;
    if status != 200 {
        return Err(JsValue::from_str(&format!("submit failed: {status}")));
    }
    ScoreRow::from_json(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Fetch the top rows, descending by score
pub async fn top_scores(limit: usize) -> Result<Vec<ScoreRow>, JsValue> {
    let request = Request::new_with_str(&format!("/api/scores?limit={limit}"))?;
    let (status, text) = run(request).await?;
    if status != 200 {
        return Err(JsValue::from_str(&format!("fetch failed: {status}")));
    }
    serde_json::from_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// A user's best row, None when they have none
pub async fn best_score(username: &str) -> Result<Option<ScoreRow>, JsValue> {
    let encoded = String::from(encode_uri_component(username));
    let request = Request::new_with_str(&format!("/api/scores/{encoded}"))?;
    let (status, text) = run(request).await?;
    match status {
        200 => ScoreRow::from_json(&text)
            .map(Some)
            .map_err(|e| JsValue::from_str(&e.to_string())),
        404 => Ok(None),
        other => Err(JsValue::from_str(&format!("fetch failed: {other}"))),
    }
}

async fn run(request: Request) -> Result<(u16, String), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let response: Response = value.dyn_into()?;
    let status = response.status();
    let text = JsFuture::from(response.text()?).await?;
    Ok((status, text.as_string().unwrap_or_default()))
}
