//! Browser fetch of an explanation

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::request::{API_URL, ExplanationError, ExplanationRequest, extract_text};

/// Baked in at build time; requests fail with `MissingApiKey` without it
fn api_key() -> Option<&'static str> {
    option_env!("GEMINI_API_KEY").filter(|k| !k.is_empty())
}

fn js_error(value: JsValue) -> ExplanationError {
    ExplanationError::Transport(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// POST the request and return the generated text
///
/// No timeout: the future resolves or rejects with the underlying fetch.
pub async fn fetch_explanation(request: &ExplanationRequest) -> Result<String, ExplanationError> {
    let key = api_key().ok_or(ExplanationError::MissingApiKey)?;
    let body = request.to_json()?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&JsValue::from_str(&body));

    let url = format!("{}?key={}", API_URL, key);
    let http_request = Request::new_with_str_and_init(&url, &init).map_err(js_error)?;
    http_request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_error)?;

    let window =
        web_sys::window().ok_or_else(|| ExplanationError::Transport("no window".to_string()))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&http_request))
        .await
        .map_err(js_error)?
        .dyn_into()
        .map_err(js_error)?;

    if !response.ok() {
        return Err(ExplanationError::Http(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?
        .as_string()
        .ok_or_else(|| ExplanationError::Transport("response body is not text".to_string()))?;

    extract_text(&text)
}
