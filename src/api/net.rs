//! Requests to the capture server
//!
//! Thin `fetch` wrappers for the three endpoints the engine talks to.
//! Responses are returned as text; parsing stays in the core.

use super::helpers::describe_js_error;
use crate::capture::{CapturePayload, SourceUpload};
use crate::config::HighlightConfig;
use crate::error::{HighlightError, Result};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

fn network_err(context: &str, err: JsValue) -> HighlightError {
    HighlightError::Network(format!("{}: {}", context, describe_js_error(&err)))
}

async fn send(request: Request) -> Result<String> {
    let window = web_sys::window().ok_or_else(|| HighlightError::Network("no window".to_string()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| network_err("fetch", e))?;
    let response: Response = response
        .dyn_into()
        .map_err(|e| network_err("fetch result", e))?;

    if !response.ok() {
        return Err(HighlightError::Network(format!(
            "{} answered {}",
            response.url(),
            response.status()
        )));
    }

    let text = response.text().map_err(|e| network_err("response.text", e))?;
    let body = JsFuture::from(text)
        .await
        .map_err(|e| network_err("response body", e))?;
    Ok(body.as_string().unwrap_or_default())
}

fn json_request(method: &str, url: &str, body: &str) -> Result<Request> {
    let init = RequestInit::new();
    init.set_method(method);
    init.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &init).map_err(|e| network_err("request", e))?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|e| network_err("headers", e))?;
    Ok(request)
}

/// `GET /words`
pub async fn fetch_words(config: &HighlightConfig) -> Result<String> {
    let request = Request::new_with_str(&config.words_endpoint()).map_err(|e| network_err("request", e))?;
    send(request).await
}

/// `DELETE /words` with `{word}`
pub async fn delete_word(config: &HighlightConfig, word: &str) -> Result<String> {
    let body = serde_json::json!({ "word": word }).to_string();
    send(json_request("DELETE", &config.words_endpoint(), &body)?).await
}

/// `POST /paw`
pub async fn post_capture(config: &HighlightConfig, payload: &CapturePayload) -> Result<String> {
    let body = serde_json::to_string(payload)?;
    send(json_request("POST", &config.capture_endpoint(), &body)?).await
}

/// `POST /source` with the page HTML; returns the server-side file path
pub async fn upload_source(config: &HighlightConfig, source: &str) -> Result<String> {
    let body = SourceUpload::request_body(source);
    let reply = send(json_request("POST", &config.source_endpoint(), &body)?).await?;
    SourceUpload::parse_reply(&reply)
}
