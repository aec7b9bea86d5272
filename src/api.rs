//! Thin HTTP client for the game server.
//!
//! The server owns all game rules and state; this module only speaks the
//! three-endpoint JSON contract. No retries or timeouts: a failed request is
//! reported to the caller and the UI stays as it was.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::model::{Attempt, AttemptHistory, GuessOutcome, GuessRequest};

pub const ATTEMPTS_URL: &str = "/get_attempts";
pub const GUESS_URL: &str = "/guess";
pub const RESET_URL: &str = "/reset";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {reason}")]
    Network { url: &'static str, reason: String },
    #[error("server returned status {status} for {url}")]
    Status { url: &'static str, status: u16 },
    #[error("invalid response from {url}: {source}")]
    Decode {
        url: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// `GET /get_attempts` — the full attempt history, oldest first.
pub async fn fetch_attempts() -> Result<Vec<Attempt>, ApiError> {
    let body = http_request(ATTEMPTS_URL, "GET", None).await?;
    decode::<AttemptHistory>(ATTEMPTS_URL, &body).map(|history| history.attempts)
}

/// `POST /guess` — submits an uppercase guess and returns the refreshed
/// history plus the game-over signal.
pub async fn submit_guess(guess: &str) -> Result<GuessOutcome, ApiError> {
    let payload = serde_json::to_string(&GuessRequest { guess })
        .map_err(|source| ApiError::Decode { url: GUESS_URL, source })?;
    let body = http_request(GUESS_URL, "POST", Some(payload)).await?;
    decode(GUESS_URL, &body)
}

/// `POST /reset` — starts a fresh game. The response body is unused; any
/// 2xx counts as success.
pub async fn reset_game() -> Result<(), ApiError> {
    http_request(RESET_URL, "POST", None).await.map(|_| ())
}

fn decode<T: DeserializeOwned>(url: &'static str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode { url, source })
}

#[cfg(target_arch = "wasm32")]
async fn http_request(
    url: &'static str,
    method: &str,
    body: Option<String>,
) -> Result<String, ApiError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    let network = |reason: String| ApiError::Network { url, reason };

    let init = web_sys::RequestInit::new();
    init.set_method(method);
    let has_body = body.is_some();
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(&body));
    }

    let request = web_sys::Request::new_with_str_and_init(url, &init)
        .map_err(|e| network(js_reason(&e)))?;
    if has_body {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| network(js_reason(&e)))?;
    }

    let window = web_sys::window().ok_or_else(|| network("no window object".to_string()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| network(js_reason(&e)))?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| network("fetch did not yield a Response".to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status {
            url,
            status: response.status(),
        });
    }

    let text = JsFuture::from(response.text().map_err(|e| network(js_reason(&e)))?)
        .await
        .map_err(|e| network(js_reason(&e)))?;
    Ok(text.as_string().unwrap_or_default())
}

#[cfg(target_arch = "wasm32")]
fn js_reason(value: &wasm_bindgen::JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

// Fetch only exists in the browser; the native build is for unit tests.
#[cfg(not(target_arch = "wasm32"))]
async fn http_request(
    url: &'static str,
    _method: &str,
    _body: Option<String>,
) -> Result<String, ApiError> {
    Err(ApiError::Network {
        url,
        reason: "browser fetch is not available on this target".to_string(),
    })
}
