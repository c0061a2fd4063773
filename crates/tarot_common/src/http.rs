// --- File: crates/tarot_common/src/http.rs ---
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

use crate::error::ApiError;

// Include the client module
pub mod client;

/// Attaches `Authorization: bearer <token>` when a session token is present.
pub fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token.and_then(|t| HeaderValue::from_str(&format!("bearer {}", t)).ok()) {
        Some(value) => request.header(AUTHORIZATION, value),
        None => request,
    }
}

/// Reads a response and turns any non-2xx status into an `ApiError`.
///
/// Returns the raw body text on success so callers can decode it.
pub async fn success_body(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    let body_text = response.text().await?;
    if status.is_success() {
        Ok(body_text)
    } else {
        Err(ApiError::from_status(status.as_u16(), &body_text))
    }
}

/// Decodes a JSON body, mapping serde failures into `ApiError::Parse`.
pub fn decode_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}
