//! Backend calls over `gloo-net`, decoded with the core envelope parsers.
//!
//! Every function resolves to `Result<_, ApiError>`; callers log and absorb
//! the error. Off-browser builds have no transport and always fail with
//! [`ApiError::Network`].
use lotoia_core::chat::{ChatReply, ChatRequest};
use lotoia_core::rating::{RATING_PATH, RatingRequest, parse_rating_reply};
use lotoia_core::{AnalysisResult, ApiError, DatabaseInfo, GameKind, GeneratedGrid, HeatMap};
use serde::Serialize;

use crate::paths::api_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
}

#[cfg(target_arch = "wasm32")]
async fn send(method: Method, path: &str, body: Option<String>) -> Result<String, ApiError> {
    use gloo_net::http::Request;

    let url = api_url(path);
    let request = match (method, body) {
        (Method::Get, _) => Request::get(&url).build(),
        (Method::Post, Some(body)) => Request::post(&url)
            .header("Content-Type", "application/json")
            .body(body),
        (Method::Post, None) => Request::post(&url).build(),
    }
    .map_err(|err| ApiError::Network(err.to_string()))?;

    let resp = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    resp.text()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(clippy::unused_async)]
async fn send(method: Method, path: &str, _body: Option<String>) -> Result<String, ApiError> {
    Err(ApiError::Network(format!(
        "no browser transport for {method:?} {}",
        api_url(path)
    )))
}

async fn post_json<T: Serialize>(path: &str, payload: &T) -> Result<String, ApiError> {
    let body = serde_json::to_string(payload)?;
    send(Method::Post, path, Some(body)).await
}

/// # Errors
///
/// Transport, status and envelope failures.
pub async fn fetch_heat(path: &str) -> Result<HeatMap, ApiError> {
    HeatMap::from_envelope(&send(Method::Get, path, None).await?)
}

/// # Errors
///
/// Transport, status and envelope failures.
pub async fn fetch_database_info(path: &str) -> Result<DatabaseInfo, ApiError> {
    DatabaseInfo::from_envelope(&send(Method::Get, path, None).await?)
}

/// POST an analyze-grid request; the selection travels in the query string.
///
/// # Errors
///
/// Transport, status and envelope failures.
pub async fn analyze(path: &str) -> Result<AnalysisResult, ApiError> {
    AnalysisResult::from_envelope(&send(Method::Post, path, None).await?)
}

/// # Errors
///
/// Transport, status and envelope failures, or an envelope without grids.
pub async fn generate(path: &str) -> Result<GeneratedGrid, ApiError> {
    GeneratedGrid::from_envelope(&send(Method::Get, path, None).await?)
}

/// # Errors
///
/// Transport, status and envelope failures.
pub async fn post_rating(request: &RatingRequest) -> Result<(), ApiError> {
    parse_rating_reply(&post_json(RATING_PATH, request).await?)
}

/// # Errors
///
/// Transport, status and envelope failures, or a blank reply.
pub async fn post_chat(kind: GameKind, request: &ChatRequest) -> Result<ChatReply, ApiError> {
    ChatReply::from_envelope(&post_json(&kind.chat_path(), request).await?)
}
