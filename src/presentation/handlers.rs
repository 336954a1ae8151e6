// HTTP request handlers
use crate::infrastructure::http_response::{
    accepts_brotli, encoded_response, CONTENT_TYPE_HTML, CONTENT_TYPE_JSON,
};
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// The dashboard page
pub async fn index(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    match encoded_response(state.page_html.as_bytes(), CONTENT_TYPE_HTML, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// The dashboard description the page renders from
pub async fn dashboard_json(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let compress = accepts_brotli(&headers);
    match encoded_response(&state.dashboard_json, CONTENT_TYPE_JSON, compress).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}
