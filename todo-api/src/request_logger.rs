//! Structured request logging middleware
//!
//! Emits one `info!` event per request with method, path, status and timing.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Maximum length for the logged query string before truncation
const MAX_PARAM_LENGTH: usize = 30;

/// Truncation suffix for long query strings
const TRUNCATION_SUFFIX: &str = "...";

/// Request logging middleware
pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let query = request.uri().query().map(truncate_param).unwrap_or_default();

    let response = next.run(request).await;
    let elapsed_ms = start_time.elapsed().as_millis() as u64;

    info!(
        method = %method,
        path = %path,
        query = %query,
        status = response.status().as_u16(),
        elapsed_ms,
        "request completed"
    );

    response
}

/// Shorten a value to `MAX_PARAM_LENGTH` characters, marking the cut
fn truncate_param(value: &str) -> String {
    if value.chars().count() <= MAX_PARAM_LENGTH {
        return value.to_string();
    }

    let mut truncated: String = value.chars().take(MAX_PARAM_LENGTH).collect();
    truncated.push_str(TRUNCATION_SUFFIX);
    truncated
}
