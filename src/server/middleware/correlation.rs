//! Per-request correlation ids and access logging.

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub static CORRELATION_ID_HEADER: HeaderName = HeaderName::from_static("x-correlation-id");

const MAX_CORRELATION_ID_LEN: usize = 128;

/// Uses the caller's correlation id when it is short printable ASCII, otherwise a new
/// UUID.
fn correlation_id(request: &Request<Body>) -> String {
    request
        .headers()
        .get(&CORRELATION_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_CORRELATION_ID_LEN
                && id.bytes().all(|b| b.is_ascii_graphic())
        })
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Runs the request inside a span carrying its correlation id, logs the outcome and
/// echoes the id on the response.
pub async fn correlation_middleware(request: Request<Body>, next: Next) -> Response {
    let correlation_id = correlation_id(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let span = tracing::info_span!(
        "http.request",
        correlation_id = %correlation_id,
        method = %method,
        path = %path,
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_millis() as u64;
    span.in_scope(|| {
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), latency_ms, "Request failed");
        } else {
            tracing::info!(status = status.as_u16(), latency_ms, "Request completed");
        }
    });

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response
            .headers_mut()
            .insert(CORRELATION_ID_HEADER.clone(), value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/health");
        if let Some(value) = header {
            builder = builder.header("x-correlation-id", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn keeps_client_correlation_id() {
        assert_eq!(correlation_id(&request_with(Some("abc-123"))), "abc-123");
    }

    #[test]
    fn generates_id_when_missing_or_invalid() {
        let generated = correlation_id(&request_with(None));
        assert!(Uuid::parse_str(&generated).is_ok());

        let too_long = "x".repeat(MAX_CORRELATION_ID_LEN + 1);
        assert_ne!(correlation_id(&request_with(Some(&too_long))), too_long);
    }
}
