//! Request ID middleware with OpenTelemetry trace context injection

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use opentelemetry::trace::TraceContextExt;
use std::time::Instant;
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

/// Opens the root span of every HTTP request.
///
/// The server always assigns its own `X-Request-Id`. A client-supplied id is
/// echoed back in `X-Correlation-Id`, and the OpenTelemetry trace id is
/// exposed as `X-Trace-Id`.
#[tracing::instrument(
    name = "http_request",
    skip_all,
    fields(
        http.method = %req.method(),
        http.route = %crate::metrics::sanitize_path(req.uri().path()),
        otel.kind = "server",
        http.response.status_code = tracing::field::Empty,
        clinic.resource = tracing::field::Empty,
        clinic.operation = tracing::field::Empty,
        request_id = tracing::field::Empty,
    )
)]
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let span = Span::current();
    let start = Instant::now();

    let client_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let request_id = Uuid::new_v4().to_string();
    span.record("request_id", &request_id);

    let method = req.method().clone();
    let path = req.uri().path().to_string();
    if let Some(resource) = crate::metrics::extract_resource_type(&path) {
        span.record("clinic.resource", &resource);
    }
    if let Some(operation) = crate::metrics::extract_operation(method.as_str(), &path) {
        span.record("clinic.operation", &operation);
    }

    tracing::debug!(method = %method, path = %path, "Incoming request");

    let mut response = next.run(req).await;

    let status = response.status();
    span.record("http.response.status_code", status.as_u16());
    tracing::info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    let trace_id = span.context().span().span_context().trace_id().to_string();
    set_response_ids(response.headers_mut(), &request_id, &trace_id, client_id);

    response
}

fn set_response_ids(
    headers: &mut HeaderMap,
    request_id: &str,
    trace_id: &str,
    client_id: Option<String>,
) {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        headers.insert("x-request-id", value);
    }
    if let Ok(value) = HeaderValue::from_str(trace_id) {
        headers.insert("x-trace-id", value);
    }
    if let Some(client_id) = client_id.filter(|id| id != request_id) {
        if let Ok(value) = HeaderValue::from_str(&client_id) {
            headers.insert("x-correlation-id", value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_id_is_echoed_as_correlation_id() {
        let mut headers = HeaderMap::new();
        set_response_ids(&mut headers, "server-1", "abc", Some("client-7".to_string()));

        assert_eq!(headers["x-request-id"], "server-1");
        assert_eq!(headers["x-trace-id"], "abc");
        assert_eq!(headers["x-correlation-id"], "client-7");
    }

    #[test]
    fn no_correlation_id_without_client_id() {
        let mut headers = HeaderMap::new();
        set_response_ids(&mut headers, "server-1", "abc", None);
        assert!(headers.get("x-correlation-id").is_none());
    }
}
