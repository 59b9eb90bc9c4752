//! Metrics middleware - tracks HTTP request metrics

use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};
use std::time::Instant;

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<f64>().ok())
}

/// Records per-request HTTP metrics and, for record endpoints, per-operation metrics
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let route = crate::metrics::sanitize_path(&path);

    crate::metrics::HTTP_REQUESTS_IN_FLIGHT
        .with_label_values(&[&method, &route])
        .inc();

    if let Some(size) = content_length(req.headers()) {
        crate::metrics::HTTP_REQUEST_SIZE_BYTES
            .with_label_values(&[&method, &route])
            .observe(size);
    }

    let response = next.run(req).await;

    let duration = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    crate::metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &route, &status])
        .inc();
    crate::metrics::HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &route])
        .observe(duration);

    if let Some(size) = content_length(response.headers()) {
        crate::metrics::HTTP_RESPONSE_SIZE_BYTES
            .with_label_values(&[&method, &route, &status])
            .observe(size);
    }

    if let (Some(resource), Some(operation)) = (
        crate::metrics::extract_resource_type(&path),
        crate::metrics::extract_operation(&method, &path),
    ) {
        let outcome = if response.status().is_success() {
            "success"
        } else if response.status().is_client_error() {
            "client_error"
        } else {
            "server_error"
        };

        crate::metrics::CLINIC_OPERATIONS_TOTAL
            .with_label_values(&[&resource, &operation, outcome])
            .inc();
        crate::metrics::CLINIC_OPERATION_DURATION_SECONDS
            .with_label_values(&[&resource, &operation])
            .observe(duration);
    }

    crate::metrics::HTTP_REQUESTS_IN_FLIGHT
        .with_label_values(&[&method, &route])
        .dec();

    response
}
