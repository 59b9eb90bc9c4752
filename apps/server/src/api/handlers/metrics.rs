//! Prometheus scrape endpoint

use crate::{state::AppState, Error, Result};
use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use prometheus::{Encoder, TextEncoder};

/// GET /metrics
///
/// Record and pool gauges are refreshed first so the scrape sees current
/// counts. The `clinic_server_info` line is appended after the registry.
pub async fn metrics_handler(State(state): State<AppState>) -> Result<Response> {
    let server_info = state
        .metrics_service
        .collect_custom_metrics(env!("CARGO_PKG_VERSION"), state.backend().as_str())
        .await;

    let encoder = TextEncoder::new();
    let mut body = Vec::new();
    encoder
        .encode(&prometheus::gather(), &mut body)
        .map_err(|e| Error::Internal(format!("Failed to encode metrics: {e}")))?;
    body.extend_from_slice(server_info.as_bytes());

    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        body,
    )
        .into_response())
}
