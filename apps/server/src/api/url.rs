//! URL helpers for building absolute base URLs.

use axum::http::HeaderMap;

/// Build the server base URL (`{scheme}://{host}`) using forwarding headers when present.
///
/// Hypermedia links must point at the address the client used, which differs from the
/// listen address when running behind a reverse proxy.
pub fn base_url_from_headers(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .or_else(|| headers.get("x-forwarded-scheme"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    let host = headers
        .get("x-forwarded-host")
        .or_else(|| headers.get("host"))
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{}://{}", scheme, host)
}
