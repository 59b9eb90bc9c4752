//! Custom Axum extractors that report failures in the API's JSON error format.

use crate::api::links::paths;
use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// JSON request body.
///
/// Unlike `axum::Json`, a missing content type is accepted and malformed or
/// mistyped bodies become [`crate::Error::InvalidInput`] (400 with a JSON body
/// linking back to the collection the request was addressed to).
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = crate::Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let kind = paths::kind_of(req.uri().path());
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_lowercase();

        // Extract just the media type (before any ;charset= etc.)
        let media_type = content_type.split(';').next().unwrap_or("").trim();
        if !media_type.is_empty() && !media_type.ends_with("json") {
            return Err(crate::Error::invalid_input(
                kind,
                format!(
                    "Unsupported content type '{}', expected application/json",
                    media_type
                ),
            ));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            crate::Error::invalid_input(kind, format!("Failed to read request body: {}", e))
        })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| {
            crate::Error::invalid_input(kind, format!("Invalid JSON in request body: {}", e))
        })?;

        Ok(JsonBody(value))
    }
}

/// Path parameters, e.g. a numeric id.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = crate::Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                crate::Error::invalid_input(
                    paths::kind_of(parts.uri.path()),
                    format!("Invalid path parameter: {}", e),
                )
            })?;
        Ok(ApiPath(value))
    }
}
