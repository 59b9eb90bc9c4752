//! Error types for the clinic server

use crate::api::links;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use clinic_models::{FieldErrors, ResourceKind};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("No {kind} found with id {id}")]
    ResourceNotFound { kind: ResourceKind, id: i64 },

    #[error("No {kind} found with national id {national_id}")]
    NationalIdNotFound {
        kind: ResourceKind,
        national_id: String,
    },

    #[error("A {kind} with {field} {value} already exists")]
    Duplicate {
        kind: ResourceKind,
        field: &'static str,
        value: String,
    },

    #[error("Validation failed")]
    Validation {
        kind: ResourceKind,
        errors: FieldErrors,
    },

    #[error(transparent)]
    Domain(#[from] clinic_models::Error),

    /// Malformed path parameters or request bodies. `kind` is the collection
    /// the request was addressed to, when known.
    #[error("Invalid request: {message}")]
    InvalidInput {
        kind: Option<ResourceKind>,
        message: String,
    },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn validation(kind: ResourceKind, errors: FieldErrors) -> Self {
        Error::Validation { kind, errors }
    }

    pub fn invalid_input(kind: Option<ResourceKind>, message: impl Into<String>) -> Self {
        Error::InvalidInput {
            kind,
            message: message.into(),
        }
    }

    /// The resource collection the error relates to, if any.
    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            Error::ResourceNotFound { kind, .. }
            | Error::NationalIdNotFound { kind, .. }
            | Error::Duplicate { kind, .. }
            | Error::Validation { kind, .. } => Some(*kind),
            Error::InvalidInput { kind, .. } => *kind,
            Error::Domain(clinic_models::Error::InvalidStatus(_)) => {
                Some(ResourceKind::MedicalVisit)
            }
            _ => None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ResourceNotFound { .. } | Error::NationalIdNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Error::Duplicate { .. }
            | Error::Validation { .. }
            | Error::Domain(_)
            | Error::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Error::Database(_) | Error::Migration(_) | Error::Internal(_) | Error::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Client errors outside any collection still point back to the root
        let error_links = match self.kind() {
            Some(kind) => Some(links::error_links(kind)),
            None if status.is_client_error() => Some(links::root_links()),
            None => None,
        };

        let mut body = match &self {
            Error::ResourceNotFound { .. } | Error::NationalIdNotFound { .. } => {
                json!({ "message": self.to_string() })
            }
            Error::Validation { errors, .. } => json!({
                "error": self.to_string(),
                "fieldErrors": errors,
            }),
            Error::Database(_) | Error::Migration(_) | Error::Internal(_) | Error::Other(_) => {
                tracing::error!("Internal error: {}", self);
                json!({ "error": "Internal server error" })
            }
            _ => json!({ "error": self.to_string() }),
        };

        if let Some(error_links) = error_links {
            body["_links"] = error_links.to_json();
        }

        (status, Json(body)).into_response()
    }
}
