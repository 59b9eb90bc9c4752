//! Clinic records server
//!
//! REST backend for patients, doctors and medical visits:
//! - CRUD endpoints with HAL hypermedia links
//! - PostgreSQL storage (or an in-memory store for demos and tests)
//! - Visit lookups by patient, doctor and status, plus status statistics
//! - Prometheus metrics and OpenTelemetry tracing

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod services;
pub mod startup;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
