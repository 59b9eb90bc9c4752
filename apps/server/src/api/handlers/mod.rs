//! Request handlers for API endpoints
//!
//! Handlers coordinate between routes and services:
//! they extract the request, call the service and attach hypermedia links.

pub mod doctors;
pub mod medical_visits;
pub mod metrics;
pub mod patients;
