//! Route tables, one per resource collection

pub mod doctors;
pub mod medical_visits;
pub mod metrics;
pub mod patients;
