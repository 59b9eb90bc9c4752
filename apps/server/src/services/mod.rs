//! Business logic layer

pub mod doctors;
pub mod examples;
pub mod medical_visits;
pub mod metrics;
pub mod patients;

pub use doctors::DoctorService;
pub use medical_visits::MedicalVisitService;
pub use metrics::MetricsService;
pub use patients::PatientService;
