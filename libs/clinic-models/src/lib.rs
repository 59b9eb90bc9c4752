//! Clinic domain records
//!
//! Plain data types shared by the server and its storage backends:
//! - Patients and doctors (people identified by a national id)
//! - Medical visits linking a patient to a doctor
//! - Validation rules for client-supplied drafts

pub mod doctor;
pub mod error;
pub mod kind;
pub mod medical_visit;
pub mod patient;
pub mod person;
pub mod validation;

pub use doctor::{Doctor, DoctorDraft};
pub use error::{Error, Result};
pub use kind::ResourceKind;
pub use medical_visit::{MedicalVisit, MedicalVisitDraft, VisitStatistics, VisitStatus};
pub use patient::{Patient, PatientDraft};
pub use person::Gender;
pub use validation::{validate_draft, FieldErrors};
