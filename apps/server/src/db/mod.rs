//! Database layer - repositories and data access

pub mod doctors;
pub mod medical_visits;
pub mod memory;
pub mod patients;
pub mod traits;

pub use doctors::PostgresDoctorRepository;
pub use medical_visits::PostgresMedicalVisitRepository;
pub use memory::MemoryStore;
pub use patients::PostgresPatientRepository;
pub use traits::{DoctorRepository, MedicalVisitRepository, PatientRepository};

use crate::Error;
use clinic_models::{Gender, ResourceKind, VisitStatus};

/// Translate a UNIQUE constraint violation into [`Error::Duplicate`].
///
/// Constraints are named `<table>_national_id_key` / `<table>_email_key`,
/// which is how the offending field is recovered. Any other error passes
/// through as [`Error::Database`].
pub(crate) fn map_unique_violation(
    err: sqlx::Error,
    kind: ResourceKind,
    national_id: &str,
    email: Option<&str>,
) -> Error {
    let constraint = match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            db_err.constraint().map(str::to_string)
        }
        _ => return Error::Database(err),
    };

    match constraint.as_deref() {
        Some(name) if name.ends_with("_email_key") => Error::Duplicate {
            kind,
            field: "email",
            value: email.unwrap_or_default().to_string(),
        },
        Some(name) if name.ends_with("_national_id_key") => Error::Duplicate {
            kind,
            field: "national id",
            value: national_id.to_string(),
        },
        _ => Error::Database(err),
    }
}

pub(crate) fn parse_gender(raw: Option<String>) -> crate::Result<Option<Gender>> {
    raw.map(|value| {
        value
            .parse::<Gender>()
            .map_err(|_| Error::Internal(format!("Stored gender '{value}' is not recognised")))
    })
    .transpose()
}

pub(crate) fn parse_status(raw: &str) -> crate::Result<VisitStatus> {
    raw.parse::<VisitStatus>()
        .map_err(|_| Error::Internal(format!("Stored visit status '{raw}' is not recognised")))
}
