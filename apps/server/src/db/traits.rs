//! Repository traits implemented by every storage backend
//!
//! The services only talk to these traits, so the PostgreSQL store and the
//! in-memory store are interchangeable. Implementations enforce the same
//! uniqueness rules as the database constraints and report violations as
//! [`crate::Error::Duplicate`].

use crate::Result;
use async_trait::async_trait;
use clinic_models::{
    Doctor, DoctorDraft, MedicalVisit, MedicalVisitDraft, Patient, PatientDraft,
    VisitStatistics, VisitStatus,
};

#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// All patients ordered by id
    async fn list(&self) -> Result<Vec<Patient>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>>;

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Patient>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Patient>>;

    /// Insert a new patient with a store-assigned id
    ///
    /// # Errors
    /// * `Duplicate` - national id or email already taken
    async fn insert(&self, draft: PatientDraft) -> Result<Patient>;

    /// Overwrite the mutable fields of an existing patient
    ///
    /// # Returns
    /// * `Ok(Some(patient))` - updated record
    /// * `Ok(None)` - no patient with that id; nothing was written
    async fn update(&self, id: i64, draft: PatientDraft) -> Result<Option<Patient>>;

    /// Remove a patient, returning whether a row was deleted
    async fn delete(&self, id: i64) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait DoctorRepository: Send + Sync {
    /// All doctors ordered by id
    async fn list(&self) -> Result<Vec<Doctor>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Doctor>>;

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Doctor>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>>;

    /// Insert a new doctor with a store-assigned id
    ///
    /// # Errors
    /// * `Duplicate` - national id or email already taken
    async fn insert(&self, draft: DoctorDraft) -> Result<Doctor>;

    /// Overwrite the mutable fields of an existing doctor; `None` when absent
    async fn update(&self, id: i64, draft: DoctorDraft) -> Result<Option<Doctor>>;

    async fn delete(&self, id: i64) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait MedicalVisitRepository: Send + Sync {
    /// All visits ordered by id
    async fn list(&self) -> Result<Vec<MedicalVisit>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<MedicalVisit>>;

    /// Visits of one patient, optionally narrowed to a single status
    async fn find_by_patient(
        &self,
        patient_id: i64,
        status: Option<VisitStatus>,
    ) -> Result<Vec<MedicalVisit>>;

    async fn find_by_doctor(&self, doctor_id: i64) -> Result<Vec<MedicalVisit>>;

    async fn find_by_status(&self, status: VisitStatus) -> Result<Vec<MedicalVisit>>;

    async fn insert(&self, draft: MedicalVisitDraft) -> Result<MedicalVisit>;

    /// Overwrite every field of an existing visit; `None` when absent
    async fn update(&self, id: i64, draft: MedicalVisitDraft) -> Result<Option<MedicalVisit>>;

    async fn delete(&self, id: i64) -> Result<bool>;

    /// Visit counts per status, read in a single pass so they sum to the total
    async fn statistics(&self) -> Result<VisitStatistics>;
}
