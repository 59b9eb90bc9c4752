//! In-memory storage backend
//!
//! Keeps every table in process memory behind a `tokio::sync::RwLock`.
//! Ids are assigned from a per-table counter starting at 1 and are never
//! reused. National id and email uniqueness is checked under the write lock,
//! mirroring the UNIQUE constraints of the PostgreSQL schema.

use crate::{
    db::traits::{DoctorRepository, MedicalVisitRepository, PatientRepository},
    Error, Result,
};
use async_trait::async_trait;
use clinic_models::{
    Doctor, DoctorDraft, MedicalVisit, MedicalVisitDraft, Patient, PatientDraft, ResourceKind,
    VisitStatistics, VisitStatus,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn filtered(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| predicate(row)).cloned().collect()
    }
}

/// Records carrying the national id / email unique keys.
trait UniqueKeys {
    fn national_id(&self) -> &str;
    fn email(&self) -> Option<&str>;
}

impl UniqueKeys for Patient {
    fn national_id(&self) -> &str {
        &self.national_id
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl UniqueKeys for Doctor {
    fn national_id(&self) -> &str {
        &self.national_id
    }

    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl<T: Clone + UniqueKeys> Table<T> {
    fn find_by_national_id(&self, national_id: &str) -> Option<T> {
        self.rows
            .values()
            .find(|row| row.national_id() == national_id)
            .cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<T> {
        self.rows
            .values()
            .find(|row| row.email() == Some(email))
            .cloned()
    }

    /// Reject keys already held by a row other than `own_id`.
    fn check_unique(
        &self,
        kind: ResourceKind,
        own_id: Option<i64>,
        national_id: &str,
        email: Option<&str>,
    ) -> Result<()> {
        for (id, row) in &self.rows {
            if Some(*id) == own_id {
                continue;
            }
            if own_id.is_none() && row.national_id() == national_id {
                return Err(Error::Duplicate {
                    kind,
                    field: "national id",
                    value: national_id.to_string(),
                });
            }
            if let Some(email) = email {
                if row.email() == Some(email) {
                    return Err(Error::Duplicate {
                        kind,
                        field: "email",
                        value: email.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// All three tables of the in-memory backend.
///
/// Cloning is cheap and clones share the same data.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    patients: Arc<RwLock<Table<Patient>>>,
    doctors: Arc<RwLock<Table<Doctor>>>,
    visits: Arc<RwLock<Table<MedicalVisit>>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            patients: Arc::new(RwLock::new(Table::new())),
            doctors: Arc::new(RwLock::new(Table::new())),
            visits: Arc::new(RwLock::new(Table::new())),
        }
    }
}

#[async_trait]
impl PatientRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Patient>> {
        Ok(self.patients.read().await.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>> {
        Ok(self.patients.read().await.rows.get(&id).cloned())
    }

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Patient>> {
        Ok(self.patients.read().await.find_by_national_id(national_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Patient>> {
        Ok(self.patients.read().await.find_by_email(email))
    }

    async fn insert(&self, draft: PatientDraft) -> Result<Patient> {
        let mut table = self.patients.write().await;
        table.check_unique(
            ResourceKind::Patient,
            None,
            &draft.national_id,
            draft.email.as_deref(),
        )?;

        let id = table.allocate_id();
        let patient = Patient::from_draft(id, draft);
        table.rows.insert(id, patient.clone());
        Ok(patient)
    }

    async fn update(&self, id: i64, draft: PatientDraft) -> Result<Option<Patient>> {
        let mut table = self.patients.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        table.check_unique(
            ResourceKind::Patient,
            Some(id),
            &draft.national_id,
            draft.email.as_deref(),
        )?;

        Ok(table.rows.get_mut(&id).map(|patient| {
            patient.apply(draft);
            patient.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.patients.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.patients.read().await.rows.len() as i64)
    }
}

#[async_trait]
impl DoctorRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Doctor>> {
        Ok(self.doctors.read().await.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Doctor>> {
        Ok(self.doctors.read().await.rows.get(&id).cloned())
    }

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Doctor>> {
        Ok(self.doctors.read().await.find_by_national_id(national_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>> {
        Ok(self.doctors.read().await.find_by_email(email))
    }

    async fn insert(&self, draft: DoctorDraft) -> Result<Doctor> {
        let mut table = self.doctors.write().await;
        table.check_unique(
            ResourceKind::Doctor,
            None,
            &draft.national_id,
            draft.email.as_deref(),
        )?;

        let id = table.allocate_id();
        let doctor = Doctor::from_draft(id, draft);
        table.rows.insert(id, doctor.clone());
        Ok(doctor)
    }

    async fn update(&self, id: i64, draft: DoctorDraft) -> Result<Option<Doctor>> {
        let mut table = self.doctors.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        table.check_unique(
            ResourceKind::Doctor,
            Some(id),
            &draft.national_id,
            draft.email.as_deref(),
        )?;

        Ok(table.rows.get_mut(&id).map(|doctor| {
            doctor.apply(draft);
            doctor.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.doctors.write().await.rows.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.doctors.read().await.rows.len() as i64)
    }
}

#[async_trait]
impl MedicalVisitRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<MedicalVisit>> {
        Ok(self.visits.read().await.all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<MedicalVisit>> {
        Ok(self.visits.read().await.rows.get(&id).cloned())
    }

    async fn find_by_patient(
        &self,
        patient_id: i64,
        status: Option<VisitStatus>,
    ) -> Result<Vec<MedicalVisit>> {
        Ok(self.visits.read().await.filtered(|visit| {
            visit.patient_id == patient_id && status.map_or(true, |s| visit.status == s)
        }))
    }

    async fn find_by_doctor(&self, doctor_id: i64) -> Result<Vec<MedicalVisit>> {
        Ok(self
            .visits
            .read()
            .await
            .filtered(|visit| visit.doctor_id == doctor_id))
    }

    async fn find_by_status(&self, status: VisitStatus) -> Result<Vec<MedicalVisit>> {
        Ok(self
            .visits
            .read()
            .await
            .filtered(|visit| visit.status == status))
    }

    async fn insert(&self, draft: MedicalVisitDraft) -> Result<MedicalVisit> {
        let mut table = self.visits.write().await;
        let id = table.allocate_id();
        let visit = MedicalVisit::from_draft(id, draft);
        table.rows.insert(id, visit.clone());
        Ok(visit)
    }

    async fn update(&self, id: i64, draft: MedicalVisitDraft) -> Result<Option<MedicalVisit>> {
        let mut table = self.visits.write().await;
        Ok(table.rows.get_mut(&id).map(|visit| {
            visit.apply(draft);
            visit.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.visits.write().await.rows.remove(&id).is_some())
    }

    async fn statistics(&self) -> Result<VisitStatistics> {
        let table = self.visits.read().await;
        let count = |status: VisitStatus| {
            table.rows.values().filter(|v| v.status == status).count() as i64
        };

        Ok(VisitStatistics::from_counts(
            count(VisitStatus::Scheduled),
            count(VisitStatus::Completed),
            count(VisitStatus::Cancelled),
        ))
    }
}
