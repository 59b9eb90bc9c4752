//! Doctor service
//!
//! Applies validation, uniqueness and not-found rules on top of the
//! [`DoctorRepository`].

use crate::{db::DoctorRepository, services::examples, Error, Result};
use clinic_models::{validate_draft, Doctor, DoctorDraft, ResourceKind};
use std::sync::Arc;

const KIND: ResourceKind = ResourceKind::Doctor;

pub struct DoctorService {
    repo: Arc<dyn DoctorRepository>,
}

impl DoctorService {
    pub fn new(repo: Arc<dyn DoctorRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Doctor>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Doctor> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(Error::ResourceNotFound { kind: KIND, id })
    }

    pub async fn get_by_national_id(&self, national_id: &str) -> Result<Doctor> {
        self.repo
            .find_by_national_id(national_id)
            .await?
            .ok_or_else(|| Error::NationalIdNotFound {
                kind: KIND,
                national_id: national_id.to_string(),
            })
    }

    /// Create a doctor after checking that national id and email are free.
    pub async fn create(&self, draft: DoctorDraft) -> Result<Doctor> {
        validate_draft(&draft).map_err(|errors| Error::validation(KIND, errors))?;

        if self
            .repo
            .find_by_national_id(&draft.national_id)
            .await?
            .is_some()
        {
            return Err(Error::Duplicate {
                kind: KIND,
                field: "national id",
                value: draft.national_id,
            });
        }

        if let Some(email) = draft.email.as_deref() {
            if self.repo.find_by_email(email).await?.is_some() {
                return Err(Error::Duplicate {
                    kind: KIND,
                    field: "email",
                    value: email.to_string(),
                });
            }
        }

        let doctor = self.repo.insert(draft).await?;
        tracing::info!(doctor_id = doctor.id, "Created doctor");
        Ok(doctor)
    }

    /// Overwrite a doctor's mutable fields. A submitted national id is
    /// ignored; the stored one is kept.
    pub async fn update(&self, id: i64, draft: DoctorDraft) -> Result<Doctor> {
        validate_draft(&draft).map_err(|errors| Error::validation(KIND, errors))?;

        self.get(id).await?;

        if let Some(email) = draft.email.as_deref() {
            if let Some(holder) = self.repo.find_by_email(email).await? {
                if holder.id != id {
                    return Err(Error::Duplicate {
                        kind: KIND,
                        field: "email",
                        value: email.to_string(),
                    });
                }
            }
        }

        let doctor = self
            .repo
            .update(id, draft)
            .await?
            .ok_or(Error::ResourceNotFound { kind: KIND, id })?;
        tracing::info!(doctor_id = id, "Updated doctor");
        Ok(doctor)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(Error::ResourceNotFound { kind: KIND, id });
        }
        tracing::info!(doctor_id = id, "Deleted doctor");
        Ok(())
    }

    /// Insert the three example doctors.
    pub async fn load_examples(&self) -> Result<usize> {
        let examples = examples::example_doctors();
        let total = examples.len();
        for draft in examples {
            self.create(draft).await?;
        }
        tracing::info!(total, "Loaded example doctors");
        Ok(total)
    }

    pub async fn count(&self) -> Result<i64> {
        self.repo.count().await
    }
}
