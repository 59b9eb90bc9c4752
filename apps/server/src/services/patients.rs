//! Patient service
//!
//! Applies validation, uniqueness and not-found rules on top of the
//! [`PatientRepository`].

use crate::{db::PatientRepository, services::examples, Error, Result};
use clinic_models::{validate_draft, Patient, PatientDraft, ResourceKind};
use std::sync::Arc;

const KIND: ResourceKind = ResourceKind::Patient;

pub struct PatientService {
    repo: Arc<dyn PatientRepository>,
}

impl PatientService {
    pub fn new(repo: Arc<dyn PatientRepository>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> Result<Vec<Patient>> {
        self.repo.list().await
    }

    pub async fn get(&self, id: i64) -> Result<Patient> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(Error::ResourceNotFound { kind: KIND, id })
    }

    pub async fn get_by_national_id(&self, national_id: &str) -> Result<Patient> {
        self.repo
            .find_by_national_id(national_id)
            .await?
            .ok_or_else(|| Error::NationalIdNotFound {
                kind: KIND,
                national_id: national_id.to_string(),
            })
    }

    /// Create a patient after checking that national id and email are free.
    ///
    /// The repository enforces the same rules, so a concurrent insert that
    /// slips past these checks still ends in `Error::Duplicate`.
    pub async fn create(&self, draft: PatientDraft) -> Result<Patient> {
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

        let patient = self.repo.insert(draft).await?;
        tracing::info!(patient_id = patient.id, "Created patient");
        Ok(patient)
    }

    /// Overwrite a patient's mutable fields. A submitted national id is
    /// ignored; the stored one is kept.
    pub async fn update(&self, id: i64, draft: PatientDraft) -> Result<Patient> {
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

        let patient = self
            .repo
            .update(id, draft)
            .await?
            .ok_or(Error::ResourceNotFound { kind: KIND, id })?;
        tracing::info!(patient_id = id, "Updated patient");
        Ok(patient)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repo.delete(id).await? {
            return Err(Error::ResourceNotFound { kind: KIND, id });
        }
        tracing::info!(patient_id = id, "Deleted patient");
        Ok(())
    }

    /// Insert the fixed example patients, stopping at the first conflict.
    pub async fn load_examples(&self) -> Result<usize> {
        let examples = examples::example_patients();
        let total = examples.len();
        for draft in examples {
            self.create(draft).await?;
        }
        tracing::info!(total, "Loaded example patients");
        Ok(total)
    }

    pub async fn count(&self) -> Result<i64> {
        self.repo.count().await
    }
}
