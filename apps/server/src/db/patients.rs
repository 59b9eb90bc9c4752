//! Patient repository - PostgreSQL implementation

use super::{map_unique_violation, parse_gender};
use crate::{db::traits::PatientRepository, Result};
use async_trait::async_trait;
use clinic_models::{Patient, PatientDraft, ResourceKind};
use sqlx::{postgres::PgRow, PgPool, Row};

const COLUMNS: &str = "id, national_id, name, age, gender, phone, email, address";

#[derive(Debug, Clone)]
pub struct PostgresPatientRepository {
    pool: PgPool,
}

impl PostgresPatientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Patient>> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE {column} = $1");
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(patient_from_row).transpose()
    }
}

fn patient_from_row(row: &PgRow) -> Result<Patient> {
    Ok(Patient {
        id: row.try_get("id")?,
        national_id: row.try_get("national_id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        gender: parse_gender(row.try_get("gender")?)?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        address: row.try_get("address")?,
    })
}

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    async fn list(&self) -> Result<Vec<Patient>> {
        let query = format!("SELECT {COLUMNS} FROM patients ORDER BY id");
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(patient_from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>> {
        let query = format!("SELECT {COLUMNS} FROM patients WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(patient_from_row).transpose()
    }

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Patient>> {
        self.find_one("national_id", national_id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Patient>> {
        self.find_one("email", email).await
    }

    async fn insert(&self, draft: PatientDraft) -> Result<Patient> {
        let query = format!(
            r#"
            INSERT INTO patients (national_id, name, age, gender, phone, email, address)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(&draft.national_id)
            .bind(&draft.name)
            .bind(draft.age)
            .bind(draft.gender.map(|g| g.as_str()))
            .bind(&draft.phone)
            .bind(&draft.email)
            .bind(&draft.address)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    ResourceKind::Patient,
                    &draft.national_id,
                    draft.email.as_deref(),
                )
            })?;

        patient_from_row(&row)
    }

    async fn update(&self, id: i64, draft: PatientDraft) -> Result<Option<Patient>> {
        let query = format!(
            r#"
            UPDATE patients
            SET name = $2, age = $3, gender = $4, phone = $5, email = $6, address = $7
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(draft.age)
            .bind(draft.gender.map(|g| g.as_str()))
            .bind(&draft.phone)
            .bind(&draft.email)
            .bind(&draft.address)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    ResourceKind::Patient,
                    &draft.national_id,
                    draft.email.as_deref(),
                )
            })?;

        row.as_ref().map(patient_from_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM patients")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
