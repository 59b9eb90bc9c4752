//! Doctor repository - PostgreSQL implementation

use super::{map_unique_violation, parse_gender};
use crate::{db::traits::DoctorRepository, Result};
use async_trait::async_trait;
use clinic_models::{Doctor, DoctorDraft, ResourceKind};
use sqlx::{postgres::PgRow, PgPool, Row};

const COLUMNS: &str = "id, national_id, name, age, gender, phone, email, address, specialty";

#[derive(Debug, Clone)]
pub struct PostgresDoctorRepository {
    pool: PgPool,
}

impl PostgresDoctorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<Doctor>> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE {column} = $1");
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(doctor_from_row).transpose()
    }
}

fn doctor_from_row(row: &PgRow) -> Result<Doctor> {
    Ok(Doctor {
        id: row.try_get("id")?,
        national_id: row.try_get("national_id")?,
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        gender: parse_gender(row.try_get("gender")?)?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        address: row.try_get("address")?,
        specialty: row.try_get("specialty")?,
    })
}

#[async_trait]
impl DoctorRepository for PostgresDoctorRepository {
    async fn list(&self) -> Result<Vec<Doctor>> {
        let query = format!("SELECT {COLUMNS} FROM doctors ORDER BY id");
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        rows.iter().map(doctor_from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Doctor>> {
        let query = format!("SELECT {COLUMNS} FROM doctors WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(doctor_from_row).transpose()
    }

    async fn find_by_national_id(&self, national_id: &str) -> Result<Option<Doctor>> {
        self.find_one("national_id", national_id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Doctor>> {
        self.find_one("email", email).await
    }

    async fn insert(&self, draft: DoctorDraft) -> Result<Doctor> {
        let query = format!(
            r#"
            INSERT INTO doctors (national_id, name, age, gender, phone, email, address, specialty)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
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
            .bind(&draft.specialty)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    ResourceKind::Doctor,
                    &draft.national_id,
                    draft.email.as_deref(),
                )
            })?;

        doctor_from_row(&row)
    }

    async fn update(&self, id: i64, draft: DoctorDraft) -> Result<Option<Doctor>> {
        let query = format!(
            r#"
            UPDATE doctors
            SET name = $2, age = $3, gender = $4, phone = $5, email = $6,
                address = $7, specialty = $8
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
            .bind(&draft.specialty)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                map_unique_violation(
                    e,
                    ResourceKind::Doctor,
                    &draft.national_id,
                    draft.email.as_deref(),
                )
            })?;

        row.as_ref().map(doctor_from_row).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM doctors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
