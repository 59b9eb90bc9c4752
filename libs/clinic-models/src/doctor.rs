//! Doctor records

use crate::person::Gender;
use crate::validation::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A stored doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub national_id: String,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub specialty: String,
}

/// Client-supplied doctor fields, used for both create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DoctorDraft {
    #[validate(
        custom(function = "not_blank"),
        length(max = 12, message = "national id must be at most 12 characters")
    )]
    pub national_id: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "name must be at most 100 characters")
    )]
    pub name: String,

    #[validate(range(min = 18, max = 100, message = "age must be between 18 and 100"))]
    #[serde(default)]
    pub age: Option<i32>,

    #[serde(default)]
    pub gender: Option<Gender>,

    #[validate(length(max = 20, message = "phone must be at most 20 characters"))]
    #[serde(default)]
    pub phone: Option<String>,

    #[validate(
        email(message = "email must be a valid address"),
        length(max = 255, message = "email must be at most 255 characters")
    )]
    #[serde(default)]
    pub email: Option<String>,

    #[validate(length(max = 200, message = "address must be at most 200 characters"))]
    #[serde(default)]
    pub address: Option<String>,

    #[validate(
        custom(function = "not_blank"),
        length(max = 100, message = "specialty must be at most 100 characters")
    )]
    pub specialty: String,
}

impl Doctor {
    pub fn from_draft(id: i64, draft: DoctorDraft) -> Self {
        Self {
            id,
            national_id: draft.national_id,
            name: draft.name,
            age: draft.age,
            gender: draft.gender,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            specialty: draft.specialty,
        }
    }

    /// Overwrite every mutable field. The national id is left untouched.
    pub fn apply(&mut self, draft: DoctorDraft) {
        self.name = draft.name;
        self.age = draft.age;
        self.gender = draft.gender;
        self.phone = draft.phone;
        self.email = draft.email;
        self.address = draft.address;
        self.specialty = draft.specialty;
    }
}
