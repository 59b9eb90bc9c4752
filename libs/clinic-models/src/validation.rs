//! Draft validation helpers
//!
//! Drafts derive [`validator::Validate`]; this module turns the resulting
//! `ValidationErrors` into a flat `field -> messages` map keyed by the JSON
//! (camelCase) field name, which is what the API reports back to clients.

use heck::ToLowerCamelCase;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Field-level validation messages keyed by JSON field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Validate a draft and flatten any failures into [`FieldErrors`].
pub fn validate_draft<T: Validate>(draft: &T) -> Result<(), FieldErrors> {
    draft.validate().map_err(|errors| flatten(&errors))
}

fn flatten(errors: &ValidationErrors) -> FieldErrors {
    let mut out = FieldErrors::new();
    for (field, field_errors) in errors.field_errors() {
        let messages = out.entry(to_camel_case(&field.to_string())).or_default();
        for error in field_errors.iter() {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            messages.push(message);
        }
    }
    out
}

fn to_camel_case(field: &str) -> String {
    field.to_lower_camel_case()
}

/// Rejects empty and whitespace-only strings.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("must not be blank"));
        return Err(error);
    }
    Ok(())
}
