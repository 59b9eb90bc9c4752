//! Hypermedia links (HAL `_links` / `_embedded`)
//!
//! Success responses carry absolute links built from the request's base URL.
//! Error responses are rendered without request context, so they carry
//! root-relative links instead.

use crate::Result;
use clinic_models::{ResourceKind, VisitStatus};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

/// Ordered set of link relations.
#[derive(Debug, Clone)]
pub struct Links {
    base_url: String,
    entries: Vec<(&'static str, String)>,
}

impl Links {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            entries: Vec::new(),
        }
    }

    /// Links whose hrefs are paths relative to the server root.
    pub fn relative() -> Self {
        Self::new("")
    }

    /// Add a relation pointing at `path` (which must start with `/`).
    pub fn add(mut self, rel: &'static str, path: impl AsRef<str>) -> Self {
        let href = format!("{}{}", self.base_url, path.as_ref());
        self.entries.push((rel, href));
        self
    }

    pub fn href(&self, rel: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(r, _)| *r == rel)
            .map(|(_, href)| href.as_str())
    }

    pub fn to_json(&self) -> JsonValue {
        let mut map = Map::new();
        for (rel, href) in &self.entries {
            map.insert(
                (*rel).to_string(),
                serde_json::json!({ "href": href }),
            );
        }
        JsonValue::Object(map)
    }
}

/// Serialize `entity` and attach `_links` to it.
pub fn entity_model<T: Serialize>(entity: &T, links: &Links) -> Result<JsonValue> {
    let mut value = serde_json::to_value(entity)
        .map_err(|e| crate::Error::Internal(format!("Failed to serialize response: {e}")))?;
    match value.as_object_mut() {
        Some(object) => {
            object.insert("_links".to_string(), links.to_json());
            Ok(value)
        }
        None => Err(crate::Error::Internal(
            "Linked entities must serialize to JSON objects".to_string(),
        )),
    }
}

/// Wrap already-linked items in a HAL collection.
pub fn collection_model(list_name: &str, items: Vec<JsonValue>, links: &Links) -> JsonValue {
    let mut embedded = Map::new();
    embedded.insert(list_name.to_string(), JsonValue::Array(items));
    serde_json::json!({
        "_embedded": embedded,
        "_links": links.to_json(),
    })
}

/// A plain confirmation message with links.
pub fn message_model(message: impl Into<String>, links: &Links) -> JsonValue {
    serde_json::json!({
        "message": message.into(),
        "_links": links.to_json(),
    })
}

/// Links attached to error bodies: back to the collection and to create.
pub fn error_links(kind: ResourceKind) -> Links {
    Links::relative()
        .add(rels::all(kind), paths::collection(kind))
        .add(rels::create(kind), paths::collection(kind))
}

/// Links attached to client errors not tied to a collection.
pub fn root_links() -> Links {
    Links::relative().add(rels::ROOT, "/")
}

/// Relation names.
pub mod rels {
    use clinic_models::ResourceKind;

    pub const SELF: &str = "self";
    pub const ROOT: &str = "root";
    pub const PATIENT_BY_NATIONAL_ID: &str = "patient-by-national-id";
    pub const DOCTOR_BY_NATIONAL_ID: &str = "doctor-by-national-id";
    pub const LOAD_EXAMPLES: &str = "load-examples";
    pub const STATISTICS: &str = "statistics";
    pub const VISITS_BY_PATIENT: &str = "visits-by-patient";
    pub const VISITS_BY_DOCTOR: &str = "visits-by-doctor";
    pub const VISITS_BY_STATUS: &str = "visits-by-status";
    pub const PATIENT: &str = "patient";
    pub const DOCTOR: &str = "doctor";
    pub const SCHEDULED_VISITS: &str = "scheduled-visits";
    pub const COMPLETED_VISITS: &str = "completed-visits";
    pub const CANCELLED_VISITS: &str = "cancelled-visits";

    pub fn all(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Patient => "all-patients",
            ResourceKind::Doctor => "all-doctors",
            ResourceKind::MedicalVisit => "all-visits",
        }
    }

    pub fn create(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Patient => "create-patient",
            ResourceKind::Doctor => "create-doctor",
            ResourceKind::MedicalVisit => "create-visit",
        }
    }

    pub fn update(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Patient => "update-patient",
            ResourceKind::Doctor => "update-doctor",
            ResourceKind::MedicalVisit => "update-visit",
        }
    }

    pub fn delete(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Patient => "delete-patient",
            ResourceKind::Doctor => "delete-doctor",
            ResourceKind::MedicalVisit => "delete-visit",
        }
    }

    pub fn by_id(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Patient => "patient-by-id",
            ResourceKind::Doctor => "doctor-by-id",
            ResourceKind::MedicalVisit => "visit-by-id",
        }
    }

}

/// URL paths of every resource endpoint.
pub mod paths {
    use super::*;

    pub fn collection(kind: ResourceKind) -> &'static str {
        match kind {
            ResourceKind::Patient => "/patients",
            ResourceKind::Doctor => "/doctors",
            ResourceKind::MedicalVisit => "/medical-visits",
        }
    }

    /// The collection a request path belongs to.
    pub fn kind_of(path: &str) -> Option<ResourceKind> {
        ResourceKind::ALL.into_iter().find(|kind| {
            path.strip_prefix(collection(*kind))
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
    }

    pub fn item(kind: ResourceKind, id: i64) -> String {
        format!("{}/{}", collection(kind), id)
    }

    pub fn by_national_id(kind: ResourceKind, national_id: &str) -> String {
        format!(
            "{}/national-id/{}",
            collection(kind),
            urlencoding::encode(national_id)
        )
    }

    pub fn load_examples(kind: ResourceKind) -> String {
        format!("{}/load-examples", collection(kind))
    }

    pub fn visits_by_patient(patient_id: i64) -> String {
        format!("/medical-visits/patient/{}", patient_id)
    }

    pub fn visits_by_doctor(doctor_id: i64) -> String {
        format!("/medical-visits/doctor/{}", doctor_id)
    }

    pub fn visits_by_status(status: VisitStatus) -> String {
        format!("/medical-visits/status/{}", status.as_str())
    }

    pub fn visit_statistics() -> &'static str {
        "/medical-visits/statistics"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn links_keep_insertion_order_and_prefix_base() {
        let links = Links::new("http://example.org")
            .add(rels::SELF, "/patients/1")
            .add(rels::all(ResourceKind::Patient), "/patients");

        let value = links.to_json();
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["self", "all-patients"]);
        assert_eq!(value["self"]["href"], "http://example.org/patients/1");
    }

    #[test]
    fn entity_model_inlines_fields() {
        let links = Links::relative().add(rels::SELF, "/doctors/3");
        let value = entity_model(&json!({ "id": 3, "name": "Dr. Ana" }), &links).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["_links"]["self"]["href"], "/doctors/3");
    }

    #[test]
    fn entity_model_rejects_scalars() {
        let links = Links::relative();
        assert!(entity_model(&5, &links).is_err());
    }

    #[test]
    fn collection_always_has_embedded_list() {
        let value = collection_model("patientList", Vec::new(), &Links::relative());
        assert_eq!(value["_embedded"]["patientList"], json!([]));
    }

    #[test]
    fn national_id_is_percent_encoded() {
        assert_eq!(
            paths::by_national_id(ResourceKind::Patient, "12 34/5"),
            "/patients/national-id/12%2034%2F5"
        );
    }

    #[test]
    fn request_paths_map_to_collections() {
        assert_eq!(paths::kind_of("/patients/abc"), Some(ResourceKind::Patient));
        assert_eq!(paths::kind_of("/doctors"), Some(ResourceKind::Doctor));
        assert_eq!(
            paths::kind_of("/medical-visits/status/Done"),
            Some(ResourceKind::MedicalVisit)
        );
        assert_eq!(paths::kind_of("/patientsx/1"), None);
        assert_eq!(paths::kind_of("/health"), None);
    }

    #[test]
    fn error_links_are_relative() {
        let links = error_links(ResourceKind::MedicalVisit);
        assert_eq!(links.href("all-visits"), Some("/medical-visits"));
        assert_eq!(links.href("create-visit"), Some("/medical-visits"));
    }
}
