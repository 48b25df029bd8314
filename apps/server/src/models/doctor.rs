//! Doctor roster entries

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use uuid::Uuid;

/// A doctor with a name and free-form profile fields (specialty, email, image, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, JsonValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewDoctor {
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, JsonValue>,
}

impl NewDoctor {
    pub fn validate(&self) -> crate::Result<()> {
        if self.name.trim().is_empty() {
            return Err(crate::Error::Validation("name is required".to_string()));
        }
        Ok(())
    }

    /// Profile fields with server-owned keys removed.
    pub fn into_parts(mut self) -> (String, Map<String, JsonValue>) {
        self.details.remove("_id");
        self.details.remove("name");
        (self.name, self.details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn free_form_fields_are_kept_flat() {
        let new_doctor: NewDoctor = serde_json::from_value(json!({
            "_id": "client-chosen",
            "name": "Dr. Rahman",
            "specialty": "Pediatric Dental",
            "email": "rahman@example.com"
        }))
        .unwrap();
        let (name, details) = new_doctor.into_parts();
        assert_eq!(name, "Dr. Rahman");
        assert!(!details.contains_key("_id"));

        let doctor = Doctor {
            id: Uuid::nil(),
            name,
            details,
        };
        let value = serde_json::to_value(&doctor).unwrap();
        assert_eq!(value["specialty"], "Pediatric Dental");
        assert_eq!(value["_id"], Uuid::nil().to_string());
    }
}
