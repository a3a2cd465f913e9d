//! Patient domain model.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::{id_or_empty, string_or_number};

/// Sentinel the admin panel sends to clear a patient's assigned doctor.
pub const UNASSIGNED_SENTINEL: &str = "unassigned";

/// A patient as exchanged with the record API and the chart screen.
///
/// Only the fields the client reasons about are typed. Every other
/// demographic field is kept in `demographics` so that a patient pushed back
/// to the UI is identical to the one the UI selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Assigned doctor id; empty when unassigned.
    #[serde(default, deserialize_with = "id_or_empty")]
    pub in_charge_id: String,
    #[serde(flatten)]
    pub demographics: Map<String, Value>,
}

impl Patient {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            in_charge_id: String::new(),
            demographics: Map::new(),
        }
    }

    pub fn with_in_charge(mut self, doctor_id: impl Into<String>) -> Self {
        self.in_charge_id = doctor_id.into();
        self
    }

    pub fn is_assigned(&self) -> bool {
        !self.in_charge_id.is_empty()
    }
}

/// Maps an assignment value coming from the admin panel to the stored form.
pub fn normalize_in_charge_id(value: &str) -> String {
    if value == UNASSIGNED_SENTINEL {
        String::new()
    } else {
        value.to_string()
    }
}

/// Body of `PUT /admin/patient`.
///
/// Forwarded to the server exactly as the admin panel sent it, sentinel
/// included; only the local session copy is normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentUpdate {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "id_or_empty")]
    pub in_charge_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssignmentUpdate {
    pub fn new(id: impl Into<String>, in_charge_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            in_charge_id: in_charge_id.into(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patient_round_trips_unknown_demographics() {
        let raw = json!({
            "id": "p-7",
            "name": "Kim",
            "inChargeId": "doc1",
            "birthDate": "1980-02-01",
            "department": "IM"
        });

        let patient: Patient = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(patient.in_charge_id, "doc1");
        assert_eq!(patient.demographics.get("department"), Some(&json!("IM")));
        assert_eq!(serde_json::to_value(&patient).unwrap(), raw);
    }

    #[test]
    fn test_missing_in_charge_means_unassigned() {
        let patient: Patient = serde_json::from_value(json!({"id": "p-1", "name": "Lee"})).unwrap();
        assert!(!patient.is_assigned());
    }

    #[test]
    fn test_numeric_ids_and_null_assignment() {
        let patient: Patient =
            serde_json::from_value(json!({"id": 12, "name": "Park", "inChargeId": null})).unwrap();
        assert_eq!(patient.id, "12");
        assert!(!patient.is_assigned());

        let update: AssignmentUpdate =
            serde_json::from_value(json!({"id": 12, "inChargeId": 3})).unwrap();
        assert_eq!(update, AssignmentUpdate::new("12", "3"));
    }

    #[test]
    fn test_normalize_in_charge_id() {
        assert_eq!(normalize_in_charge_id("unassigned"), "");
        assert_eq!(normalize_in_charge_id("doc2"), "doc2");
    }
}
