//! Chart records (signed SOAP notes).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Builds the signature string stored with every chart record.
///
/// The server and existing records depend on this exact format.
pub fn signature_for(doctor_id: &str) -> String {
    format!("Signed by {}", doctor_id)
}

/// Body of `POST /Chart`. The server assigns the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChartRecord {
    /// Opaque SOAP content from the chart editor.
    pub soap_data: Value,
    pub signature: String,
    pub doctor_id: String,
    pub patient_id: String,
}

impl NewChartRecord {
    /// Creates a record signed by `doctor_id`.
    pub fn signed(soap_data: Value, doctor_id: &str, patient_id: &str) -> Self {
        Self {
            soap_data,
            signature: signature_for(doctor_id),
            doctor_id: doctor_id.to_string(),
            patient_id: patient_id.to_string(),
        }
    }
}

/// Payload of the `save-soap-signed` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveChartPayload {
    pub soap_data: Value,
    /// Overrides the selected patient when present.
    #[serde(
        default,
        deserialize_with = "crate::ids::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub patient_id: Option<String>,
}
