//! Remote record API abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::NewChartRecord;
use crate::command::Credentials;
use crate::error::Result;
use crate::patient::AssignmentUpdate;

/// Response of `POST /login`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{success, message?}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Admin entities that can be created through the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminEntity {
    Department,
    Patient,
    User,
}

impl AdminEntity {
    /// Path segment under `/admin/`.
    pub fn path(self) -> &'static str {
        match self {
            AdminEntity::Department => "department",
            AdminEntity::Patient => "patient",
            AdminEntity::User => "user",
        }
    }
}

/// HTTP access to the record API.
///
/// `Err` means the call did not produce a usable response (network error,
/// non-success status, undecodable body). Server-side rejections that come
/// back as `{success: false}` are returned as `Ok` values for the caller to
/// inspect. Chart lists and metadata are passed through untouched.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// `POST /login`
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// `GET /meta-data`
    async fn fetch_metadata(&self) -> Result<Value>;

    /// `POST /Chart`
    async fn save_chart(&self, record: &NewChartRecord) -> Result<ApiAck>;

    /// `GET /Chart?patientId=<id>`
    async fn chart_history(&self, patient_id: &str) -> Result<Value>;

    /// `GET /Chart`
    async fn list_charts(&self) -> Result<Value>;

    /// `DELETE /Chart/:id`
    async fn delete_chart(&self, chart_id: &str) -> Result<()>;

    /// `POST /admin/{department,patient,user}`
    async fn admin_create(&self, entity: AdminEntity, body: &Value) -> Result<()>;

    /// `PUT /admin/patient`
    async fn update_patient_assignment(&self, update: &AssignmentUpdate) -> Result<()>;
}
