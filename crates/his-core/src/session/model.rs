//! Session value types.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::patient::Patient;

/// Role granted by the record API at login.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Doctor,
    Admin,
    Viewer,
}

impl Role {
    /// Parses the role string returned by the login endpoint.
    ///
    /// A missing or empty role means `Doctor`. A role this client does not
    /// know maps to `Viewer`, the least-privileged role.
    pub fn from_login(role: Option<&str>) -> Self {
        match role {
            None | Some("") => Role::Doctor,
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("[Session] Unknown role '{}' from login, using viewer", raw);
                Role::Viewer
            }),
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// The authenticated doctor and role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub doctor_id: String,
    pub role: Role,
}

/// The single active session of the running process.
///
/// Starts with no doctor, the `Doctor` role and no patient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub doctor_id: Option<String>,
    pub role: Role,
    pub selected_patient: Option<Patient>,
}

impl Session {
    pub fn identity(&self) -> Option<Identity> {
        self.doctor_id.as_ref().map(|doctor_id| Identity {
            doctor_id: doctor_id.clone(),
            role: self.role,
        })
    }

    /// Resolves the patient a chart command targets: the explicit id when
    /// given, otherwise the selected patient's id.
    pub fn resolve_patient_id(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .or_else(|| self.selected_patient.as_ref().map(|p| p.id.clone()))
    }
}
