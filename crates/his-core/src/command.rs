//! The IPC contract between the UI and the main process.
//!
//! Commands and events are keyed by their channel name on the wire, so a
//! command arrives as `{"command": "<channel>", "payload": ...}` and an event
//! leaves as `{"channel": "<channel>", "payload": ...}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, VariantNames};

use crate::chart::SaveChartPayload;
use crate::error::{HisError, Result};
use crate::patient::{AssignmentUpdate, Patient};
use crate::session::Role;

/// Login form contents.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("id", &self.id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A command sent by a screen to the main process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr, VariantNames)]
#[serde(tag = "command", content = "payload", rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Command {
    RequestLogin(Credentials),
    RequestMetadata,
    PatientSelected(Patient),
    /// Sent by the chart screen after a reload.
    RequestPatientData,
    SaveSoapSigned(SaveChartPayload),
    /// Explicit patient id, or the selected patient when absent.
    RequestHistory(#[serde(deserialize_with = "crate::ids::optional_id")] Option<String>),
    AdminAddDept(Value),
    AdminAddPatient(Value),
    AdminAddUser(Value),
    AdminGetCharts,
    AdminDeleteChart(#[serde(deserialize_with = "crate::ids::string_or_number")] String),
    AdminUpdatePatient(AssignmentUpdate),
}

impl Command {
    /// Whether a command is registered on `channel`.
    pub fn is_known_channel(channel: &str) -> bool {
        Self::VARIANTS.contains(&channel)
    }

    /// Decodes a command from its channel name and raw payload.
    ///
    /// Fails with [`HisError::UnknownCommand`] for an unregistered channel and
    /// with [`HisError::InvalidPayload`] when the payload does not fit.
    pub fn from_parts(channel: &str, payload: Value) -> Result<Self> {
        if !Self::is_known_channel(channel) {
            return Err(HisError::unknown_command(channel));
        }
        let envelope = serde_json::json!({ "command": channel, "payload": payload });
        serde_json::from_value(envelope)
            .map_err(|e| HisError::invalid_payload(channel, e.to_string()))
    }

    /// The channel name this command arrives on.
    pub fn channel(&self) -> &str {
        self.as_ref()
    }

    /// Commands that change server-side records.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::SaveSoapSigned(_)
                | Command::AdminAddDept(_)
                | Command::AdminAddPatient(_)
                | Command::AdminAddUser(_)
                | Command::AdminDeleteChart(_)
                | Command::AdminUpdatePatient(_)
        )
    }
}

/// An event sent from the main process to the window, either as the reply to
/// a command or pushed after a navigation or state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, AsRefStr)]
#[serde(tag = "channel", content = "payload", rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UiEvent {
    LoginFailed(String),
    ReceiveMetadata(Value),
    InitPatientData(Patient),
    InitUserRole(Role),
    SaveSuccess(String),
    SaveFailed(String),
    LoadHistory(Value),
    ActionResult(String),
    AdminChartsData(Value),
}

impl UiEvent {
    pub fn channel(&self) -> &str {
        self.as_ref()
    }
}

/// Screens the window can show.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Screen {
    Login,
    /// Patient selection, the landing screen for doctors and viewers.
    Selection,
    /// Chart editor for the selected patient.
    Chart,
    Admin,
}

impl Screen {
    /// Landing screen after a successful login.
    pub fn home_for(role: Role) -> Self {
        if role.is_admin() {
            Screen::Admin
        } else {
            Screen::Selection
        }
    }
}
