//! Client configuration model.

use serde::{Deserialize, Serialize};

use crate::authorization::GateScope;

/// Record API the client talks to when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://blockteam.kro.kr:32828/BlockTeam-Data";

/// Root of `config.toml`. Every section is optional.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiSettings,
    pub authorization: AuthorizationSettings,
    pub admin: AdminSettings,
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AuthorizationSettings {
    pub gate_scope: GateScope,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AdminSettings {
    /// Reply `action-result` when an admin call fails instead of dropping
    /// the command without a reply.
    pub error_replies: bool,
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            error_replies: true,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
