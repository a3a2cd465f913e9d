//! Error types for the HIS client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the HIS client core.
///
/// Every remote-call failure (network errors, non-success HTTP statuses,
/// undecodable bodies) is a transport error. A server that answers
/// `{"success": false}` is not an error at this level.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum HisError {
    /// The request never produced a usable response
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The session role is not allowed to run a mutating command
    #[error("Permission denied: role '{role}' cannot run '{command}'")]
    PermissionDenied { role: String, command: String },

    /// No command is registered on the channel
    #[error("Unknown command channel '{channel}'")]
    UnknownCommand { channel: String },

    /// The channel is known but its payload does not decode
    #[error("Invalid payload for '{channel}': {message}")]
    InvalidPayload { channel: String, message: String },
}

impl HisError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an UnknownCommand error
    pub fn unknown_command(channel: impl Into<String>) -> Self {
        Self::UnknownCommand {
            channel: channel.into(),
        }
    }

    /// Creates an InvalidPayload error
    pub fn invalid_payload(channel: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPayload {
            channel: channel.into(),
            message: message.into(),
        }
    }

    /// Creates a PermissionDenied error
    pub fn permission_denied(role: impl Into<String>, command: impl Into<String>) -> Self {
        Self::PermissionDenied {
            role: role.into(),
            command: command.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is an UnknownCommand error
    pub fn is_unknown_command(&self) -> bool {
        matches!(self, Self::UnknownCommand { .. })
    }

    /// Check if this is a PermissionDenied error
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HisError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Every reqwest failure (connect, status, body decode) is a transport failure.
impl From<reqwest::Error> for HisError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HisError>`.
pub type Result<T> = std::result::Result<T, HisError>;
