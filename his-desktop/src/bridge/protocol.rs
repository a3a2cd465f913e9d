//! Line-delimited JSON messages exchanged with the UI process.

use his_core::command::{Screen, UiEvent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message from the UI process.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Inbound {
    /// A command on its IPC channel.
    Command {
        command: String,
        #[serde(default)]
        payload: Value,
    },
    /// The window finished loading `screen`.
    ScreenLoaded { screen: Screen },
}

/// A message to the UI process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Outbound {
    Event(UiEvent),
    Navigate { screen: Screen },
}

impl Outbound {
    /// Serializes the message as one line, newline included.
    pub fn to_line(&self) -> serde_json::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}
