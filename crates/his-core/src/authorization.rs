//! Role-based write gate.

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::session::{Role, Session};

/// Which commands the gate is consulted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateScope {
    /// Only chart writes are checked. Admin commands rely on the admin panel
    /// being unreachable for other roles.
    #[default]
    ChartWrites,
    /// Every mutating command is checked, admin commands included.
    AllMutations,
}

/// Returns false exactly when the session role is `Viewer`.
pub fn can_mutate(session: &Session) -> bool {
    session.role != Role::Viewer
}

/// Decides whether a command may run for the current session.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthorizationGate {
    scope: GateScope,
}

impl AuthorizationGate {
    pub fn new(scope: GateScope) -> Self {
        Self { scope }
    }

    /// Whether the gate applies to `command` under the configured scope.
    pub fn guards(&self, command: &Command) -> bool {
        match self.scope {
            GateScope::ChartWrites => matches!(command, Command::SaveSoapSigned(_)),
            GateScope::AllMutations => command.is_mutating(),
        }
    }

    /// True when `command` is outside the gate's scope or the session may write.
    pub fn permits(&self, session: &Session, command: &Command) -> bool {
        !self.guards(command) || can_mutate(session)
    }
}
