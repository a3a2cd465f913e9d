pub mod authorization;
pub mod chart;
pub mod command;
pub mod config;
pub mod error;
pub mod gateway;
mod ids;
pub mod messages;
pub mod patient;
pub mod session;
pub mod window;

// Re-export common error type
pub use error::HisError;

pub use authorization::{AuthorizationGate, GateScope};
pub use command::{Command, Credentials, Screen, UiEvent};
pub use gateway::RemoteGateway;
pub use patient::Patient;
pub use session::{Role, Session, SessionState};
pub use window::{EventSink, ScreenLoad, ViewNavigator};
