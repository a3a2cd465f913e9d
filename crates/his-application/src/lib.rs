//! Application layer for the HIS client.
//!
//! Turns commands from the window into record API calls, session updates,
//! navigation and reply events.

pub mod dispatcher;

pub use dispatcher::{CommandDispatcher, DispatchPolicy};
