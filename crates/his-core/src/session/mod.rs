//! Session domain module.
//!
//! Holds who is logged in, with which role, and which patient is open.
//!
//! # Module Structure
//!
//! - `model`: `Role`, `Identity` and the `Session` value
//! - `state`: `SessionState`, the shared handle the dispatcher owns

mod model;
mod state;

pub use model::{Identity, Role, Session};
pub use state::SessionState;
