//! User-visible reply texts.

pub const LOGIN_FAILED: &str = "Login failed";
pub const SERVER_CONNECTION_FAILED: &str = "Server connection failed";
pub const SERVER_COMMUNICATION_ERROR: &str = "Server communication error";
pub const NO_WRITE_PERMISSION: &str = "No write permission.";
pub const SAVED: &str = "Saved.";
pub const SAVE_FAILED: &str = "Save failed";
pub const DONE: &str = "Done";
pub const DELETED: &str = "Deleted";
pub const ASSIGNMENT_UPDATED: &str = "Assignment updated";

/// `action-result` text for a failed assignment update.
pub fn update_failed(reason: &str) -> String {
    format!("Update failed: {}", reason)
}

/// `action-result` text for a failed admin request.
pub fn request_failed(reason: &str) -> String {
    format!("Request failed: {}", reason)
}
