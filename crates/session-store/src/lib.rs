//! In-memory session storage for flash messages.
//!
//! Each session owns a set of named slots holding pending messages. A message
//! is set by one request and consumed by the next one that reads the slot.
//! Sessions expire after a fixed TTL of inactivity.

mod error;
mod store;

pub use error::SessionError;
pub use store::SessionStore;

/// Longest session id accepted from a client.
const MAX_SESSION_ID_LEN: usize = 128;

/// Generate a new opaque session identifier.
pub fn new_session_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Whether a client-supplied session id has an acceptable shape.
pub fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id.len() <= MAX_SESSION_ID_LEN
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
