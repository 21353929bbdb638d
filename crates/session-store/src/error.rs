//! Session storage errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),
}
