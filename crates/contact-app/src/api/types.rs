//! Form payloads and JSON responses.

use serde::{Deserialize, Serialize};

/// Body of a delete submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteForm {
    #[serde(rename = "nama", default)]
    pub name: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub contacts: usize,
    pub sessions: usize,
}
