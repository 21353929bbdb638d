//! Error types for the contact app.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use contact_store::StoreError;
use session_store::SessionError;
use thiserror::Error;
use tracing::error;

/// Failures that abort a request.
///
/// Validation failures are not errors here: they re-render the originating
/// form. Everything in this enum ends the request with an error page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Storage(StoreError::Unavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE")
            }
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
            AppError::Session(_) => (StatusCode::BAD_REQUEST, "SESSION_ERROR"),
            AppError::Template(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TEMPLATE_ERROR"),
        };

        error!(%status, code, "Request failed: {}", self);

        let body = Html(format!(
            "<!DOCTYPE html><html><head><title>{status}</title></head>\
             <body><h1>{}</h1><p>{code}</p></body></html>",
            status.as_u16(),
        ));

        (status, body).into_response()
    }
}
