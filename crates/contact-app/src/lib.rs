//! Contact App - server-rendered contact manager.
//!
//! Lists, shows, adds, edits and deletes contacts (name, phone, email):
//! - Validates submissions (unique name, Indonesian mobile number, email)
//! - Re-renders forms with every failed check listed
//! - Redirects after mutations with a one-shot flash message

pub mod api;
pub mod config;
pub mod error;
pub mod validation;
pub mod views;

pub use config::Config;
pub use error::AppError;
pub use validation::{ContactForm, ValidationErrors};
pub use views::Views;
