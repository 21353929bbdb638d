//! Contact document storage.
//!
//! A single collection of contact records exposed through the
//! [`ContactStore`] trait. The bundled [`DocumentStore`] keeps the collection
//! in memory, enforces a unique index on the contact name and can persist
//! every mutation to a JSON document file.

mod backend;
mod error;
mod store;
mod types;

pub use backend::Backend;
pub use error::{StoreError, StoreResult};
pub use store::{ContactStore, DocumentStore};
pub use types::*;
