//! Contact document types.

use serde::{Deserialize, Serialize};

/// A stored contact document.
///
/// Serialized with the collection's document field names so that the
/// persisted file and the rendered views share one vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Identifier assigned by the store at insert time
    #[serde(rename = "_id")]
    pub id: String,

    /// Display name, unique across the collection
    #[serde(rename = "nama")]
    pub name: String,

    /// Mobile phone number
    #[serde(rename = "nohp")]
    pub phone: String,

    pub email: String,
}

impl Contact {
    /// Create a contact with a freshly generated identifier.
    pub fn new(fields: ContactFields) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: fields.name,
            phone: fields.phone,
            email: fields.email,
        }
    }

    /// Overwrite every mutable field.
    pub fn apply(&mut self, fields: ContactFields) {
        self.name = fields.name;
        self.phone = fields.phone;
        self.email = fields.email;
    }
}

/// The mutable part of a contact, used for inserts and full overwrites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// Result of an update targeted by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
}

/// Result of a delete targeted by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}
