//! The contact collection contract and its document store implementation.

use crate::backend::Backend;
use crate::error::{StoreError, StoreResult};
use crate::types::*;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// A single collection of contact records.
///
/// Every operation may suspend while waiting on the underlying store and may
/// fail with [`StoreError::Unavailable`]. Writes that would give two records
/// the same name fail with [`StoreError::DuplicateName`].
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// All contacts in the store's natural order.
    async fn list(&self) -> StoreResult<Vec<Contact>>;

    /// The contact with exactly this name, if any.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>>;

    /// Insert a new contact and return it with its assigned id.
    async fn insert(&self, fields: ContactFields) -> StoreResult<Contact>;

    /// Overwrite name, phone and email of the contact with this id.
    async fn update_by_id(&self, id: &str, fields: ContactFields) -> StoreResult<UpdateOutcome>;

    /// Remove the first contact with this name.
    async fn delete_by_name(&self, name: &str) -> StoreResult<DeleteOutcome>;

    /// Number of stored contacts.
    async fn count(&self) -> StoreResult<usize>;

    /// Check whether the store can serve requests.
    async fn health_check(&self) -> StoreResult<()>;
}

/// Contact collection held in memory and mirrored to a [`Backend`].
///
/// The name uniqueness check and the write it guards run under the same
/// write lock, so concurrent submissions cannot both claim one name.
pub struct DocumentStore {
    contacts: RwLock<Vec<Contact>>,
    backend: Backend,
}

impl DocumentStore {
    /// Open the collection, loading whatever the backend already holds.
    pub async fn open(backend: Backend) -> StoreResult<Self> {
        let contacts = backend.load().await?;
        info!("Contact store opened with {} records", contacts.len());

        Ok(Self {
            contacts: RwLock::new(contacts),
            backend,
        })
    }

    /// Empty, non-persistent collection.
    pub fn memory() -> Self {
        Self {
            contacts: RwLock::new(Vec::new()),
            backend: Backend::Memory,
        }
    }

    fn name_taken(contacts: &[Contact], name: &str, except_id: Option<&str>) -> bool {
        contacts
            .iter()
            .any(|c| c.name == name && Some(c.id.as_str()) != except_id)
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ContactStore for DocumentStore {
    async fn list(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.contacts.read().await.clone())
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.name == name).cloned())
    }

    #[instrument(skip(self, fields), fields(name = %fields.name))]
    async fn insert(&self, fields: ContactFields) -> StoreResult<Contact> {
        let mut contacts = self.contacts.write().await;

        if Self::name_taken(&contacts, &fields.name, None) {
            return Err(StoreError::DuplicateName(fields.name));
        }

        let contact = Contact::new(fields);
        let mut next = contacts.clone();
        next.push(contact.clone());

        self.backend.save(&next).await?;
        *contacts = next;

        debug!(id = %contact.id, "Inserted contact (total: {})", contacts.len());
        Ok(contact)
    }

    #[instrument(skip(self, fields), fields(name = %fields.name))]
    async fn update_by_id(&self, id: &str, fields: ContactFields) -> StoreResult<UpdateOutcome> {
        let mut contacts = self.contacts.write().await;

        let Some(index) = contacts.iter().position(|c| c.id == id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        if Self::name_taken(&contacts, &fields.name, Some(id)) {
            return Err(StoreError::DuplicateName(fields.name));
        }

        let mut next = contacts.clone();
        next[index].apply(fields);

        self.backend.save(&next).await?;
        *contacts = next;

        debug!("Updated contact");
        Ok(UpdateOutcome::Updated)
    }

    #[instrument(skip(self))]
    async fn delete_by_name(&self, name: &str) -> StoreResult<DeleteOutcome> {
        let mut contacts = self.contacts.write().await;

        let Some(index) = contacts.iter().position(|c| c.name == name) else {
            return Ok(DeleteOutcome::NotFound);
        };

        let mut next = contacts.clone();
        next.remove(index);

        self.backend.save(&next).await?;
        *contacts = next;

        debug!("Deleted contact (remaining: {})", contacts.len());
        Ok(DeleteOutcome::Deleted)
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.contacts.read().await.len())
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.backend.health_check().await
    }
}
