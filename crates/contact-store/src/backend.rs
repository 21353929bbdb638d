//! Persistence backends for the contact collection.

use crate::error::{StoreError, StoreResult};
use crate::types::Contact;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, warn};

/// Where the collection lives between restarts.
#[derive(Debug, Clone)]
pub enum Backend {
    /// In-memory only (no persistence)
    Memory,
    /// JSON document file, rewritten after every mutation
    File(PathBuf),
}

impl Backend {
    /// File-backed persistence at the given path.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Backend::File(path.into())
    }

    /// Load the collection.
    ///
    /// Returns an empty collection if the file doesn't exist.
    pub async fn load(&self) -> StoreResult<Vec<Contact>> {
        match self {
            Backend::Memory => {
                debug!("Memory backend: starting with empty collection");
                Ok(Vec::new())
            }
            Backend::File(path) => {
                if !path.exists() {
                    info!(
                        "Contact file not found at {:?}, starting with empty collection",
                        path
                    );
                    return Ok(Vec::new());
                }

                let data = fs::read(path).await?;
                if data.is_empty() {
                    warn!("Contact file {:?} is empty, starting with empty collection", path);
                    return Ok(Vec::new());
                }

                let contacts: Vec<Contact> = serde_json::from_slice(&data)?;
                info!("Loaded {} contacts from {:?}", contacts.len(), path);
                Ok(contacts)
            }
        }
    }

    /// Save the whole collection.
    pub async fn save(&self, contacts: &[Contact]) -> StoreResult<()> {
        match self {
            Backend::Memory => Ok(()),
            Backend::File(path) => {
                let data = serde_json::to_vec_pretty(contacts)?;

                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent).await?;
                    }
                }

                // Write atomically using temp file + rename
                let temp_path = path.with_extension("tmp");
                fs::write(&temp_path, &data).await?;
                fs::rename(&temp_path, path).await?;

                debug!("Saved {} contacts ({} bytes) to {:?}", contacts.len(), data.len(), path);
                Ok(())
            }
        }
    }

    /// Check that the backend can still be written.
    ///
    /// A file that doesn't exist yet is healthy; it is created on first save.
    pub async fn health_check(&self) -> StoreResult<()> {
        let Backend::File(path) = self else {
            return Ok(());
        };

        match fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => Err(StoreError::Unavailable(format!(
                "{} is a directory",
                path.display()
            ))),
            Ok(meta) if meta.permissions().readonly() => Err(StoreError::Unavailable(format!(
                "{} is read-only",
                path.display()
            ))),
            Ok(_) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Unavailable(format!("{}: {}", path.display(), e))),
        }
    }
}
