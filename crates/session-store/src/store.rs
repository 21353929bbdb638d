//! In-memory session store with TTL expiration.

use crate::error::SessionError;
use crate::is_valid_session_id;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Entry in the session store with expiration tracking.
struct SessionEntry {
    slots: HashMap<String, Vec<String>>,
    expires_at: Instant,
}

/// In-memory session store with automatic TTL expiration.
///
/// Sessions are created lazily by the first flash written to them and are
/// cleaned up after the configured TTL passes without activity.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Create a new in-memory session store.
    ///
    /// Spawns a background task to periodically clean up expired sessions,
    /// so this must be called from within a Tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        let store = Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        let cleanup_store = store.clone();
        tokio::spawn(async move {
            cleanup_store.cleanup_loop().await;
        });

        info!("In-memory session store initialized (ttl={:?})", ttl);

        store
    }

    /// Session time to live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Background task that periodically removes expired sessions.
    async fn cleanup_loop(&self) {
        let cleanup_interval = Duration::from_secs(60);

        loop {
            tokio::time::sleep(cleanup_interval).await;
            let removed = self.purge_expired().await;
            if removed > 0 {
                debug!("Cleaned up {} expired sessions", removed);
            }
        }
    }

    /// Drop every expired session, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before_count = sessions.len();

        sessions.retain(|_, entry| entry.expires_at > now);

        before_count - sessions.len()
    }

    fn check_id(session_id: &str) -> Result<(), SessionError> {
        if is_valid_session_id(session_id) {
            Ok(())
        } else {
            Err(SessionError::InvalidSessionId(session_id.to_string()))
        }
    }

    /// Queue a flash message under `key` for the session.
    #[instrument(skip(self, message))]
    pub async fn flash(
        &self,
        session_id: &str,
        key: &str,
        message: &str,
    ) -> Result<(), SessionError> {
        Self::check_id(session_id)?;

        let mut sessions = self.sessions.write().await;
        let now = Instant::now();
        let expires_at = now + self.ttl;

        let entry = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry {
                slots: HashMap::new(),
                expires_at,
            });

        // Expired but not yet purged: start over
        if entry.expires_at <= now {
            entry.slots.clear();
        }
        entry.expires_at = expires_at;

        let slot = entry.slots.entry(key.to_string()).or_default();
        slot.push(message.to_string());

        debug!("Queued flash message (pending: {})", slot.len());
        Ok(())
    }

    /// Take every pending flash message under `key`, clearing the slot.
    #[instrument(skip(self))]
    pub async fn take_flash(
        &self,
        session_id: &str,
        key: &str,
    ) -> Result<Vec<String>, SessionError> {
        Self::check_id(session_id)?;

        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        let Some(entry) = sessions.get_mut(session_id) else {
            return Ok(Vec::new());
        };

        if entry.expires_at <= now {
            sessions.remove(session_id);
            return Ok(Vec::new());
        }

        entry.expires_at = now + self.ttl;
        Ok(entry.slots.remove(key).unwrap_or_default())
    }

    /// Forget a session and everything queued in it.
    #[instrument(skip(self))]
    pub async fn clear(&self, session_id: &str) -> Result<bool, SessionError> {
        Self::check_id(session_id)?;

        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(session_id).is_some();

        if removed {
            debug!("Cleared session");
        }

        Ok(removed)
    }

    /// Get total number of live sessions.
    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        let now = Instant::now();
        sessions
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }
}
