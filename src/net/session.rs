//! Session token accessor.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bearer token is the only credential the client holds and the only
//! state shared across stores. Every read and write goes through
//! [`SessionToken`] so the direct and tracked request paths can never drift.
//! Reads hit storage on each call; a token written mid-session is picked up
//! by the next request. Storage backends block, so the request path reads
//! through [`SessionToken::load`], which moves the read onto tokio's blocking
//! pool.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use super::error::ClientError;
use crate::util::storage::{KeyValueStorage, MemoryStorage};

/// Well-known storage key for the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Shared handle to the persisted session token.
#[derive(Clone)]
pub struct SessionToken {
    storage: Arc<dyn KeyValueStorage>,
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken").finish_non_exhaustive()
    }
}

impl SessionToken {
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Token held only in memory, starting empty.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Current token, or the empty string when none is stored or storage
    /// cannot be read.
    #[must_use]
    pub fn get(&self) -> String {
        match self.storage.get(TOKEN_STORAGE_KEY) {
            Ok(token) => token.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "session token read failed; sending empty token");
                String::new()
            }
        }
    }

    /// [`Self::get`] for async callers. The storage read runs on the blocking
    /// pool so a slow disk never stalls the runtime's worker threads.
    pub async fn load(&self) -> String {
        let session = self.clone();
        match tokio::task::spawn_blocking(move || session.get()).await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "session token read task failed; sending empty token");
                String::new()
            }
        }
    }

    /// Replace the stored token. An empty string clears it.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage backend cannot be written.
    pub fn set(&self, token: &str) -> Result<(), ClientError> {
        if token.is_empty() {
            return self.clear();
        }
        self.storage.set(TOKEN_STORAGE_KEY, token)
    }

    /// Remove the stored token.
    ///
    /// # Errors
    ///
    /// Returns an error when the storage backend cannot be written.
    pub fn clear(&self) -> Result<(), ClientError> {
        self.storage.remove(TOKEN_STORAGE_KEY)
    }

    /// `true` when a non-empty token is stored.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.get().is_empty()
    }
}
