//! In-process session storage.
//!
//! Nothing touches disk. Clones share the same document, so a test can keep a
//! handle and inspect what the session store wrote or cleared.

use crate::domain::error::Result;
use crate::session::models::PersistedSession;
use crate::session::storage::SessionStorage;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    document: PersistedSession,
    saves: usize,
    clears: usize,
}

/// Session storage living only in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySessionStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `document`, as if written by an earlier run.
    #[must_use]
    pub fn with_document(document: PersistedSession) -> Self {
        let storage = Self::default();
        storage.lock().document = document;
        storage
    }

    /// Current document.
    #[must_use]
    pub fn snapshot(&self) -> PersistedSession {
        self.lock().document.clone()
    }

    /// Number of saves performed.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Number of clears performed.
    #[must_use]
    pub fn clear_count(&self) -> usize {
        self.lock().clears
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<PersistedSession> {
        Ok(self.snapshot())
    }

    fn save(&mut self, session: &PersistedSession) -> Result<()> {
        let mut inner = self.lock();
        inner.document = session.clone();
        inner.saves += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let mut inner = self.lock();
        inner.document = PersistedSession::default();
        inner.clears += 1;
        Ok(())
    }
}
