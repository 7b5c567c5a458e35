//! Session storage abstraction.
//!
//! The [`SessionStorage`] trait hides where the persisted session lives. The
//! session store only ever needs three things from it: read the document at
//! startup, write it after a successful login, wipe it on logout or expiry.

use crate::domain::error::Result;
use crate::session::models::PersistedSession;

/// Backend holding the persisted session document.
///
/// # Implementations
///
/// - [`crate::session::JsonSessionStorage`]: JSON file with atomic writes (default)
/// - [`crate::session::MemorySessionStorage`]: process-local, for tests and `--ephemeral`
///
/// # Examples
///
/// ```no_run
/// use opsconsole::session::{JsonSessionStorage, SessionStorage};
/// use std::path::PathBuf;
///
/// let storage = JsonSessionStorage::new(PathBuf::from("/tmp/opsconsole/session.json"))?;
/// let persisted = storage.load()?;
/// println!("signed in: {}", persisted.auth_token.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait SessionStorage: Send {
    /// Reads the persisted document.
    ///
    /// A missing document is not an error; it loads as
    /// [`PersistedSession::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the document exists but cannot be read or parsed.
    fn load(&self) -> Result<PersistedSession>;

    /// Replaces the persisted document.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, session: &PersistedSession) -> Result<()>;

    /// Removes both keys.
    ///
    /// Clearing an already empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    fn clear(&mut self) -> Result<()>;
}
