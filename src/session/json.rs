//! JSON file session storage.
//!
//! The document is rewritten whole on every save using write-to-temp + rename,
//! so a crash mid-write leaves either the old session or the new one on disk,
//! never a truncated file.

use crate::domain::error::{ConsoleError, Result};
use crate::session::models::PersistedSession;
use crate::session::storage::SessionStorage;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File name of the session document inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Session document kept in a JSON file.
///
/// # File Format
///
/// ```json
/// {
///   "authToken": "eyJhbGciOi...",
///   "user": {
///     "employeeNumber": "E-001",
///     "employeeName": "Ada",
///     "email": "ada@example.com"
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonSessionStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,
}

impl JsonSessionStorage {
    /// Opens session storage at `file_path`.
    ///
    /// The file itself is not touched until the first save. Parent directories
    /// are created eagerly.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing session storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    /// Opens `session.json` inside `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn in_dir(data_dir: &Path) -> Result<Self> {
        Self::new(data_dir.join(SESSION_FILE_NAME))
    }

    /// Location of the session document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl SessionStorage for JsonSessionStorage {
    fn load(&self) -> Result<PersistedSession> {
        let _span = tracing::debug_span!("session_file_load", path = ?self.file_path).entered();

        let contents = match std::fs::read_to_string(&self.file_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("no persisted session");
                return Ok(PersistedSession::default());
            }
            Err(e) => return Err(e.into()),
        };

        let session: PersistedSession = serde_json::from_str(&contents)
            .map_err(|e| ConsoleError::Storage(format!("failed to parse session file: {e}")))?;

        tracing::debug!(
            has_token = session.auth_token.is_some(),
            has_user = session.user.is_some(),
            "loaded persisted session"
        );
        Ok(session)
    }

    fn save(&mut self, session: &PersistedSession) -> Result<()> {
        let _span = tracing::debug_span!("session_file_save", path = ?self.file_path).entered();

        let json = serde_json::to_string_pretty(session)
            .map_err(|e| ConsoleError::Storage(format!("failed to serialize session: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("session saved");
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("session_file_clear", path = ?self.file_path).entered();

        match std::fs::remove_file(&self.file_path) {
            Ok(()) => {
                tracing::debug!("session file removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::models::{Identity, TOKEN_KEY, USER_KEY};

    fn identity() -> Identity {
        Identity {
            employee_number: "E-001".into(),
            employee_name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonSessionStorage::in_dir(dir.path()).unwrap();
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn save_writes_both_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonSessionStorage::in_dir(dir.path()).unwrap();
        storage.save(&PersistedSession::new("tok", identity())).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(storage.path()).unwrap()).unwrap();
        assert_eq!(raw[TOKEN_KEY], "tok");
        assert_eq!(raw[USER_KEY]["employeeNumber"], "E-001");
        assert!(!storage.path().with_extension("tmp").exists());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.into_parts(), Some(("tok".to_string(), identity())));
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = JsonSessionStorage::in_dir(dir.path()).unwrap();
        storage.save(&PersistedSession::new("tok", identity())).unwrap();
        storage.clear().unwrap();
        storage.clear().unwrap();
        assert!(!storage.path().exists());
    }

    #[test]
    fn garbage_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonSessionStorage::in_dir(dir.path()).unwrap();
        std::fs::write(storage.path(), "{not json").unwrap();
        assert!(matches!(storage.load(), Err(ConsoleError::Storage(_))));
    }
}
