//! Process-wide session state.
//!
//! [`SessionStore`] owns the bearer token and signed-in identity. It is created
//! once at startup, wrapped in an [`Arc`](std::sync::Arc) and handed to the API
//! client and every screen controller. Only three paths mutate it:
//!
//! - [`SessionStore::login`]
//! - [`SessionStore::logout`]
//! - [`SessionStore::expire`], called by the HTTP layer on a 401 response
//!
//! # State machine
//!
//! ```text
//! Unauthenticated --login--> Authenticating --ok--> Authenticated
//!        ^                        |                      |
//!        +--------failure---------+                      |
//!        +-----------------logout / 401------------------+
//! ```

use crate::api::{auth, ApiClient};
use crate::domain::error::ConsoleError;
use crate::session::memory::MemorySessionStorage;
use crate::session::models::{Identity, PersistedSession};
use crate::session::storage::SessionStorage;
use std::sync::{Mutex, PoisonError, RwLock};

/// Reason shown when the backend gives none.
pub const DEFAULT_LOGIN_FAILURE: &str = "Login failed";

/// An established session.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub identity: Identity,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("identity", &self.identity)
            .finish()
    }
}

/// Lifecycle state of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated(Session),
}

/// Result of a login attempt. Failures carry a reason fit for inline display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(Identity),
    Failure { reason: String },
}

impl LoginOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Holder of the current credential and identity.
pub struct SessionStore {
    state: RwLock<SessionState>,
    storage: Mutex<Box<dyn SessionStorage>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.read_state())
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Restores the session from `storage`.
    ///
    /// Runs synchronously so the first routing decision already sees the
    /// restored session. An unreadable, corrupt or half-present document is
    /// cleared and the store starts `Unauthenticated`.
    #[must_use]
    pub fn bootstrap(mut storage: Box<dyn SessionStorage>) -> Self {
        let _span = tracing::debug_span!("session_bootstrap").entered();

        let state = match storage.load() {
            Ok(persisted) if persisted.is_empty() => {
                tracing::debug!("no persisted session");
                SessionState::Unauthenticated
            }
            Ok(persisted) => match persisted.into_parts() {
                Some((token, identity)) => {
                    tracing::info!(employee = %identity.employee_number, "session restored");
                    SessionState::Authenticated(Session { token, identity })
                }
                None => {
                    tracing::warn!("persisted session is incomplete, discarding");
                    Self::discard(storage.as_mut());
                    SessionState::Unauthenticated
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "persisted session unreadable, discarding");
                Self::discard(storage.as_mut());
                SessionState::Unauthenticated
            }
        };

        Self {
            state: RwLock::new(state),
            storage: Mutex::new(storage),
        }
    }

    /// A store backed by fresh in-memory storage.
    #[must_use]
    pub fn ephemeral() -> Self {
        Self::bootstrap(Box::new(MemorySessionStorage::new()))
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.read_state().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(*self.read_state(), SessionState::Authenticated(_))
    }

    /// Bearer token of the current session, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        match &*self.read_state() {
            SessionState::Authenticated(session) => Some(session.token.clone()),
            _ => None,
        }
    }

    /// Identity of the signed-in user, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match &*self.read_state() {
            SessionState::Authenticated(session) => Some(session.identity.clone()),
            _ => None,
        }
    }

    /// Signs in with `email` and `password`.
    ///
    /// Never returns an error: every failure becomes [`LoginOutcome::Failure`]
    /// with the backend's `message` when it sent one, otherwise
    /// [`DEFAULT_LOGIN_FAILURE`]. Nothing is persisted unless the login succeeds,
    /// and a failed attempt ends any session it was replacing, on disk as well.
    #[tracing::instrument(name = "session_login", level = "debug", skip_all, fields(email = %email))]
    pub async fn login(&self, client: &ApiClient, email: &str, password: &str) -> LoginOutcome {
        let previous = std::mem::replace(&mut *self.write_state(), SessionState::Authenticating);
        let replacing = matches!(previous, SessionState::Authenticated(_));
        if let SessionState::Authenticated(session) = previous {
            tracing::debug!(employee = %session.identity.employee_number, "replacing existing session");
        }

        let response = match auth::login(client, email, password).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "login rejected");
                return self.fail_login(replacing, failure_reason(&e));
            }
        };

        let (token, identity) = response.into_parts();
        if token.is_empty() {
            tracing::warn!("login response carried no token");
            return self.fail_login(replacing, DEFAULT_LOGIN_FAILURE.to_string());
        }

        let persisted = PersistedSession::new(token.clone(), identity.clone());
        if let Err(e) = self.lock_storage().save(&persisted) {
            // The session still works for this process; it just will not survive a restart.
            tracing::warn!(error = %e, "failed to persist session");
        }

        *self.write_state() = SessionState::Authenticated(Session {
            token,
            identity: identity.clone(),
        });
        tracing::info!(employee = %identity.employee_number, "logged in");
        LoginOutcome::Success(identity)
    }

    /// Signs out.
    ///
    /// The backend is told on a best-effort basis; any failure there is logged
    /// and swallowed. Local state is cleared unconditionally.
    #[tracing::instrument(name = "session_logout", level = "debug", skip_all)]
    pub async fn logout(&self, client: &ApiClient) {
        if self.is_authenticated() {
            if let Err(e) = auth::logout(client).await {
                tracing::debug!(error = %e, "logout notification failed, ignoring");
            }
        }

        *self.write_state() = SessionState::Unauthenticated;
        Self::discard(&mut **self.lock_storage());
        tracing::info!("logged out");
    }

    /// Drops the session after the backend rejected its token.
    ///
    /// Only the first call for a given session clears anything; later calls
    /// (from other in-flight requests failing the same way) return `false`.
    pub fn expire(&self) -> bool {
        {
            let mut state = self.write_state();
            if !matches!(*state, SessionState::Authenticated(_)) {
                return false;
            }
            *state = SessionState::Unauthenticated;
        }

        Self::discard(&mut **self.lock_storage());
        tracing::warn!("session expired, login required");
        true
    }

    fn fail_login(&self, replacing: bool, reason: String) -> LoginOutcome {
        *self.write_state() = SessionState::Unauthenticated;
        if replacing {
            Self::discard(&mut **self.lock_storage());
        }
        LoginOutcome::Failure { reason }
    }

    fn discard(storage: &mut dyn SessionStorage) {
        if let Err(e) = storage.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_storage(&self) -> std::sync::MutexGuard<'_, Box<dyn SessionStorage>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Human-readable reason for a failed login.
fn failure_reason(error: &ConsoleError) -> String {
    let body = match error {
        ConsoleError::Rejected { body, .. } | ConsoleError::Server { body, .. } => body,
        _ => return DEFAULT_LOGIN_FAILURE.to_string(),
    };

    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOGIN_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            employee_number: "E-001".into(),
            employee_name: "Ada".into(),
            email: "ada@example.com".into(),
        }
    }

    #[test]
    fn bootstrap_restores_complete_session() {
        let storage = MemorySessionStorage::with_document(PersistedSession::new("tok", identity()));
        let store = SessionStore::bootstrap(Box::new(storage.clone()));
        assert_eq!(store.token().as_deref(), Some("tok"));
        assert_eq!(store.identity(), Some(identity()));
        assert_eq!(storage.clear_count(), 0);
    }

    #[test]
    fn bootstrap_discards_half_session() {
        let storage = MemorySessionStorage::with_document(PersistedSession {
            auth_token: Some("tok".into()),
            user: None,
        });
        let store = SessionStore::bootstrap(Box::new(storage.clone()));
        assert_eq!(store.state(), SessionState::Unauthenticated);
        assert!(storage.snapshot().is_empty());
        assert_eq!(storage.clear_count(), 1);
    }

    #[test]
    fn expire_clears_once() {
        let storage = MemorySessionStorage::with_document(PersistedSession::new("tok", identity()));
        let store = SessionStore::bootstrap(Box::new(storage.clone()));
        assert!(store.expire());
        assert!(!store.expire());
        assert_eq!(storage.clear_count(), 1);
        assert!(store.token().is_none());
    }

    #[test]
    fn failure_reason_prefers_backend_message() {
        let rejected = ConsoleError::Rejected {
            status: 401,
            body: r#"{"message":"Bad credentials"}"#.into(),
        };
        assert_eq!(failure_reason(&rejected), "Bad credentials");

        let plain = ConsoleError::Rejected { status: 401, body: "nope".into() };
        assert_eq!(failure_reason(&plain), DEFAULT_LOGIN_FAILURE);
        assert_eq!(failure_reason(&ConsoleError::Unauthorized), DEFAULT_LOGIN_FAILURE);
    }

    #[test]
    fn session_debug_hides_token() {
        let session = Session { token: "secret".into(), identity: identity() };
        assert!(!format!("{session:?}").contains("secret"));
    }
}
