//! Persisted session document.
//!
//! The session survives restarts as a small key/value document with two fixed
//! keys, mirroring what a browser would keep in local storage:
//!
//! ```json
//! {
//!   "authToken": "eyJhbGciOi...",
//!   "user": { "employeeNumber": "E-001", "employeeName": "Ada", "email": "ada@example.com" }
//! }
//! ```
//!
//! Both keys are written together and cleared together. A document holding only
//! one of them is treated as corrupt.

use serde::{Deserialize, Serialize};

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "authToken";

/// Storage key of the signed-in identity.
pub const USER_KEY: &str = "user";

/// Who is signed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub employee_number: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub email: String,
}

/// Raw contents of the session document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    #[serde(rename = "authToken", default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

impl PersistedSession {
    /// A complete document for `token` and `identity`.
    #[must_use]
    pub fn new(token: impl Into<String>, identity: Identity) -> Self {
        Self {
            auth_token: Some(token.into()),
            user: Some(identity),
        }
    }

    /// Returns `true` when neither key is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.auth_token.is_none() && self.user.is_none()
    }

    /// Splits into `(token, identity)` when both keys are present.
    #[must_use]
    pub fn into_parts(self) -> Option<(String, Identity)> {
        match (self.auth_token, self.user) {
            (Some(token), Some(user)) if !token.is_empty() => Some((token, user)),
            _ => None,
        }
    }
}
