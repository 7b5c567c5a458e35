//! Authentication endpoints.

use crate::api::client::ApiClient;
use crate::domain::error::Result;
use crate::session::Identity;
use serde::{Deserialize, Serialize};

pub const LOGIN_PATH: &str = "auth/login";
pub const LOGOUT_PATH: &str = "auth/logout";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Successful login body.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: String,
    pub employee_number: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub email: String,
}

impl LoginResponse {
    /// Splits into the bearer token and the identity to keep.
    #[must_use]
    pub fn into_parts(self) -> (String, Identity) {
        (
            self.token,
            Identity {
                employee_number: self.employee_number,
                employee_name: self.employee_name,
                email: self.email,
            },
        )
    }
}

/// `POST /auth/login`. Bypasses the session-expiry policy.
///
/// # Errors
///
/// Returns [`crate::domain::ConsoleError::Rejected`] with the raw body when
/// the credentials are refused.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<LoginResponse> {
    client
        .post_anonymous(LOGIN_PATH, &LoginRequest { email, password })
        .await
}

/// `POST /auth/logout`.
///
/// # Errors
///
/// Any failure; callers are expected to ignore it.
pub async fn logout(client: &ApiClient) -> Result<()> {
    client.post_empty(LOGOUT_PATH).await
}
