//! HTTP client shared by every resource.
//!
//! [`ApiClient`] is the only place that talks to the backend. It attaches the
//! bearer token from the [`SessionStore`], parses response bodies into typed
//! schemas, and applies the global 401 policy: any 401 on an authenticated call
//! expires the session before the error reaches the caller.

use crate::domain::error::{ConsoleError, Result};
use crate::session::SessionStore;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Query string parameters as `(name, value)` pairs.
pub type Query = [(&'static str, String)];

/// Typed HTTP access to the backend's `/api` root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Creates a client for `base_url` (for example `http://localhost:8080/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Transport`] if the underlying HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, timeout: Duration, session: Arc<SessionStore>) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session store this client reads tokens from and expires on 401.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Result<String> {
        self.session
            .token()
            .map(|t| format!("Bearer {t}"))
            .ok_or(ConsoleError::NotAuthenticated)
    }

    /// `GET path?query`, parsing the body as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::NotAuthenticated`] without sending anything when
    /// no session is held, [`ConsoleError::Unauthorized`] on 401,
    /// [`ConsoleError::InvalidResponse`] when the body does not match `T`, and
    /// the other status and transport variants as they occur.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send_authenticated("GET", path, request).await?;
        parse_body(response).await
    }

    /// `POST path` with a JSON body. The response body is discarded.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::get`], minus body parsing.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.http.post(self.url(path)).json(body);
        self.send_authenticated("POST", path, request).await.map(drop)
    }

    /// `POST path` without a body. The response body is discarded.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::post`].
    pub async fn post_empty(&self, path: &str) -> Result<()> {
        let request = self.http.post(self.url(path));
        self.send_authenticated("POST", path, request).await.map(drop)
    }

    /// `PUT path` with a JSON body. The response body is discarded.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::post`].
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.http.put(self.url(path)).json(body);
        self.send_authenticated("PUT", path, request).await.map(drop)
    }

    /// `DELETE path`. The response body is discarded.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::post`].
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.http.delete(self.url(path));
        self.send_authenticated("DELETE", path, request).await.map(drop)
    }

    /// `POST path` without a token and without the 401 policy.
    ///
    /// Used for login, where a 401 means "wrong credentials", not "session
    /// expired".
    pub(crate) async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(method = "POST", path = %path, "sending anonymous request");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        let response = check_status(response).await?;
        parse_body(response).await
    }

    async fn send_authenticated(
        &self,
        method: &'static str,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response> {
        let auth = match self.auth_header() {
            Ok(auth) => auth,
            Err(e) => {
                tracing::debug!(method, path = %path, "no session, request not sent");
                return Err(e);
            }
        };

        let started = std::time::Instant::now();
        let response = request
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(method, path = %path, error = %e, "transport failure");
                ConsoleError::Transport(e)
            })?;

        let status = response.status();
        tracing::debug!(
            method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "response received"
        );

        if status == StatusCode::UNAUTHORIZED {
            if self.session.expire() {
                tracing::warn!(method, path = %path, "401 from backend, session cleared");
            }
            return Err(ConsoleError::Unauthorized);
        }

        check_status(response).await
    }
}

/// Maps non-success statuses onto [`ConsoleError`].
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    if status.is_client_error() {
        Err(ConsoleError::Rejected { status: code, body })
    } else if status.is_server_error() {
        Err(ConsoleError::Server { status: code, body })
    } else {
        Err(ConsoleError::InvalidResponse(format!("unexpected status {code}")))
    }
}

async fn parse_body<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ConsoleError::InvalidResponse(e.to_string()))
}
