//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use opsconsole::api::ApiClient;
use opsconsole::session::{Identity, MemorySessionStorage, PersistedSession, SessionStore};
use std::sync::Arc;
use std::time::Duration;

pub const TOKEN: &str = "tok-123";
pub const BEARER: &str = "Bearer tok-123";

pub fn identity() -> Identity {
    Identity {
        employee_number: "E001".to_string(),
        employee_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
    }
}

/// Client against `server` holding a signed-in session backed by memory.
pub fn signed_in(server: &mockito::ServerGuard) -> (ApiClient, Arc<SessionStore>, MemorySessionStorage) {
    let storage = MemorySessionStorage::with_document(PersistedSession::new(TOKEN, identity()));
    let session = Arc::new(SessionStore::bootstrap(Box::new(storage.clone())));
    (client_for(server, &session), session, storage)
}

/// Client against `server` with no session.
pub fn anonymous(server: &mockito::ServerGuard) -> (ApiClient, Arc<SessionStore>, MemorySessionStorage) {
    let storage = MemorySessionStorage::new();
    let session = Arc::new(SessionStore::bootstrap(Box::new(storage.clone())));
    (client_for(server, &session), session, storage)
}

pub fn client_for(server: &mockito::ServerGuard, session: &Arc<SessionStore>) -> ApiClient {
    ApiClient::new(&format!("{}/api", server.url()), Duration::from_secs(5), Arc::clone(session)).unwrap()
}

pub fn list_query(page: u32, size: u32) -> mockito::Matcher {
    mockito::Matcher::AllOf(vec![
        mockito::Matcher::UrlEncoded("pageNumber".into(), page.to_string()),
        mockito::Matcher::UrlEncoded("pageSize".into(), size.to_string()),
    ])
}
