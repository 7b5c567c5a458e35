//! Audit log endpoint.

use crate::api::client::ApiClient;
use crate::domain::audit::{AuditFilter, AuditLogEntry};
use crate::domain::error::Result;
use crate::domain::page::Page;

pub const HISTORY_PATH: &str = "logging/history/date-range";

/// Full query string for one audit page: paging first, then the filter.
#[must_use]
pub fn query(filter: &AuditFilter, page: u32, size: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![("page", page.to_string()), ("size", size.to_string())];
    params.extend(filter.query_params());
    params
}

/// `GET /logging/history/date-range`.
///
/// # Errors
///
/// See [`ApiClient::get`].
pub async fn history(
    client: &ApiClient,
    filter: &AuditFilter,
    page: u32,
    size: u32,
) -> Result<Page<AuditLogEntry>> {
    client.get(HISTORY_PATH, &query(filter, page, size)).await
}
