//! API audit log screen.
//!
//! Filter editing and fetching are decoupled. Edits land in a pending
//! [`AuditFilter`]; only [`AuditLogController::apply_filters`] copies it into
//! the applied filter, returns to the first page and fetches. Paging always
//! uses the applied filter, never half-edited criteria.

use crate::api::{audit, ApiClient};
use crate::app::generation::{FetchTicket, Generation};
use crate::domain::audit::{AuditFilter, AuditLogEntry, HttpMethod};
use crate::domain::error::Result;
use crate::domain::page::{page_count, Page};
use chrono::NaiveDateTime;

/// Banner shown when a fetch fails.
pub const FETCH_ERROR: &str = "Failed to fetch API logs";

/// Screen heading.
pub const TITLE: &str = "API Logging Dashboard";

/// State and operations of the audit log screen.
#[derive(Debug)]
pub struct AuditLogController {
    client: ApiClient,
    /// Criteria being edited, not yet sent.
    pending: AuditFilter,
    /// Criteria used by every fetch.
    applied: AuditFilter,
    entries: Vec<AuditLogEntry>,
    total_count: u64,
    page: u32,
    page_size: u32,
    is_loading: bool,
    error_message: Option<String>,
    generation: Generation,
}

impl AuditLogController {
    /// Creates the screen with the default last-week window ending at `now`.
    #[must_use]
    pub fn new(client: ApiClient, page_size: u32, now: NaiveDateTime) -> Self {
        let filter = AuditFilter::last_week(now);
        Self {
            client,
            pending: filter.clone(),
            applied: filter,
            entries: Vec::new(),
            total_count: 0,
            page: 0,
            page_size: page_size.max(1),
            is_loading: false,
            error_message: None,
            generation: Generation::default(),
        }
    }

    #[must_use]
    pub fn entries(&self) -> &[AuditLogEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub const fn page_count(&self) -> u64 {
        page_count(self.total_count, self.page_size)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Criteria being edited.
    #[must_use]
    pub const fn pending_filter(&self) -> &AuditFilter {
        &self.pending
    }

    /// Criteria the rows on screen were fetched with.
    #[must_use]
    pub const fn applied_filter(&self) -> &AuditFilter {
        &self.applied
    }

    // Filter edits. None of these fetch.

    pub fn set_start(&mut self, start: NaiveDateTime) {
        self.pending.start = start;
    }

    pub fn set_end(&mut self, end: NaiveDateTime) {
        self.pending.end = end;
    }

    pub fn set_user_identifier(&mut self, user: impl Into<String>) {
        self.pending.user_identifier = user.into();
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) {
        self.pending.endpoint = endpoint.into();
    }

    pub fn set_method(&mut self, method: Option<HttpMethod>) {
        self.pending.method = method;
    }

    pub fn set_status(&mut self, status: Option<u16>) {
        self.pending.status = status;
    }

    /// Query string the next fetch of `page` will send.
    #[must_use]
    pub fn query_for(&self, page: u32) -> Vec<(&'static str, String)> {
        audit::query(&self.applied, page, self.page_size)
    }

    /// Commits the pending filter, returns to the first page and fetches.
    pub async fn apply_filters(&mut self) {
        self.apply_filters_at(0).await;
    }

    /// Commits the pending filter and fetches `page` of the result in one request.
    pub async fn apply_filters_at(&mut self, page: u32) {
        tracing::debug!(filter = ?self.pending, page, "applying audit filters");
        self.applied = self.pending.clone();
        self.page = page;
        self.refresh().await;
    }

    /// Goes to `page` with the applied filter.
    pub async fn set_page(&mut self, page: u32) {
        self.page = page;
        self.refresh().await;
    }

    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.is_loading = true;
        self.generation.issue()
    }

    /// Applies a fetch outcome if `ticket` is still current.
    pub fn complete_refresh(&mut self, ticket: FetchTicket, outcome: Result<Page<AuditLogEntry>>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(ticket = ticket.value(), "discarding stale audit response");
            return false;
        }

        match outcome {
            Ok(page) => {
                tracing::debug!(rows = page.data.len(), total = page.total_elements, "audit log refreshed");
                self.entries = page.data;
                self.total_count = page.total_elements;
            }
            Err(e) => {
                tracing::warn!(error = %e, "audit log fetch failed");
                self.error_message = Some(FETCH_ERROR.to_string());
            }
        }

        self.is_loading = false;
        true
    }

    /// Fetches the current page with the applied filter.
    #[tracing::instrument(name = "audit_refresh", level = "debug", skip(self), fields(page = self.page))]
    pub async fn refresh(&mut self) {
        let ticket = self.begin_refresh();
        let outcome = audit::history(&self.client, &self.applied, self.page, self.page_size).await;
        self.complete_refresh(ticket, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audit::parse_bound;
    use crate::session::SessionStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn controller() -> AuditLogController {
        let session = Arc::new(SessionStore::ephemeral());
        let client = ApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(1), session).unwrap();
        AuditLogController::new(client, 20, parse_bound("2024-03-15T12:00:00").unwrap())
    }

    #[test]
    fn pending_edits_do_not_touch_applied_filter() {
        let mut screen = controller();
        screen.set_method(Some(HttpMethod::Post));
        screen.set_user_identifier("ada@example.com");
        assert!(screen.applied_filter().method.is_none());

        let keys: Vec<_> = screen.query_for(0).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["page", "size", "startDate", "endDate"]);
    }

    #[test]
    fn default_window_is_last_week() {
        let screen = controller();
        let query = screen.query_for(0);
        assert!(query.contains(&("startDate", "2024-03-08T12:00:00".to_string())));
        assert!(query.contains(&("size", "20".to_string())));
    }
}
