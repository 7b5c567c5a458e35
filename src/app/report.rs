//! Read-only report screens.
//!
//! A report screen fetches once when mounted and never again on its own. There
//! is no paging and no mutation. An empty result is a valid, empty table.

use crate::api::reports::{self, Report};
use crate::api::ApiClient;
use std::marker::PhantomData;

/// State of one report screen.
#[derive(Debug)]
pub struct ReportController<K: Report> {
    client: ApiClient,
    rows: Vec<K::Row>,
    is_loading: bool,
    loaded: bool,
    error_message: Option<String>,
    _report: PhantomData<fn() -> K>,
}

impl<K: Report> ReportController<K> {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            rows: Vec::new(),
            is_loading: false,
            loaded: false,
            error_message: None,
            _report: PhantomData,
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[K::Row] {
        &self.rows
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

    /// Fetches the report the first time the screen is shown.
    ///
    /// Later calls do nothing, whether the first fetch succeeded or not.
    #[tracing::instrument(name = "report_mount", level = "debug", skip(self), fields(report = K::PATH))]
    pub async fn mount(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.is_loading = true;

        match reports::fetch::<K>(&self.client).await {
            Ok(rows) => {
                tracing::debug!(rows = rows.len(), "report loaded");
                self.rows = rows;
            }
            Err(e) => {
                tracing::warn!(error = %e, "report fetch failed");
                self.error_message = Some(K::FETCH_ERROR.to_string());
            }
        }

        self.is_loading = false;
    }
}
