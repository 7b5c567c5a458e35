//! Generic paginated CRUD screen.
//!
//! [`CrudController`] is written once and instantiated per entity through the
//! [`Resource`] binding:
//!
//! ```text
//! CrudController<Employees>    CrudController<Departments>
//! CrudController<Locations>    CrudController<Tiers>
//! ```
//!
//! # State
//!
//! - **Items / total**: the page last accepted from the server
//! - **Cursor**: zero-based page and rows per page
//! - **Loading / banner**: fetch in progress, dismissible failure message
//! - **Dialog**: open flag, create/edit mode and the unsaved draft
//!
//! # Failure policy
//!
//! No operation returns an error to its caller. Failures are logged with full
//! detail and surface as a static banner ("Failed to fetch tiers"). A failed
//! refresh keeps the previous rows on screen; a failed submit keeps the dialog
//! open with the draft intact.
//!
//! # Ordering
//!
//! Every fetch carries a [`FetchTicket`]. A response is applied only if its
//! ticket is still the latest one issued, so a slow early response can never
//! overwrite the result of a later request.

use crate::api::resources::{Resource, ResourceClient};
use crate::api::ApiClient;
use crate::app::dialog::{Confirmer, DialogState};
use crate::app::generation::{FetchTicket, Generation};
use crate::domain::error::Result;
use crate::domain::form::FormMode;
use crate::domain::page::{page_count, Page};

/// State and operations of one entity's list screen.
#[derive(Debug)]
pub struct CrudController<R: Resource> {
    client: ResourceClient<R>,
    items: Vec<R::Record>,
    total_count: u64,
    page: u32,
    page_size: u32,
    is_loading: bool,
    error_message: Option<String>,
    dialog: DialogState<R::Draft>,
    generation: Generation,
}

impl<R: Resource> CrudController<R> {
    /// Creates an empty screen showing `page_size` rows per page.
    ///
    /// Nothing is fetched until [`CrudController::refresh`] is called.
    #[must_use]
    pub fn new(client: ApiClient, page_size: u32) -> Self {
        Self {
            client: ResourceClient::new(client),
            items: Vec::new(),
            total_count: 0,
            page: 0,
            page_size: page_size.max(1),
            is_loading: false,
            error_message: None,
            dialog: DialogState::default(),
            generation: Generation::default(),
        }
    }

    /// Rows of the page last accepted.
    #[must_use]
    pub fn items(&self) -> &[R::Record] {
        &self.items
    }

    /// Server-reported total across all pages.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Zero-based current page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of pages at the current page size.
    #[must_use]
    pub const fn page_count(&self) -> u64 {
        page_count(self.total_count, self.page_size)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Banner text, if a failure is showing.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub const fn dialog(&self) -> &DialogState<R::Draft> {
        &self.dialog
    }

    /// Hides the banner.
    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    // -----------------------------------------------------------------------
    // Fetching
    // -----------------------------------------------------------------------

    /// Marks a fetch as started and returns its ticket.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.is_loading = true;
        self.generation.issue()
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when the ticket is stale. Otherwise
    /// success replaces the rows and total, failure sets the banner and keeps the
    /// rows, and in both cases loading ends.
    pub fn complete_refresh(&mut self, ticket: FetchTicket, outcome: Result<Page<R::Record>>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!(
                resource = R::PATH,
                ticket = ticket.value(),
                "discarding stale list response"
            );
            return false;
        }

        match outcome {
            Ok(page) => {
                tracing::debug!(
                    resource = R::PATH,
                    rows = page.data.len(),
                    total = page.total_elements,
                    "list refreshed"
                );
                self.items = page.data;
                self.total_count = page.total_elements;
            }
            Err(e) => {
                tracing::warn!(resource = R::PATH, error = %e, "list fetch failed");
                self.error_message = Some(format!("Failed to fetch {}", R::PLURAL));
            }
        }

        self.is_loading = false;
        true
    }

    /// Fetches the current page at the current page size.
    pub async fn refresh(&mut self) {
        self.refresh_page(self.page, self.page_size).await;
    }

    /// Moves the cursor to `page` at `page_size` rows and fetches it.
    #[tracing::instrument(name = "crud_refresh", level = "debug", skip(self), fields(resource = R::PATH))]
    pub async fn refresh_page(&mut self, page: u32, page_size: u32) {
        self.page = page;
        self.page_size = page_size.max(1);

        let ticket = self.begin_refresh();
        let outcome = self.client.list(self.page, self.page_size).await;
        self.complete_refresh(ticket, outcome);
    }

    /// Goes to `page` at the current page size.
    pub async fn set_page(&mut self, page: u32) {
        self.refresh_page(page, self.page_size).await;
    }

    /// Changes the page size. Always returns to the first page.
    pub async fn set_page_size(&mut self, page_size: u32) {
        self.refresh_page(0, page_size).await;
    }

    /// Fetches the single record `id`.
    ///
    /// On failure the detail is logged, the banner reads `Failed to fetch {NOUN}`
    /// and `None` comes back. The loaded page is left alone.
    #[tracing::instrument(name = "crud_load", level = "debug", skip(self), fields(resource = R::PATH))]
    pub async fn load(&mut self, id: &str) -> Option<R::Record> {
        match self.client.get(id).await {
            Ok(record) => {
                self.error_message = None;
                Some(record)
            }
            Err(e) => {
                tracing::warn!(resource = R::PATH, error = %e, "record fetch failed");
                self.error_message = Some(format!("Failed to fetch {}", R::NOUN));
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Dialog
    // -----------------------------------------------------------------------

    /// Opens a blank create dialog.
    pub fn open_create_dialog(&mut self) {
        self.dialog.open_create();
    }

    /// Opens an edit dialog seeded from `record`. Write-only fields stay blank.
    pub fn open_edit_dialog(&mut self, record: &R::Record) {
        self.dialog.open_edit(R::edit_draft(record));
    }

    /// Opens an edit dialog for the row with identity `id` on the current page.
    ///
    /// Returns `false` when no such row is loaded.
    pub fn open_edit_dialog_for(&mut self, id: &str) -> bool {
        let Some(record) = self.items.iter().find(|r| R::identity(r) == id).cloned() else {
            return false;
        };
        self.open_edit_dialog(&record);
        true
    }

    /// Updates one draft field.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ConsoleError::Validation`] for unknown fields, a
    /// closed dialog, or an attempt to change the identity while editing.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        self.dialog.set_field(field, value)
    }

    /// Closes the dialog, discarding the draft.
    pub fn close_dialog(&mut self) {
        self.dialog.close();
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Sends the draft as a create or update, depending on the dialog mode.
    ///
    /// On success the dialog closes and the current page is refetched. On
    /// failure the banner is set and the dialog stays open with its draft.
    /// Returns whether the save succeeded.
    #[tracing::instrument(name = "crud_submit", level = "debug", skip(self), fields(resource = R::PATH, mode = ?self.dialog.mode))]
    pub async fn submit(&mut self) -> bool {
        if !self.dialog.open {
            tracing::debug!("submit without an open dialog, ignoring");
            return false;
        }

        match self.save_draft().await {
            Ok(()) => {
                tracing::info!(resource = R::PATH, "record saved");
                self.dialog.close();
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!(resource = R::PATH, error = %e, "save failed");
                self.error_message = Some(format!("Failed to save {}", R::NOUN));
                false
            }
        }
    }

    async fn save_draft(&self) -> Result<()> {
        let payload = R::payload(&self.dialog.draft, self.dialog.mode)?;
        match self.dialog.mode {
            FormMode::Create => self.client.create(&payload).await,
            FormMode::Edit => self.client.update(&payload).await,
        }
    }

    /// Deletes the record with identity `id` after an explicit confirmation.
    ///
    /// Nothing is sent unless `confirmer` answers yes. On success the current
    /// page is refetched. Returns whether a delete was performed.
    #[tracing::instrument(name = "crud_remove", level = "debug", skip(self, confirmer), fields(resource = R::PATH))]
    pub async fn remove(&mut self, id: &str, confirmer: &dyn Confirmer) -> bool {
        let prompt = format!("Are you sure you want to delete this {}?", R::NOUN);
        if !confirmer.confirm(&prompt) {
            tracing::debug!("delete not confirmed");
            return false;
        }

        match self.client.delete(id).await {
            Ok(()) => {
                tracing::info!(resource = R::PATH, "record deleted");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::warn!(resource = R::PATH, error = %e, "delete failed");
                self.error_message = Some(format!("Failed to delete {}", R::NOUN));
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resources::Tiers;
    use crate::domain::error::ConsoleError;
    use crate::domain::records::Tier;
    use crate::session::SessionStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn controller() -> CrudController<Tiers> {
        let session = Arc::new(SessionStore::ephemeral());
        let client = ApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(1), session).unwrap();
        CrudController::new(client, 10)
    }

    fn tier(code: &str, name: &str) -> Tier {
        Tier {
            tier_code: code.into(),
            tier_name: name.into(),
        }
    }

    #[test]
    fn success_replaces_rows_and_total() {
        let mut screen = controller();
        let ticket = screen.begin_refresh();
        assert!(screen.is_loading());
        assert!(screen.complete_refresh(ticket, Ok(Page::new(vec![tier("GOLD", "Gold")], 7))));
        assert_eq!(screen.items(), &[tier("GOLD", "Gold")]);
        assert_eq!(screen.total_count(), 7);
        assert!(!screen.is_loading());
    }

    #[test]
    fn failure_keeps_rows_and_sets_banner() {
        let mut screen = controller();
        let ticket = screen.begin_refresh();
        screen.complete_refresh(ticket, Ok(Page::new(vec![tier("GOLD", "Gold")], 1)));

        let ticket = screen.begin_refresh();
        screen.complete_refresh(ticket, Err(ConsoleError::Server { status: 500, body: String::new() }));
        assert_eq!(screen.items().len(), 1);
        assert_eq!(screen.error_message(), Some("Failed to fetch tiers"));
        assert!(!screen.is_loading());

        screen.dismiss_error();
        assert!(screen.error_message().is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut screen = controller();
        let early = screen.begin_refresh();
        let late = screen.begin_refresh();

        assert!(screen.complete_refresh(late, Ok(Page::new(vec![tier("NEW", "New")], 1))));
        assert!(!screen.complete_refresh(early, Ok(Page::new(vec![tier("OLD", "Old")], 9))));
        assert_eq!(screen.items(), &[tier("NEW", "New")]);
        assert_eq!(screen.total_count(), 1);
    }

    #[test]
    fn stale_response_does_not_end_loading() {
        let mut screen = controller();
        let early = screen.begin_refresh();
        let _late = screen.begin_refresh();
        screen.complete_refresh(early, Ok(Page::default()));
        assert!(screen.is_loading());
    }

    #[test]
    fn edit_dialog_for_unknown_row_is_refused() {
        let mut screen = controller();
        assert!(!screen.open_edit_dialog_for("NOPE"));
        let ticket = screen.begin_refresh();
        screen.complete_refresh(ticket, Ok(Page::new(vec![tier("GOLD", "Gold")], 1)));
        assert!(screen.open_edit_dialog_for("GOLD"));
        assert_eq!(screen.dialog().mode, FormMode::Edit);
    }
}
