//! Screen controllers.
//!
//! Each screen owns its transient state and drives the [`crate::api`] layer.
//! Controllers share one [`crate::api::ApiClient`], and through it one
//! [`crate::session::SessionStore`].
//!
//! ```text
//! Shell (route + gating)
//!   ├─ CrudController<R>       employees, departments, locations, tiers
//!   ├─ ReportController<K>     three analytics reports
//!   ├─ AuditLogController      API call history
//!   └─ OverviewController      entity totals
//!            │
//!            ▼
//!        ApiClient ──── SessionStore
//! ```
//!
//! # Modules
//!
//! - [`crud`]: generic paginated list + dialog screen
//! - [`dialog`]: dialog state and delete confirmation
//! - [`generation`]: stale-response tickets
//! - [`report`]: read-only report screens
//! - [`audit`]: audit log screen with deferred filters
//! - [`overview`]: entity counts
//! - [`shell`]: routes and session gating
//!
//! # Example
//!
//! ```no_run
//! use opsconsole::api::{ApiClient, Departments};
//! use opsconsole::app::CrudController;
//! use opsconsole::session::SessionStore;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> opsconsole::domain::Result<()> {
//! let session = Arc::new(SessionStore::ephemeral());
//! let client = ApiClient::new("http://localhost:8080/api", Duration::from_secs(30), session)?;
//! let mut departments = CrudController::<Departments>::new(client, 10);
//! departments.refresh().await;
//! println!("{} departments", departments.total_count());
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod crud;
pub mod dialog;
pub mod generation;
pub mod overview;
pub mod report;
pub mod shell;

pub use audit::AuditLogController;
pub use crud::CrudController;
pub use dialog::{Confirmer, DialogState};
pub use generation::{FetchTicket, Generation};
pub use overview::{EntityCounts, OverviewController};
pub use report::ReportController;
pub use shell::{resolve, NavItem, Route, NAV_ITEMS};
