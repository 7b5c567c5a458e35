//! Domain layer for the console.
//!
//! Typed schemas for everything that crosses the wire, plus the dialog draft
//! model. Nothing here performs I/O; the [`crate::api`] layer parses responses
//! into these types at the client boundary.
//!
//! # Organization
//!
//! - [`error`]: Error type, failure taxonomy and result alias
//! - [`form`]: Dialog field schema and the [`FormDraft`] trait
//! - [`records`]: Employee, department, location and tier records
//! - [`page`]: Paginated list envelope
//! - [`analytics`]: Report rows
//! - [`audit`]: Audit log entries and query filter
//!
//! # Examples
//!
//! ```
//! use opsconsole::domain::{Department, FormDraft, FormMode, Result};
//!
//! fn draft_engineering() -> Result<Department> {
//!     let mut draft = Department::default();
//!     draft.set("departmentCode", "ENG")?;
//!     draft.set("departmentName", "Engineering")?;
//!     draft.check_required(FormMode::Create)?;
//!     Ok(draft)
//! }
//! # assert_eq!(draft_engineering().unwrap().identity(), "ENG");
//! ```

pub mod analytics;
pub mod audit;
pub mod error;
pub mod form;
pub mod page;
pub mod records;

pub use analytics::{CumulativeSalaryRow, DepartmentAnalysisRow, EmployeeRankingRow};
pub use audit::{AuditFilter, AuditLogEntry, HttpMethod};
pub use error::{ConsoleError, ErrorKind, Result};
pub use form::{FieldSpec, FormDraft, FormMode};
pub use page::{page_count, Page, PAGE_SIZE_CHOICES};
pub use records::{Department, Employee, EmployeeDraft, EmployeePayload, Location, Tier};
