//! View models computed from controller state.
//!
//! View models hold display-ready text only. The renderer never looks at a
//! controller or a domain type; everything it needs is in a [`TableView`] or a
//! [`FormView`].
//!
//! # Example
//!
//! ```
//! use opsconsole::ui::viewmodel::{Cell, TableView};
//!
//! let view = TableView {
//!     title: "Tier Management".to_string(),
//!     columns: vec!["Tier Code".to_string(), "Tier Name".to_string()],
//!     rows: vec![vec![Cell::plain("GOLD"), Cell::plain("Gold")]],
//!     banner: None,
//!     footer: Some("Page 1 of 1 (1 total)".to_string()),
//!     empty_message: "No tiers found".to_string(),
//! };
//! assert_eq!(view.rows.len(), 1);
//! ```

use crate::api::reports::Report;
use crate::api::resources::Resource;
use crate::app::{AuditLogController, CrudController, EntityCounts, ReportController};
use crate::domain::analytics::{CumulativeSalaryRow, DepartmentAnalysisRow, EmployeeRankingRow};
use crate::domain::audit::AuditLogEntry;
use crate::domain::form::FormDraft;
use crate::domain::records::{Department, Employee, Location, Tier};
use crate::ui::format::{self, Tone};

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Default,
        }
    }

    #[must_use]
    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// Anything that renders as a table row.
pub trait Tabular {
    /// Column headings.
    fn columns() -> &'static [&'static str];

    /// Cells, one per column.
    fn cells(&self) -> Vec<Cell>;
}

/// A titled table with optional banner and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    /// Failure message shown above the table.
    pub banner: Option<String>,
    /// Paging summary or hint shown below the table.
    pub footer: Option<String>,
    /// Shown in place of rows when there are none.
    pub empty_message: String,
}

impl TableView {
    fn of<T: Tabular>(title: &str, items: &[T], empty_message: String) -> Self {
        Self {
            title: title.to_string(),
            columns: T::columns().iter().map(|c| (*c).to_string()).collect(),
            rows: items.iter().map(Tabular::cells).collect(),
            banner: None,
            footer: None,
            empty_message,
        }
    }
}

/// One field of a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub locked: bool,
}

/// A dialog snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    pub fields: Vec<FormFieldView>,
}

// ---------------------------------------------------------------------------
// Screen views
// ---------------------------------------------------------------------------

/// Table for an entity list screen.
#[must_use]
pub fn crud_view<R>(screen: &CrudController<R>) -> TableView
where
    R: Resource,
    R::Record: Tabular,
{
    let mut view = TableView::of(R::TITLE, screen.items(), format!("No {} found", R::PLURAL));
    view.banner = screen.error_message().map(str::to_string);
    view.footer = Some(format::page_summary(
        screen.page(),
        screen.page_count(),
        screen.total_count(),
    ));
    view
}

/// Table for a report screen.
#[must_use]
pub fn report_view<K>(screen: &ReportController<K>) -> TableView
where
    K: Report,
    K::Row: Tabular,
{
    let mut view = TableView::of(K::TITLE, screen.rows(), "No data available".to_string());
    view.banner = screen.error_message().map(str::to_string);
    view
}

/// Table for the audit log screen.
#[must_use]
pub fn audit_view(screen: &AuditLogController) -> TableView {
    let mut view = TableView::of(
        crate::app::audit::TITLE,
        screen.entries(),
        "No API calls recorded in this range".to_string(),
    );
    view.banner = screen.error_message().map(str::to_string);
    view.footer = Some(format::page_summary(
        screen.page(),
        screen.page_count(),
        screen.total_count(),
    ));
    view
}

/// Two-column table of entity totals.
#[must_use]
pub fn overview_view(counts: EntityCounts, banner: Option<&str>) -> TableView {
    TableView {
        title: "Dashboard".to_string(),
        columns: vec!["Entity".to_string(), "Total".to_string()],
        rows: counts
            .labelled()
            .into_iter()
            .map(|(label, total)| vec![Cell::plain(label), Cell::plain(total.to_string())])
            .collect(),
        banner: banner.map(str::to_string),
        footer: None,
        empty_message: String::new(),
    }
}

/// Field/value table for a single record.
#[must_use]
pub fn detail_view<T: Tabular>(title: &str, record: &T) -> TableView {
    TableView {
        title: title.to_string(),
        columns: vec!["Field".to_string(), "Value".to_string()],
        rows: T::columns()
            .iter()
            .zip(record.cells())
            .map(|(column, cell)| vec![Cell::plain(*column), cell])
            .collect(),
        banner: None,
        footer: None,
        empty_message: String::new(),
    }
}

/// Snapshot of the open dialog of an entity screen, `None` when closed.
///
/// Write-only fields are shown masked when filled, never in clear.
#[must_use]
pub fn form_view<R: Resource>(screen: &CrudController<R>) -> Option<FormView> {
    let dialog = screen.dialog();
    if !dialog.open {
        return None;
    }

    let editing = dialog.mode == crate::domain::FormMode::Edit;
    let noun = title_case(R::NOUN);
    let title = if editing {
        format!("Edit {noun}")
    } else {
        format!("Add New {noun}")
    };

    let fields = R::Draft::fields()
        .iter()
        .map(|spec| {
            let raw = dialog.draft.get(spec.name).unwrap_or_default();
            let value = if spec.write_only && !raw.is_empty() {
                "*".repeat(raw.chars().count())
            } else {
                raw.to_string()
            };
            FormFieldView {
                name: spec.name,
                label: spec.label,
                value,
                locked: editing && spec.identity,
            }
        })
        .collect();

    Some(FormView { title, fields })
}

/// Upper-cases the first letter of `word`.
#[must_use]
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

// ---------------------------------------------------------------------------
// Row layouts
// ---------------------------------------------------------------------------

impl Tabular for Employee {
    fn columns() -> &'static [&'static str] {
        &["Employee #", "Name", "Email", "Tier", "Location", "Department", "Supervisor", "Salary"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(&self.employee_number),
            Cell::plain(&self.employee_name),
            Cell::plain(&self.email),
            Cell::plain(self.tier_code.clone().unwrap_or_default()),
            Cell::plain(self.location_code.clone().unwrap_or_default()),
            Cell::plain(self.department_code.clone().unwrap_or_default()),
            Cell::plain(self.supervisor_code.clone().unwrap_or_default()),
            Cell::plain(format::amount(self.salary)),
        ]
    }
}

impl Tabular for Department {
    fn columns() -> &'static [&'static str] {
        &["Department Code", "Department Name"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::plain(&self.department_code), Cell::plain(&self.department_name)]
    }
}

impl Tabular for Location {
    fn columns() -> &'static [&'static str] {
        &["Location Code", "Location Name", "Address"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(&self.location_code),
            Cell::plain(&self.location_name),
            Cell::plain(&self.location_address),
        ]
    }
}

impl Tabular for Tier {
    fn columns() -> &'static [&'static str] {
        &["Tier Code", "Tier Name"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::plain(&self.tier_code), Cell::plain(&self.tier_name)]
    }
}

impl Tabular for CumulativeSalaryRow {
    fn columns() -> &'static [&'static str] {
        &["Department", "Employee Number", "Employee Name", "Cumulative Salary"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(&self.department_code),
            Cell::plain(&self.employee_number),
            Cell::plain(&self.employee_name),
            Cell::plain(format::amount(self.cumulative_salary)),
        ]
    }
}

impl Tabular for DepartmentAnalysisRow {
    fn columns() -> &'static [&'static str] {
        &["Location Name", "Department with Most Employees", "Employee Count", "Lowest Dept Avg Salary"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(&self.location_name),
            Cell::plain(&self.dept_with_most_employee),
            Cell::plain(&self.dept_employee_count),
            Cell::plain(format::amount(self.lowest_dept_avg_salary)),
        ]
    }
}

impl Tabular for EmployeeRankingRow {
    fn columns() -> &'static [&'static str] {
        &["Location", "Department", "Employee Name", "Position", "Salary", "Rank", "Salary Gap"]
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::plain(&self.location_name),
            Cell::plain(&self.department_name),
            Cell::plain(&self.employee_name),
            Cell::plain(&self.position),
            Cell::plain(format::amount(self.salary)),
            Cell::plain(&self.rank),
            Cell::plain(format::amount(self.salary_gap)),
        ]
    }
}

impl Tabular for AuditLogEntry {
    fn columns() -> &'static [&'static str] {
        &["Timestamp", "Method", "Endpoint", "User", "Status", "Duration (ms)", "IP Address"]
    }

    fn cells(&self) -> Vec<Cell> {
        let status = self.response_status.map_or_else(
            || Cell::plain(format::NOT_AVAILABLE),
            |s| Cell::toned(s.to_string(), format::status_tone(s)),
        );
        vec![
            Cell::plain(format::audit_timestamp(self)),
            Cell::toned(&self.http_method, format::method_tone(&self.http_method)),
            Cell::plain(&self.api_endpoint),
            Cell::plain(format::audit_user(self)),
            status,
            Cell::plain(format::duration_ms(self.request_duration_ms)),
            Cell::plain(format::or_not_available(self.client_ip.as_deref())),
        ]
    }
}
