//! Route table and session gating.
//!
//! Every screen except login sits behind the session. Routing decisions are
//! pure functions of the requested route and whether a session is held, so
//! they can be made before anything is fetched or drawn.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ConsoleError;

/// Addressable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    /// `/`, an alias for the employee list.
    Index,
    Employees,
    Departments,
    Locations,
    Tiers,
    CumulativeSalary,
    DepartmentAnalysis,
    EmployeeRanking,
    Logs,
}

impl Route {
    pub const ALL: [Self; 10] = [
        Self::Login,
        Self::Index,
        Self::Employees,
        Self::Departments,
        Self::Locations,
        Self::Tiers,
        Self::CumulativeSalary,
        Self::DepartmentAnalysis,
        Self::EmployeeRanking,
        Self::Logs,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Index => "/",
            Self::Employees => "/employees",
            Self::Departments => "/departments",
            Self::Locations => "/locations",
            Self::Tiers => "/tiers",
            Self::CumulativeSalary => "/cumulative-salary",
            Self::DepartmentAnalysis => "/department-analysis",
            Self::EmployeeRanking => "/employee-ranking",
            Self::Logs => "/logs",
        }
    }

    /// Where signed-in users land.
    pub const HOME: Self = Self::Employees;
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        Self::ALL
            .into_iter()
            .find(|r| r.path() == normalized)
            .ok_or_else(|| ConsoleError::Validation(format!("unknown route: {s}")))
    }
}

/// Final route after applying session gating and aliases.
///
/// - no session: everything resolves to [`Route::Login`]
/// - session held: `/login` and `/` resolve to [`Route::HOME`]
#[must_use]
pub const fn resolve(requested: Route, authenticated: bool) -> Route {
    match (requested, authenticated) {
        (_, false) => Route::Login,
        (Route::Login | Route::Index, true) => Route::HOME,
        (route, true) => route,
    }
}

/// One entry of the navigation frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
}

/// Navigation frame, in display order.
pub const NAV_ITEMS: [NavItem; 8] = [
    NavItem { label: "Employees", route: Route::Employees },
    NavItem { label: "Departments", route: Route::Departments },
    NavItem { label: "Locations", route: Route::Locations },
    NavItem { label: "Tiers", route: Route::Tiers },
    NavItem { label: "Cumulative Salary", route: Route::CumulativeSalary },
    NavItem { label: "Department Analysis", route: Route::DepartmentAnalysis },
    NavItem { label: "Employee Ranking", route: Route::EmployeeRanking },
    NavItem { label: "API Logs", route: Route::Logs },
];
