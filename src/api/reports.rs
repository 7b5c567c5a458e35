//! Read-only analytics endpoints.

use crate::api::client::ApiClient;
use crate::domain::analytics::{CumulativeSalaryRow, DepartmentAnalysisRow, EmployeeRankingRow};
use crate::domain::error::Result;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// One precomputed report: a bare JSON array at a fixed path.
pub trait Report: Send + Sync + 'static {
    type Row: DeserializeOwned + Clone + Debug + Send + Sync;

    const PATH: &'static str;
    const TITLE: &'static str;
    /// Banner shown when the fetch fails.
    const FETCH_ERROR: &'static str;
}

/// Running salary totals per department.
#[derive(Debug, Clone, Copy, Default)]
pub struct CumulativeSalary;

/// Largest and cheapest department per location.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentAnalysis;

/// Salary rank within department.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeRanking;

impl Report for CumulativeSalary {
    type Row = CumulativeSalaryRow;
    const PATH: &'static str = "employee/cumulative-salary";
    const TITLE: &'static str = "Cumulative Salary Analysis";
    const FETCH_ERROR: &'static str = "Failed to fetch cumulative salary data";
}

impl Report for DepartmentAnalysis {
    type Row = DepartmentAnalysisRow;
    const PATH: &'static str = "employee/department-analysis";
    const TITLE: &'static str = "Department Analysis";
    const FETCH_ERROR: &'static str = "Failed to fetch department analysis data";
}

impl Report for EmployeeRanking {
    type Row = EmployeeRankingRow;
    const PATH: &'static str = "employee/employee-ranking";
    const TITLE: &'static str = "Employee Ranking by Salary";
    const FETCH_ERROR: &'static str = "Failed to fetch employee ranking data";
}

/// Fetches all rows of report `K`. A `null` body counts as no rows.
///
/// # Errors
///
/// See [`ApiClient::get`].
pub async fn fetch<K: Report>(client: &ApiClient) -> Result<Vec<K::Row>> {
    let rows: Option<Vec<K::Row>> = client.get(K::PATH, &[]).await?;
    Ok(rows.unwrap_or_default())
}
