//! Rows of the read-only analytics reports.
//!
//! The aggregation itself happens server-side; these types only describe what
//! comes back. Counts and ranks arrive as strings and are kept that way.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running salary total per department, ordered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CumulativeSalaryRow {
    #[serde(default)]
    pub department_code: String,
    #[serde(default)]
    pub employee_number: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub cumulative_salary: Option<Decimal>,
}

/// Largest department and cheapest department per location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAnalysisRow {
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub dept_with_most_employee: String,
    #[serde(default)]
    pub dept_employee_count: String,
    #[serde(default)]
    pub lowest_dept_avg_salary: Option<Decimal>,
}

/// Salary rank of an employee within their department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRankingRow {
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub department_name: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub salary: Option<Decimal>,
    #[serde(default)]
    pub rank: String,
    #[serde(default)]
    pub salary_gap: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_row_keeps_rank_as_text() {
        let json = r#"{"locationName":"HQ","departmentName":"Eng","employeeName":"Ada",
            "position":"Lead","salary":9000.5,"rank":"1","salaryGap":0}"#;
        let row: EmployeeRankingRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.rank, "1");
        assert_eq!(row.salary, Some(Decimal::new(90005, 1)));
    }

    #[test]
    fn analysis_row_tolerates_missing_salary() {
        let json = r#"{"locationName":"HQ","deptWithMostEmployee":"ENG","deptEmployeeCount":"12"}"#;
        let row: DepartmentAnalysisRow = serde_json::from_str(json).unwrap();
        assert!(row.lowest_dept_avg_salary.is_none());
    }
}
