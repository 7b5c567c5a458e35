//! Managed record types and their dialog drafts.
//!
//! Each entity comes in three shapes:
//!
//! - a **record**, the read model parsed from list and get responses
//! - a **draft**, raw dialog text implementing [`FormDraft`]
//! - a **payload**, the typed request body built from a draft on submit
//!
//! Records are identified by a business code (`employeeNumber`, `departmentCode`,
//! ...) rather than a synthetic id. Reference fields on [`Employee`] (tier,
//! location, department, supervisor) are opaque codes; the backend owns
//! referential integrity.

use super::error::{ConsoleError, Result};
use super::form::{FieldSpec, FormDraft, FormMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Generates `get`/`slot` for a draft whose fields are all `String`.
macro_rules! draft_fields {
    ($draft:ty { $($wire:literal => $field:ident),* $(,)? }) => {
        impl $draft {
            fn field_ref(&self, name: &str) -> Option<&str> {
                match name {
                    $($wire => Some(self.$field.as_str()),)*
                    _ => None,
                }
            }

            fn field_mut(&mut self, name: &str) -> Option<&mut String> {
                match name {
                    $($wire => Some(&mut self.$field),)*
                    _ => None,
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

/// Employee read model.
///
/// The stored password is deliberately absent: whatever the backend echoes back
/// is dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub employee_number: String,
    #[serde(default)]
    pub employee_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub tier_code: Option<String>,
    #[serde(default)]
    pub location_code: Option<String>,
    #[serde(default)]
    pub department_code: Option<String>,
    #[serde(default)]
    pub supervisor_code: Option<String>,
    #[serde(default)]
    pub salary: Option<Decimal>,
    /// Server-assigned hire timestamp, display only.
    #[serde(default)]
    pub entry_date: Option<String>,
}

/// Employee dialog state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub employee_number: String,
    pub employee_name: String,
    pub email: String,
    pub password: String,
    pub tier_code: String,
    pub location_code: String,
    pub department_code: String,
    pub supervisor_code: String,
    pub salary: String,
}

draft_fields!(EmployeeDraft {
    "employeeNumber" => employee_number,
    "employeeName" => employee_name,
    "email" => email,
    "password" => password,
    "tierCode" => tier_code,
    "locationCode" => location_code,
    "departmentCode" => department_code,
    "supervisorCode" => supervisor_code,
    "salary" => salary,
});

const EMPLOYEE_FIELDS: &[FieldSpec] = &[
    FieldSpec::identity("employeeNumber", "Employee Number"),
    FieldSpec::text("employeeName", "Employee Name").required(),
    FieldSpec::text("email", "Email").required(),
    FieldSpec::text("password", "Password").required().write_only(),
    FieldSpec::text("tierCode", "Tier Code"),
    FieldSpec::text("locationCode", "Location Code"),
    FieldSpec::text("departmentCode", "Department Code"),
    FieldSpec::text("supervisorCode", "Supervisor Code"),
    FieldSpec::text("salary", "Salary"),
];

impl FormDraft for EmployeeDraft {
    fn fields() -> &'static [FieldSpec] {
        EMPLOYEE_FIELDS
    }

    fn get(&self, field: &str) -> Option<&str> {
        self.field_ref(field)
    }

    fn slot(&mut self, field: &str) -> Option<&mut String> {
        self.field_mut(field)
    }
}

impl From<&Employee> for EmployeeDraft {
    /// Seeds an edit draft. The password stays blank.
    fn from(record: &Employee) -> Self {
        Self {
            employee_number: record.employee_number.clone(),
            employee_name: record.employee_name.clone(),
            email: record.email.clone(),
            password: String::new(),
            tier_code: record.tier_code.clone().unwrap_or_default(),
            location_code: record.location_code.clone().unwrap_or_default(),
            department_code: record.department_code.clone().unwrap_or_default(),
            supervisor_code: record.supervisor_code.clone().unwrap_or_default(),
            salary: record.salary.map(|s| s.to_string()).unwrap_or_default(),
        }
    }
}

/// Employee create/update request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub employee_number: String,
    pub employee_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub tier_code: Option<String>,
    pub location_code: Option<String>,
    pub department_code: Option<String>,
    pub supervisor_code: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    pub salary: Option<Decimal>,
}

impl EmployeePayload {
    /// Builds the request body for `mode`.
    ///
    /// A blank password is omitted on edit so the stored credential survives the
    /// update. Blank reference codes are sent as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] if the salary is not a decimal number.
    pub fn from_draft(draft: &EmployeeDraft, mode: FormMode) -> Result<Self> {
        let salary = non_blank(&draft.salary)
            .map(|raw| {
                Decimal::from_str(raw.replace(',', "").as_str())
                    .map_err(|_| ConsoleError::Validation(format!("salary is not a number: {raw}")))
            })
            .transpose()?;

        let password = match mode {
            FormMode::Create => Some(draft.password.clone()),
            FormMode::Edit => non_blank(&draft.password).map(str::to_string),
        };

        Ok(Self {
            employee_number: draft.employee_number.trim().to_string(),
            employee_name: draft.employee_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            password,
            tier_code: non_blank(&draft.tier_code).map(str::to_string),
            location_code: non_blank(&draft.location_code).map(str::to_string),
            department_code: non_blank(&draft.department_code).map(str::to_string),
            supervisor_code: non_blank(&draft.supervisor_code).map(str::to_string),
            salary,
        })
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// Department record. Doubles as its own draft payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub department_code: String,
    #[serde(default)]
    pub department_name: String,
}

draft_fields!(Department {
    "departmentCode" => department_code,
    "departmentName" => department_name,
});

const DEPARTMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::identity("departmentCode", "Department Code"),
    FieldSpec::text("departmentName", "Department Name").required(),
];

impl FormDraft for Department {
    fn fields() -> &'static [FieldSpec] {
        DEPARTMENT_FIELDS
    }

    fn get(&self, field: &str) -> Option<&str> {
        self.field_ref(field)
    }

    fn slot(&mut self, field: &str) -> Option<&mut String> {
        self.field_mut(field)
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// Location record. Doubles as its own draft payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub location_code: String,
    #[serde(default)]
    pub location_name: String,
    #[serde(default)]
    pub location_address: String,
}

draft_fields!(Location {
    "locationCode" => location_code,
    "locationName" => location_name,
    "locationAddress" => location_address,
});

const LOCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::identity("locationCode", "Location Code"),
    FieldSpec::text("locationName", "Location Name").required(),
    FieldSpec::text("locationAddress", "Address"),
];

impl FormDraft for Location {
    fn fields() -> &'static [FieldSpec] {
        LOCATION_FIELDS
    }

    fn get(&self, field: &str) -> Option<&str> {
        self.field_ref(field)
    }

    fn slot(&mut self, field: &str) -> Option<&mut String> {
        self.field_mut(field)
    }
}

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Tier record. Doubles as its own draft payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    pub tier_code: String,
    #[serde(default)]
    pub tier_name: String,
}

draft_fields!(Tier {
    "tierCode" => tier_code,
    "tierName" => tier_name,
});

const TIER_FIELDS: &[FieldSpec] = &[
    FieldSpec::identity("tierCode", "Tier Code"),
    FieldSpec::text("tierName", "Tier Name").required(),
];

impl FormDraft for Tier {
    fn fields() -> &'static [FieldSpec] {
        TIER_FIELDS
    }

    fn get(&self, field: &str) -> Option<&str> {
        self.field_ref(field)
    }

    fn slot(&mut self, field: &str) -> Option<&mut String> {
        self.field_mut(field)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_employee() -> Employee {
        Employee {
            employee_number: "E-001".into(),
            employee_name: "Ada".into(),
            email: "ada@example.com".into(),
            tier_code: Some("GOLD".into()),
            location_code: None,
            department_code: Some("ENG".into()),
            supervisor_code: None,
            salary: Some(Decimal::new(1_250_000, 2)),
            entry_date: None,
        }
    }

    #[test]
    fn employee_record_ignores_echoed_password() {
        let json = r#"{"employeeNumber":"E-1","employeeName":"Bo","email":"b@x","password":"$2a$hash","salary":5000}"#;
        let record: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(record.salary, Some(Decimal::new(5000, 0)));
        let draft = EmployeeDraft::from(&record);
        assert!(draft.password.is_empty());
    }

    #[test]
    fn edit_draft_never_carries_password() {
        let draft = EmployeeDraft::from(&sample_employee());
        assert_eq!(draft.password, "");
        assert_eq!(draft.salary, "12500.00");
        assert_eq!(draft.identity(), "E-001");
    }

    #[test]
    fn edit_payload_omits_blank_password() {
        let draft = EmployeeDraft::from(&sample_employee());
        let payload = EmployeePayload::from_draft(&draft, FormMode::Edit).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["employeeNumber"], "E-001");
        assert_eq!(json["salary"], serde_json::json!(12500.0));
    }

    #[test]
    fn edit_payload_keeps_new_password() {
        let mut draft = EmployeeDraft::from(&sample_employee());
        draft.set("password", "s3cret").unwrap();
        let payload = EmployeePayload::from_draft(&draft, FormMode::Edit).unwrap();
        assert_eq!(payload.password.as_deref(), Some("s3cret"));
    }

    #[test]
    fn rejects_non_numeric_salary() {
        let mut draft = EmployeeDraft::default();
        draft.set("salary", "lots").unwrap();
        assert!(matches!(
            EmployeePayload::from_draft(&draft, FormMode::Create),
            Err(ConsoleError::Validation(_))
        ));
    }

    #[test]
    fn password_required_only_on_create() {
        let draft = EmployeeDraft::from(&sample_employee());
        assert!(draft.check_required(FormMode::Edit).is_ok());
        assert!(draft.check_required(FormMode::Create).is_err());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let mut tier = Tier::default();
        assert!(tier.set("tierColour", "red").is_err());
        tier.set("tierName", "Gold").unwrap();
        assert_eq!(tier.tier_name, "Gold");
    }
}
