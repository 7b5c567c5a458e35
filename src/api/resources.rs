//! Per-entity REST bindings.
//!
//! A [`Resource`] ties one entity to its base path, record schema, dialog draft
//! and request body. [`ResourceClient`] then provides the five REST calls for
//! any resource:
//!
//! | Call | Request |
//! |---|---|
//! | list | `GET /{path}?pageNumber&pageSize` |
//! | get | `GET /{path}/{id}` |
//! | create | `POST /{path}` |
//! | update | `PUT /{path}` (body carries identity) |
//! | delete | `DELETE /{path}/{id}` |

use crate::api::client::ApiClient;
use crate::domain::error::Result;
use crate::domain::form::{FormDraft, FormMode};
use crate::domain::page::Page;
use crate::domain::records::{Department, Employee, EmployeeDraft, EmployeePayload, Location, Tier};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Binding of one managed entity to the REST contract.
pub trait Resource: Send + Sync + 'static {
    /// Read model parsed from list and get responses.
    type Record: DeserializeOwned + Clone + Debug + Send + Sync;
    /// Dialog state.
    type Draft: FormDraft;
    /// Create/update request body.
    type Payload: Serialize + Debug + Send + Sync;

    /// Path under the API root, without slashes.
    const PATH: &'static str;
    /// Singular lowercase noun used in banners ("Failed to save employee").
    const NOUN: &'static str;
    /// Plural lowercase noun used in banners ("Failed to fetch employees").
    const PLURAL: &'static str;
    /// Screen heading.
    const TITLE: &'static str;

    /// The record's business code.
    fn identity(record: &Self::Record) -> &str;

    /// Draft pre-filled from `record` for editing. Write-only fields stay blank.
    fn edit_draft(record: &Self::Record) -> Self::Draft;

    /// Turns a draft into a request body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ConsoleError::Validation`] when a required field
    /// is blank or a value cannot be parsed.
    fn payload(draft: &Self::Draft, mode: FormMode) -> Result<Self::Payload>;
}

/// Employees at `/employee`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Employees;

/// Departments at `/department`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Departments;

/// Locations at `/location`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locations;

/// Tiers at `/tier`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tiers;

impl Resource for Employees {
    type Record = Employee;
    type Draft = EmployeeDraft;
    type Payload = EmployeePayload;

    const PATH: &'static str = "employee";
    const NOUN: &'static str = "employee";
    const PLURAL: &'static str = "employees";
    const TITLE: &'static str = "Employee Management";

    fn identity(record: &Employee) -> &str {
        &record.employee_number
    }

    fn edit_draft(record: &Employee) -> EmployeeDraft {
        EmployeeDraft::from(record)
    }

    fn payload(draft: &EmployeeDraft, mode: FormMode) -> Result<EmployeePayload> {
        draft.check_required(mode)?;
        EmployeePayload::from_draft(draft, mode)
    }
}

/// Entities whose record, draft and payload are the same all-text struct.
macro_rules! plain_resource {
    ($marker:ty, $record:ty, $path:literal, $noun:literal, $plural:literal, $title:literal, $id:ident, [$($field:ident),*]) => {
        impl Resource for $marker {
            type Record = $record;
            type Draft = $record;
            type Payload = $record;

            const PATH: &'static str = $path;
            const NOUN: &'static str = $noun;
            const PLURAL: &'static str = $plural;
            const TITLE: &'static str = $title;

            fn identity(record: &$record) -> &str {
                &record.$id
            }

            fn edit_draft(record: &$record) -> $record {
                record.clone()
            }

            fn payload(draft: &$record, mode: FormMode) -> Result<$record> {
                draft.check_required(mode)?;
                Ok(<$record>::from_trimmed(draft))
            }
        }

        impl $record {
            fn from_trimmed(draft: &Self) -> Self {
                Self {
                    $($field: draft.$field.trim().to_string(),)*
                }
            }
        }
    };
}

plain_resource!(Departments, Department, "department", "department", "departments", "Department Management",
    department_code, [department_code, department_name]);
plain_resource!(Locations, Location, "location", "location", "locations", "Location Management",
    location_code, [location_code, location_name, location_address]);
plain_resource!(Tiers, Tier, "tier", "tier", "tiers", "Tier Management",
    tier_code, [tier_code, tier_name]);

/// REST calls for one resource.
#[derive(Debug, Clone)]
pub struct ResourceClient<R: Resource> {
    client: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<R> {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.client
    }

    /// Fetches one page. `page` is zero-based.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn list(&self, page: u32, page_size: u32) -> Result<Page<R::Record>> {
        let query = [
            ("pageNumber", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        self.client.get(R::PATH, &query).await
    }

    /// Fetches one record by identity.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn get(&self, id: &str) -> Result<R::Record> {
        self.client.get(&format!("{}/{id}", R::PATH), &[]).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::post`].
    pub async fn create(&self, payload: &R::Payload) -> Result<()> {
        self.client.post(R::PATH, payload).await
    }

    /// Updates the record whose identity is carried in `payload`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::put`].
    pub async fn update(&self, payload: &R::Payload) -> Result<()> {
        self.client.put(R::PATH, payload).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::delete`].
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete(&format!("{}/{id}", R::PATH)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_payload_trims_and_checks() {
        let mut draft = Tier::default();
        draft.set("tierCode", " GOLD ").unwrap();
        assert!(Tiers::payload(&draft, FormMode::Create).is_err());

        draft.set("tierName", "Gold ").unwrap();
        let payload = Tiers::payload(&draft, FormMode::Edit).unwrap();
        assert_eq!(payload.tier_code, "GOLD");
        assert_eq!(payload.tier_name, "Gold");
    }

    #[test]
    fn employee_edit_draft_is_blank_on_password() {
        let record: Employee = serde_json::from_str(
            r#"{"employeeNumber":"E-9","employeeName":"Bo","email":"bo@x","password":"hash"}"#,
        )
        .unwrap();
        let draft = Employees::edit_draft(&record);
        assert!(draft.password.is_empty());
        assert_eq!(Employees::identity(&record), "E-9");
    }
}
