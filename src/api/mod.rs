//! Backend access.
//!
//! Everything that leaves the process goes through [`ApiClient`]. The other
//! modules are thin typed bindings on top of it.
//!
//! # Modules
//!
//! - `client`: bearer auth, status mapping, 401 interception
//! - `auth`: login and logout
//! - `resources`: the four managed entities
//! - `reports`: read-only analytics
//! - `audit`: audit log history

pub mod audit;
pub mod auth;
pub mod client;
pub mod reports;
pub mod resources;

pub use client::ApiClient;
pub use reports::Report;
pub use resources::{Departments, Employees, Locations, Resource, ResourceClient, Tiers};
