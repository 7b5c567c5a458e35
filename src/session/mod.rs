//! Session layer: who is signed in, and where that survives restarts.
//!
//! # Modules
//!
//! - `store`: the [`SessionStore`] state machine shared by every controller
//! - `storage`: [`SessionStorage`] trait for the persisted document
//! - `json`: JSON file backend with atomic writes
//! - `memory`: in-process backend
//! - `models`: persisted document and identity types

pub mod json;
pub mod memory;
pub mod models;
pub mod storage;
pub mod store;

pub use json::JsonSessionStorage;
pub use memory::MemorySessionStorage;
pub use models::{Identity, PersistedSession};
pub use storage::SessionStorage;
pub use store::{LoginOutcome, Session, SessionState, SessionStore, DEFAULT_LOGIN_FAILURE};
