//! Filesystem and environment lookups.

pub mod paths;

pub use paths::{config_dir, config_file, data_dir};
