//! opsconsole: an administrative console for the organisational records service.
//!
//! The console manages employees, departments, locations and tiers through a
//! paginated REST backend, shows three salary analytics reports and browses
//! the backend's API audit log. A session token obtained at login is attached
//! to every request; a 401 from any call ends the session.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Shell (main.rs)                                    │  ← clap CLI
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Screen controllers
//! │  - Generic CRUD screen per entity                   │
//! │  - Reports, audit log, overview                     │
//! │  - Routes and session gating                        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Session       │
//! │ (ui/)         │   │ (api/)        │   │ (session/)    │
//! │ - View models │   │ - HTTP client │   │ - Token state │
//! │ - Tables      │   │ - Resources   │   │ - JSON file   │
//! │ - Theming     │   │ - Reports     │   │ - 401 expiry  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Records, envelopes, audit filter (domain/)       │
//! │  - Per-user directories (infrastructure/)           │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OTLP JSON trace file                             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: HTTP client, resource and report endpoints
//! - [`app`]: Screen controllers and routing
//! - [`domain`]: Wire schemas, drafts and errors
//! - [`infrastructure`]: Data and config directories
//! - [`observability`]: Tracing to a rotating OTLP file
//! - [`session`]: Session state and its persistence
//! - [`ui`]: View models, formatting and text rendering
//!
//! # Configuration
//!
//! Settings come from, lowest precedence first: built-in defaults,
//! `~/.config/opsconsole/config.toml`, `OPSCONSOLE_*` environment variables and
//! command-line flags.
//!
//! ```toml
//! api_url = "https://records.example.com/api"
//! request_timeout_secs = 15
//! page_size = 25
//! audit_page_size = 50
//! trace_level = "debug"
//! color = true
//! ```
//!
//! # Example
//!
//! ```no_run
//! use opsconsole::api::{ApiClient, Employees};
//! use opsconsole::app::CrudController;
//! use opsconsole::session::{JsonSessionStorage, SessionStore};
//! use opsconsole::Config;
//! use std::sync::Arc;
//!
//! # async fn run() -> opsconsole::Result<()> {
//! let config = Config::load(None)?;
//! let storage = JsonSessionStorage::in_dir(&config.data_dir())?;
//! let session = Arc::new(SessionStore::bootstrap(Box::new(storage)));
//! let client = ApiClient::new(&config.api_url, config.request_timeout(), session)?;
//!
//! let mut employees = CrudController::<Employees>::new(client, config.page_size);
//! employees.refresh().await;
//! if let Some(banner) = employees.error_message() {
//!     eprintln!("{banner}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod session;
pub mod ui;

pub use domain::{ConsoleError, Result};
pub use ui::Theme;

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

/// Environment variable overriding [`Config::api_url`].
pub const ENV_API_URL: &str = "OPSCONSOLE_API_URL";
/// Environment variable overriding [`Config::data_dir`].
pub const ENV_DATA_DIR: &str = "OPSCONSOLE_DATA_DIR";
/// Environment variable overriding [`Config::trace_level`].
pub const ENV_TRACE_LEVEL: &str = "OPSCONSOLE_TRACE_LEVEL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_AUDIT_PAGE_SIZE: u32 = 20;

/// Console configuration.
///
/// # Example
///
/// ```
/// use opsconsole::Config;
///
/// let config = Config::from_toml_str("api_url = \"http://records:9000/api\"\npage_size = 25").unwrap();
/// assert_eq!(config.api_url, "http://records:9000/api");
/// assert_eq!(config.page_size, 25);
/// assert_eq!(config.audit_page_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL; endpoint paths are appended to it.
    pub api_url: String,

    /// Per-request timeout in seconds. Default: 30
    pub request_timeout_secs: u64,

    /// Directory for `session.json` and the trace log.
    ///
    /// Default: `~/.local/share/opsconsole`
    pub data_dir: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `opsconsole=trace`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Rows per page on entity screens. Default: 10
    pub page_size: u32,

    /// Rows per page on the audit log screen. Default: 20
    pub audit_page_size: u32,

    /// Whether tables are colored. Default: true
    pub color: bool,

    /// Path to a TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: None,
            trace_level: None,
            page_size: DEFAULT_PAGE_SIZE,
            audit_page_size: DEFAULT_AUDIT_PAGE_SIZE,
            color: true,
            theme_file: None,
        }
    }
}

impl Config {
    /// Loads defaults, then the config file, then environment overrides.
    ///
    /// `path` defaults to `<config dir>/opsconsole/config.toml`; a missing
    /// file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] if the file exists but is not valid TOML,
    /// or [`ConsoleError::Io`] if it cannot be read.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map_or_else(infrastructure::config_file, Path::to_path_buf);

        let mut config = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config file");
                Self::from_toml_str(&contents)?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(e.into()),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses a TOML document.
    ///
    /// Unknown keys are ignored. Numeric settings that are not positive
    /// integers keep their default.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Config`] if `contents` is not valid TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| ConsoleError::Config(e.to_string()))?;
        Ok(Self::from_table(&table))
    }

    fn from_table(table: &toml::Table) -> Self {
        let defaults = Self::default();
        let text = |key: &str| table.get(key).and_then(toml::Value::as_str).map(String::from);

        Self {
            api_url: text("api_url").unwrap_or(defaults.api_url),
            request_timeout_secs: positive(table, "request_timeout_secs")
                .unwrap_or(defaults.request_timeout_secs),
            data_dir: text("data_dir").map(PathBuf::from),
            trace_level: text("trace_level"),
            page_size: positive(table, "page_size")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.page_size),
            audit_page_size: positive(table, "audit_page_size")
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(defaults.audit_page_size),
            color: table
                .get("color")
                .and_then(toml::Value::as_bool)
                .unwrap_or(defaults.color),
            theme_file: text("theme_file"),
        }
    }

    /// Applies `OPSCONSOLE_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup(ENV_TRACE_LEVEL) {
            self.trace_level = Some(level);
        }
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(infrastructure::data_dir)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Theme for rendering: plain when color is off, the theme file when set
    /// and readable, the built-in palette otherwise.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if !self.color {
            return Theme::plain();
        }

        self.theme_file.as_ref().map_or_else(Theme::default, |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        })
    }
}

/// Reads `key` as a positive integer, accepting quoted numbers.
fn positive(table: &toml::Table, key: &str) -> Option<u64> {
    let value = table.get(key)?;
    let parsed = match value {
        toml::Value::Integer(n) => u64::try_from(*n).ok(),
        toml::Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .filter(|n| *n > 0);

    if parsed.is_none() {
        tracing::debug!(key, value = %value, "ignoring malformed numeric setting");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn malformed_numbers_fall_back() {
        let config = Config::from_toml_str(
            "page_size = \"many\"\naudit_page_size = 0\nrequest_timeout_secs = \"5\"",
        )
        .unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.audit_page_size, 20);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = Config::from_toml_str("api_url = ").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(_)));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::from_toml_str("api_url = \"http://file/api\"").unwrap();
        config.apply_env(|key| match key {
            ENV_API_URL => Some("http://env/api".to_string()),
            ENV_TRACE_LEVEL => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://env/api");
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn color_off_yields_plain_theme() {
        let config = Config {
            color: false,
            ..Config::default()
        };
        assert_eq!(config.theme().paint("x", ui::format::Tone::Error), "x");
    }
}
