//! Trace export to a local file.
//!
//! `tracing` spans are bridged into OpenTelemetry and written as OTLP JSON
//! lines, one document per finished span:
//!
//! ```text
//! tracing → tracing-opentelemetry → OtlpFileExporter → RotatingFile
//! ```
//!
//! The file lives at `<data dir>/opsconsole-otlp.json`, rotates at 10 MB and
//! keeps three backups. Request spans carry method, path, status and elapsed
//! time; credentials and tokens are never recorded.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`exporter`]: OTLP JSON span exporter
//! - [`rotating`]: size-capped file with numbered backups
//!
//! # Example
//!
//! ```no_run
//! use opsconsole::observability::init_tracing;
//! use opsconsole::Config;
//!
//! let config = Config::default();
//! if let Some(path) = init_tracing(&config, false) {
//!     tracing::info!(path = %path.display(), "tracing to file");
//! }
//! ```

pub mod exporter;
pub mod init;
pub mod rotating;

pub use init::init_tracing;
