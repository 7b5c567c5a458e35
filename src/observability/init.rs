//! Subscriber setup.

use super::exporter;
use super::rotating::RotatingFile;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service name recorded on every trace.
pub const SERVICE_NAME: &str = "opsconsole";

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "opsconsole-otlp.json";

/// Installs the global subscriber.
///
/// Spans at or above `config.trace_level` (default `info`) go to
/// `<data dir>/opsconsole-otlp.json`. With `verbose`, events are also printed
/// to stderr.
///
/// Tracing is best effort: if the data directory cannot be created, nothing
/// is installed. Calling this again after a subscriber is installed has no
/// effect.
///
/// Returns the trace file path when the file exporter was installed.
pub fn init_tracing(config: &Config, verbose: bool) -> Option<PathBuf> {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = config.data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;

    let trace_file = data_dir.join(TRACE_FILE_NAME);
    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = exporter::file_provider(RotatingFile::new(trace_file.clone()), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let console_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .with(console_layer)
        .try_init()
        .ok()?;

    Some(trace_file)
}
