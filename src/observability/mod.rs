//! Span export to a local OTLP JSON file.
//!
//! The plugin runs in a WASM sandbox with no collector to talk to, so spans
//! are written as one OTLP document per line into the plugin data directory:
//!
//! ```text
//! tracing → tracing-opentelemetry → TracerProvider → FileSpanExporter → /data/animescope-otlp.json
//! ```
//!
//! The file rotates at 10 MB and keeps three backups. The span level comes
//! from the `trace_level` plugin option and defaults to `info`.

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;

/// `service.name` resource attribute and instrumentation scope.
pub const SERVICE_NAME: &str = "animescope";
