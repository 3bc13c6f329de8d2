//! Observability for the Justice backend: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
