//! Observability subsystem.
//!
//! Structured logging via the tracing crate; request IDs are attached by
//! the HTTP middleware and flow through every log line.

pub mod logging;
