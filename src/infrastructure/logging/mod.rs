//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber, written to stderr
//! so command output on stdout stays machine-readable.

pub mod logger;

pub use logger::LoggerImpl;
