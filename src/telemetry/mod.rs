//! Telemetry module.
//!
//! Provides logging configuration and initialization. Library code logs
//! through `tracing`; binaries call [`init_logging`] once at startup.

mod logging;

pub use logging::{init_logging, LogConfig};
