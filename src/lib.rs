//! Flowpath - OpenFlow flow table connectivity graph
//!
//! Parses `dump-flows` text from a spine (ssw) and a pod (psw) switch,
//! tags every rule with its direction and endpoint identity, and assembles
//! the intra- and inter-switch paths a diagram renderer draws.

pub mod config;
pub mod error;
pub mod flow;
pub mod graph;
pub mod pipeline;
pub mod telemetry;

pub use error::{Error, Result};
pub use pipeline::build_graph;
