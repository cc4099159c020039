//! Configuration types

use crate::flow::Port;
use crate::telemetry::LogConfig;
use serde::{Deserialize, Serialize};

/// Port that links the spine and pod switches on both sides
pub const DEFAULT_INTER_SWITCH_PORT: u32 = 1;

/// User-defined configuration (flowpath.toml)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub topology: Topology,
    #[serde(default)]
    pub logging: LogConfig,
}

/// Fixed two-switch test topology.
///
/// Tester and testee hang off edge ports; the spine and pod switches are
/// joined by a single trunk on `inter_switch_port` of each switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Topology {
    pub inter_switch_port: u32,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            inter_switch_port: DEFAULT_INTER_SWITCH_PORT,
        }
    }
}

impl Topology {
    pub fn new(inter_switch_port: u32) -> Self {
        Self { inter_switch_port }
    }

    /// The trunk port as a graph port
    pub fn trunk(&self) -> Port {
        Port::Number(self.inter_switch_port)
    }

    pub fn is_trunk(&self, port: u32) -> bool {
        port == self.inter_switch_port
    }

    /// Edge ports face the tester or testee. Port 0 is never a real port.
    pub fn is_edge(&self, port: u32) -> bool {
        port != 0 && !self.is_trunk(port)
    }
}
