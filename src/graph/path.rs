//! Path assembly
//!
//! One intra-switch path per rule (source endpoint to target endpoint),
//! spine groups first, then pod, then the fixed trunk between the two
//! switches. Indexes are assigned once everything is concatenated.

use super::{Direction, EndpointId, EndpointKey, EndpointSet};
use crate::config::Topology;
use crate::flow::{FlowRecord, Port, SwitchRole, TagSet};
use std::fmt;
use tracing::warn;

/// One end of a path.
///
/// The trunk path has no owning rule, so its ends are switch ports
/// without an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub role: SwitchRole,
    pub port: Port,
    pub endpoint: Option<EndpointId>,
}

impl Anchor {
    fn at_endpoint(role: SwitchRole, port: Port, id: EndpointId) -> Self {
        Self {
            role,
            port,
            endpoint: Some(id),
        }
    }

    fn at_port(role: SwitchRole, port: Port) -> Self {
        Self {
            role,
            port,
            endpoint: None,
        }
    }

    /// Node name for endpoint anchors, `<sw>_port_<n>` for bare ports
    pub fn name(&self, endpoints: &EndpointSet) -> String {
        match self.endpoint.and_then(|id| endpoints.get(id)) {
            Some(endpoint) => endpoint.key().to_string(),
            None => format!("{}_port_{}", self.role, self.port),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Derived from one rule
    IntraSwitch { flow_index: usize },
    /// The physical spine-pod trunk
    InterSwitch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub index: usize,
    pub kind: PathKind,
    pub source: Anchor,
    pub target: Anchor,
    pub tags: TagSet,
}

impl Path {
    pub fn flow_index(&self) -> Option<usize> {
        match self.kind {
            PathKind::IntraSwitch { flow_index } => Some(flow_index),
            PathKind::InterSwitch => None,
        }
    }

    pub fn is_inter_switch(&self) -> bool {
        self.kind == PathKind::InterSwitch
    }
}

/// Why a source endpoint could not be connected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingTarget {
    /// The rule has an `in_port` but no output
    NoOutput,
    /// No endpoint carries the expected name. `EndpointSet::build` always
    /// creates both ends of a rule, so this only fires for sets whose
    /// endpoints were edited after building.
    NotFound(EndpointKey),
}

impl fmt::Display for MissingTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingTarget::NoOutput => f.write_str("rule has no output port"),
            MissingTarget::NotFound(key) => write!(f, "no endpoint named {}", key),
        }
    }
}

/// A rule whose path could not be built; the rest of the graph is unaffected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("incomplete path from {from}: {reason} ({rule_text})")]
pub struct IncompletePathReference {
    pub from: EndpointKey,
    pub reason: MissingTarget,
    pub rule_text: String,
}

/// Assembled paths plus every reference that could not be resolved
#[derive(Debug, Clone, Default)]
pub struct PathAssembly {
    pub paths: Vec<Path>,
    pub issues: Vec<IncompletePathReference>,
}

/// Build all paths. Never stops at the first unresolved reference.
pub fn assemble(
    records: &[FlowRecord],
    endpoints: &EndpointSet,
    topology: &Topology,
) -> PathAssembly {
    let mut assembly = PathAssembly::default();

    for (&role, ports) in endpoints.groups() {
        for (&port, ids) in ports {
            for &id in ids {
                let Some(source) = endpoints.get(id) else {
                    continue;
                };
                if source.direction != Direction::Source {
                    continue;
                }

                let resolved = match source.peer_key() {
                    Some(key) => endpoints.lookup(&key).ok_or(MissingTarget::NotFound(key)),
                    None => Err(MissingTarget::NoOutput),
                };

                match resolved {
                    Ok(target_id) => {
                        let target_port = endpoints.get(target_id).map_or(port, |t| t.port);
                        assembly.paths.push(Path {
                            index: 0,
                            kind: PathKind::IntraSwitch {
                                flow_index: source.flow_index,
                            },
                            source: Anchor::at_endpoint(role, port, id),
                            target: Anchor::at_endpoint(role, target_port, target_id),
                            tags: source.tags.clone(),
                        });
                    }
                    Err(reason) => {
                        let rule_text = records
                            .get(source.flow_index)
                            .map(|r| r.rule_text.clone())
                            .unwrap_or_default();
                        let issue = IncompletePathReference {
                            from: source.key(),
                            reason,
                            rule_text,
                        };
                        warn!("{}", issue);
                        assembly.issues.push(issue);
                    }
                }
            }
        }
    }

    assembly.paths.push(inter_switch_path(topology));

    for (index, path) in assembly.paths.iter_mut().enumerate() {
        path.index = index;
    }

    assembly
}

/// The trunk path, present in every assembly exactly once
fn inter_switch_path(topology: &Topology) -> Path {
    let trunk = topology.trunk();
    Path {
        index: 0,
        kind: PathKind::InterSwitch,
        source: Anchor::at_port(SwitchRole::Spine, trunk),
        target: Anchor::at_port(SwitchRole::Pod, trunk),
        tags: TagSet::new(),
    }
}
