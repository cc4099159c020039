//! Connectivity graph
//!
//! Endpoints, MAC propagation, paths, and the assembled [`FlowGraph`] a
//! renderer reads from.

mod endpoint;
mod path;
mod propagate;
mod view;

pub use endpoint::{Direction, Endpoint, EndpointId, EndpointKey, EndpointSet, PortGroups};
pub use path::{
    assemble, Anchor, IncompletePathReference, MissingTarget, Path, PathAssembly, PathKind,
};
pub use propagate::{propagate, PropagationReport};
pub use view::{EndpointView, FlowRow, GraphView, PathView, PortView, SwitchView};

use crate::config::Topology;
use crate::flow::{FlowRecord, TagSet};

/// Result of one pipeline pass. Read-only once built.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    topology: Topology,
    records: Vec<FlowRecord>,
    endpoints: EndpointSet,
    paths: Vec<Path>,
    issues: Vec<IncompletePathReference>,
    propagation: PropagationReport,
}

impl FlowGraph {
    pub(crate) fn new(
        topology: Topology,
        records: Vec<FlowRecord>,
        endpoints: EndpointSet,
        assembly: PathAssembly,
        propagation: PropagationReport,
    ) -> Self {
        Self {
            topology,
            records,
            endpoints,
            paths: assembly.paths,
            issues: assembly.issues,
            propagation,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Every parsed rule, including those that produced no endpoint
    pub fn records(&self) -> &[FlowRecord] {
        &self.records
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        self.endpoints.endpoints()
    }

    pub fn endpoint(&self, id: EndpointId) -> Option<&Endpoint> {
        self.endpoints.get(id)
    }

    pub fn endpoint_set(&self) -> &EndpointSet {
        &self.endpoints
    }

    /// The rule an endpoint belongs to
    pub fn record_of(&self, endpoint: &Endpoint) -> Option<&FlowRecord> {
        self.records.get(endpoint.flow_index)
    }

    pub fn groups(&self) -> &PortGroups {
        self.endpoints.groups()
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Unresolved path references collected over the whole pass
    pub fn issues(&self) -> &[IncompletePathReference] {
        &self.issues
    }

    pub fn propagation(&self) -> PropagationReport {
        self.propagation
    }

    /// Endpoints whose tags contain `tag` exactly
    pub fn endpoints_with_tag(&self, tag: &str) -> Vec<EndpointId> {
        self.endpoints
            .endpoints()
            .iter()
            .enumerate()
            .filter(|(_, ep)| ep.tags.contains_str(tag))
            .map(|(id, _)| id)
            .collect()
    }

    /// Tags of a rule after propagation.
    ///
    /// Taken from its first endpoint; rules without endpoints keep their
    /// derived tags.
    pub fn flow_tags(&self, flow_index: usize) -> Option<&TagSet> {
        if let Some(ep) = self
            .endpoints
            .of_flow(flow_index)
            .first()
            .and_then(|&id| self.endpoints.get(id))
        {
            return Some(&ep.tags);
        }
        self.records.get(flow_index).map(|r| &r.tags)
    }

    /// Rules whose tags contain `tag` exactly
    pub fn records_with_tag(&self, tag: &str) -> Vec<&FlowRecord> {
        self.records
            .iter()
            .filter(|r| self.flow_tags(r.index).is_some_and(|t| t.contains_str(tag)))
            .collect()
    }
}
