//! Endpoint builder
//!
//! Each rule has two ends: a source at its `in_port` and a target at its
//! output. Endpoints are kept in an arena, indexed by name and grouped by
//! switch and port for the propagation and path passes.

use crate::flow::{FlowRecord, Port, SwitchRole, TagSet};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::debug;

/// Index into [`EndpointSet`]
pub type EndpointId = usize;

/// switch -> port -> endpoints, spine first, ports ascending with FLOOD last
pub type PortGroups = BTreeMap<SwitchRole, BTreeMap<Port, Vec<EndpointId>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Source,
    Target,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Source => f.write_str("source"),
            Direction::Target => f.write_str("target"),
        }
    }
}

/// Exact identity of an endpoint.
///
/// Displays as the node name renderers address it by, e.g.
/// `ssw_port_2_flow_0_source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointKey {
    pub role: SwitchRole,
    pub port: Port,
    pub flow_index: usize,
    pub direction: Direction,
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_port_{}_flow_{}_{}",
            self.role, self.port, self.flow_index, self.direction
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub role: SwitchRole,
    pub port: Port,
    pub direction: Direction,
    /// Index of the owning [`FlowRecord`]
    pub flow_index: usize,
    /// Port at the other end of the same rule
    pub peer_port: Option<Port>,
    /// Host MAC behind this end, parsed or learned over the trunk
    pub mac: Option<String>,
    pub tags: TagSet,
}

impl Endpoint {
    fn new(record: &FlowRecord, port: Port, direction: Direction, peer_port: Option<Port>) -> Self {
        Self {
            role: record.switch_role,
            port,
            direction,
            flow_index: record.index,
            peer_port,
            mac: record.mac.clone(),
            tags: record.tags.clone(),
        }
    }

    pub fn key(&self) -> EndpointKey {
        EndpointKey {
            role: self.role,
            port: self.port,
            flow_index: self.flow_index,
            direction: self.direction,
        }
    }

    /// Key of the endpoint this one should connect to
    pub fn peer_key(&self) -> Option<EndpointKey> {
        let direction = match self.direction {
            Direction::Source => Direction::Target,
            Direction::Target => Direction::Source,
        };
        self.peer_port.map(|port| EndpointKey {
            role: self.role,
            port,
            flow_index: self.flow_index,
            direction,
        })
    }
}

/// All endpoints of one pipeline pass
#[derive(Debug, Clone, Default)]
pub struct EndpointSet {
    endpoints: Vec<Endpoint>,
    by_key: HashMap<EndpointKey, EndpointId>,
    by_flow: HashMap<usize, Vec<EndpointId>>,
    groups: PortGroups,
}

impl EndpointSet {
    /// Build endpoints for every record, in record order.
    ///
    /// A record yields a source endpoint when it has an `in_port` and a
    /// target endpoint when it has an output. Records with neither are
    /// skipped; they remain available for tabular display.
    pub fn build(records: &[FlowRecord]) -> Self {
        let mut set = Self::default();

        for record in records {
            if !record.has_ports() {
                debug!(
                    "skipping rule {} on {}: no in_port or output",
                    record.index, record.switch_role
                );
                continue;
            }

            if let Some(in_port) = record.in_port {
                set.insert(Endpoint::new(
                    record,
                    Port::Number(in_port),
                    Direction::Source,
                    record.output,
                ));
            }
            if let Some(output) = record.output {
                set.insert(Endpoint::new(
                    record,
                    output,
                    Direction::Target,
                    record.in_port.map(Port::Number),
                ));
            }
        }

        set
    }

    fn insert(&mut self, endpoint: Endpoint) -> EndpointId {
        let id = self.endpoints.len();
        self.by_key.insert(endpoint.key(), id);
        self.by_flow.entry(endpoint.flow_index).or_default().push(id);
        self.groups
            .entry(endpoint.role)
            .or_default()
            .entry(endpoint.port)
            .or_default()
            .push(id);
        self.endpoints.push(endpoint);
        id
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn get(&self, id: EndpointId) -> Option<&Endpoint> {
        self.endpoints.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: EndpointId) -> Option<&mut Endpoint> {
        self.endpoints.get_mut(id)
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Exact-match lookup by identity
    pub fn lookup(&self, key: &EndpointKey) -> Option<EndpointId> {
        self.by_key.get(key).copied()
    }

    /// Endpoints owned by one record (zero, one or two)
    pub fn of_flow(&self, flow_index: usize) -> &[EndpointId] {
        self.by_flow
            .get(&flow_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn groups(&self) -> &PortGroups {
        &self.groups
    }

    /// Endpoints grouped at one switch port, in record order
    pub fn group(&self, role: SwitchRole, port: Port) -> &[EndpointId] {
        self.groups
            .get(&role)
            .and_then(|ports| ports.get(&port))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
