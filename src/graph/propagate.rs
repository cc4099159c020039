//! MAC propagation
//!
//! Rules entering on the trunk port usually match the destination host,
//! so their MAC says who sits behind the edge port they output to. That
//! MAC is copied onto the endpoints at that edge port which have none.
//! Rules entering a pod edge port are then marked as flooding.
//!
//! Both steps are a single bounded pass over the port groups. Running
//! them again on propagated data changes nothing.

use super::{Direction, EndpointId, EndpointSet};
use crate::config::Topology;
use crate::flow::{FlowRecord, Port, SwitchRole, Tag};
use tracing::debug;

/// What a propagation pass changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationReport {
    /// Rules whose endpoints learned a MAC from a trunk rule
    pub macs_filled: usize,
    /// Pod edge rules newly marked as flooding
    pub floods_marked: usize,
}

impl PropagationReport {
    pub fn is_empty(&self) -> bool {
        self.macs_filled == 0 && self.floods_marked == 0
    }
}

/// Back-fill MACs from the trunk and mark pod edge floods.
///
/// `records` must be indexed so that `records[i].index == i`.
pub fn propagate(
    records: &mut [FlowRecord],
    endpoints: &mut EndpointSet,
    topology: &Topology,
) -> PropagationReport {
    let mut report = PropagationReport::default();

    for role in SwitchRole::ALL {
        report.macs_filled += fill_macs_from_trunk(records, endpoints, role, topology);
    }
    report.floods_marked = mark_pod_edge_floods(records, endpoints, topology);

    report
}

/// (output port, MAC) for every non-flood trunk rule with a parsed MAC
fn trunk_fanouts(
    records: &[FlowRecord],
    endpoints: &EndpointSet,
    role: SwitchRole,
    topology: &Topology,
) -> Vec<(Port, String)> {
    endpoints
        .group(role, topology.trunk())
        .iter()
        .filter_map(|&id| {
            let endpoint = endpoints.get(id)?;
            if endpoint.direction != Direction::Source {
                return None;
            }
            let record = records.get(endpoint.flow_index)?;
            if record.is_flood {
                return None;
            }
            Some((record.output?, record.mac.clone()?))
        })
        .collect()
}

fn fill_macs_from_trunk(
    records: &[FlowRecord],
    endpoints: &mut EndpointSet,
    role: SwitchRole,
    topology: &Topology,
) -> usize {
    let mut filled = 0;

    for (port, mac) in trunk_fanouts(records, endpoints, role, topology) {
        let group: Vec<EndpointId> = endpoints.group(role, port).to_vec();
        for id in group {
            let Some(endpoint) = endpoints.get(id) else {
                continue;
            };
            // Parsed or already learned MACs are never overwritten
            if endpoint.mac.is_some() {
                continue;
            }
            let flow_index = endpoint.flow_index;
            set_rule_mac(endpoints, flow_index, &mac);
            debug!("{} port {}: rule {} learned {}", role, port, flow_index, mac);
            filled += 1;
        }
    }

    filled
}

/// Give both ends of a rule the learned MAC and its tag
fn set_rule_mac(endpoints: &mut EndpointSet, flow_index: usize, mac: &str) {
    let siblings = endpoints.of_flow(flow_index).to_vec();
    for id in siblings {
        if let Some(endpoint) = endpoints.get_mut(id) {
            endpoint.mac.get_or_insert_with(|| mac.to_string());
            endpoint.tags.insert(Tag::mac(mac));
        }
    }
}

fn mark_pod_edge_floods(
    records: &mut [FlowRecord],
    endpoints: &mut EndpointSet,
    topology: &Topology,
) -> usize {
    let trunk = topology.trunk();
    let edge_sources: Vec<EndpointId> = endpoints
        .groups()
        .get(&SwitchRole::Pod)
        .into_iter()
        .flat_map(|ports| ports.iter())
        .filter(|(port, _)| **port != trunk)
        .flat_map(|(_, ids)| ids.iter().copied())
        .filter(|&id| {
            endpoints
                .get(id)
                .is_some_and(|ep| ep.direction == Direction::Source)
        })
        .collect();

    let mut marked = 0;
    for id in edge_sources {
        let Some(flow_index) = endpoints.get(id).map(|ep| ep.flow_index) else {
            continue;
        };
        let Some(record) = records.get_mut(flow_index) else {
            continue;
        };
        if record.flood_mark {
            continue;
        }
        record.flood_mark = true;

        let siblings = endpoints.of_flow(flow_index).to_vec();
        for sibling in siblings {
            if let Some(endpoint) = endpoints.get_mut(sibling) {
                endpoint.tags.insert(Tag::Flood);
            }
        }
        debug!("psw rule {} marked as flooding", flow_index);
        marked += 1;
    }

    marked
}
