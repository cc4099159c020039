//! Serializable views for renderers
//!
//! The hierarchy mirrors the radial layout: all switches at the root,
//! then one node per switch, then one per port holding its endpoints.

use super::{Direction, FlowGraph};
use crate::flow::{Port, SwitchRole, TagSet};
use serde::Serialize;

const ROOT_KEY: &str = "whole switches";

#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub key: &'static str,
    pub switches: Vec<SwitchView>,
    pub paths: Vec<PathView>,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwitchView {
    pub switch: SwitchRole,
    pub ports: Vec<PortView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortView {
    pub port: Port,
    pub endpoints: Vec<EndpointView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointView {
    pub name: String,
    pub switch: SwitchRole,
    pub port: Port,
    pub direction: Direction,
    pub flow_index: usize,
    pub source_port: Port,
    pub target_port: Option<Port>,
    pub tags: TagSet,
    pub rule: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathView {
    pub index: usize,
    pub source: String,
    pub target: String,
    pub flow_index: Option<usize>,
    pub tags: TagSet,
}

/// One row of the rule preview table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowRow {
    pub switch: SwitchRole,
    pub index: usize,
    pub tags: String,
    pub rule: String,
}

impl FlowGraph {
    pub fn view(&self) -> GraphView {
        let set = self.endpoint_set();

        let switches = self
            .groups()
            .iter()
            .map(|(&role, ports)| SwitchView {
                switch: role,
                ports: ports
                    .iter()
                    .map(|(&port, ids)| PortView {
                        port,
                        endpoints: ids
                            .iter()
                            .filter_map(|&id| set.get(id))
                            .map(|ep| EndpointView {
                                name: ep.key().to_string(),
                                switch: ep.role,
                                port: ep.port,
                                direction: ep.direction,
                                flow_index: ep.flow_index,
                                source_port: ep.port,
                                target_port: ep.peer_port,
                                tags: ep.tags.clone(),
                                rule: self
                                    .record_of(ep)
                                    .map(|r| r.rule_text.clone())
                                    .unwrap_or_default(),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let paths = self
            .paths()
            .iter()
            .map(|path| PathView {
                index: path.index,
                source: path.source.name(set),
                target: path.target.name(set),
                flow_index: path.flow_index(),
                tags: path.tags.clone(),
            })
            .collect();

        GraphView {
            key: ROOT_KEY,
            switches,
            paths,
            issues: self.issues().iter().map(ToString::to_string).collect(),
        }
    }

    /// One row per rule, in index order
    pub fn table(&self) -> Vec<FlowRow> {
        self.records()
            .iter()
            .map(|record| FlowRow {
                switch: record.switch_role,
                index: record.index,
                tags: self
                    .flow_tags(record.index)
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                rule: record.rule_text.clone(),
            })
            .collect()
    }

    /// Rows whose tags contain `tag` exactly
    pub fn table_with_tag(&self, tag: &str) -> Vec<FlowRow> {
        self.table()
            .into_iter()
            .filter(|row| row.tags.split(' ').any(|t| t == tag))
            .collect()
    }
}
