//! One full pass: parse, tag, build endpoints, propagate, assemble.
//!
//! Every call starts from empty state. The input is small (tens to low
//! hundreds of rules), so there is no incremental path: new dump text
//! means a new pass.

use crate::config::Topology;
use crate::flow::{parse_dumps, tag_records};
use crate::graph::{assemble, propagate, EndpointSet, FlowGraph};
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

/// Build the graph from the spine and pod dump text
pub fn build_graph(spine_dump: &str, pod_dump: &str, topology: &Topology) -> FlowGraph {
    let mut records = parse_dumps(spine_dump, pod_dump);
    tag_records(&mut records, topology);

    let mut endpoints = EndpointSet::build(&records);
    let propagation = propagate(&mut records, &mut endpoints, topology);
    let assembly = assemble(&records, &endpoints, topology);

    info!(
        "built graph: {} rules, {} endpoints, {} paths, {} MACs learned, {} floods marked, {} incomplete",
        records.len(),
        endpoints.len(),
        assembly.paths.len(),
        propagation.macs_filled,
        propagation.floods_marked,
        assembly.issues.len()
    );

    FlowGraph::new(*topology, records, endpoints, assembly, propagation)
}

/// Read both dumps from disk and build the graph
pub fn build_graph_from_files<P: AsRef<Path>>(
    spine_path: P,
    pod_path: P,
    topology: &Topology,
) -> Result<FlowGraph> {
    let spine = read_dump(spine_path)?;
    let pod = read_dump(pod_path)?;
    Ok(build_graph(&spine, &pod, topology))
}

/// Read a dump file.
///
/// Invalid UTF-8 is replaced rather than rejected; a garbled byte only
/// affects the line it sits on.
pub fn read_dump<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = std::fs::read(path).map_err(Error::Io)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
