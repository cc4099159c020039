use super::dumps::{NOISY_SPINE, POD, SPINE};
use flowpath::build_graph;
use flowpath::config::Topology;
use flowpath::flow::{derive_tags, parse_dumps, tag_records, SwitchRole};
use flowpath::graph::{propagate, EndpointSet, MissingTarget};

fn data_lines(dump: &str) -> Vec<&str> {
    dump.lines()
        .filter(|l| l.trim_start().to_lowercase().starts_with("cookie"))
        .collect()
}

#[test]
fn test_indexes_dense_in_dump_order() {
    let records = parse_dumps(SPINE, POD);
    let spine_lines = data_lines(SPINE);
    let pod_lines = data_lines(POD);
    assert_eq!(records.len(), spine_lines.len() + pod_lines.len());

    for (i, record) in records.iter().enumerate() {
        assert_eq!(record.index, i);
        let expected_role = if i < spine_lines.len() {
            SwitchRole::Spine
        } else {
            SwitchRole::Pod
        };
        assert_eq!(record.switch_role, expected_role);
    }
}

#[test]
fn test_rule_text_is_verbatim() {
    let records = parse_dumps(SPINE, POD);
    let lines: Vec<&str> = data_lines(SPINE).into_iter().chain(data_lines(POD)).collect();
    for (record, line) in records.iter().zip(lines) {
        assert_eq!(record.rule_text, line);
    }
}

#[test]
fn test_noisy_dump_is_total() {
    let graph = build_graph(NOISY_SPINE, "", &Topology::default());
    let records = graph.records();
    assert_eq!(records.len(), 4);

    // priority=0 actions=drop: no ports, kept for display only
    assert_eq!(records[0].in_port, None);
    assert_eq!(records[0].output, None);
    assert!(graph.endpoint_set().of_flow(0).is_empty());

    // in_port=abc does not parse as a port
    assert_eq!(records[3].in_port, None);
    assert_eq!(records[3].output, None);

    // CONTROLLER action: source without target is reported, not fatal
    assert_eq!(graph.issues().len(), 1);
    assert_eq!(graph.issues()[0].reason, MissingTarget::NoOutput);
    assert_eq!(graph.issues()[0].from.flow_index, 1);

    // the consistent rule still has its path, plus the trunk
    assert_eq!(graph.paths().len(), 2);
    assert_eq!(graph.table().len(), 4);
}

#[test]
fn test_propagation_idempotent_on_sample() {
    let topo = Topology::default();
    let mut records = parse_dumps(SPINE, POD);
    tag_records(&mut records, &topo);
    let mut set = EndpointSet::build(&records);

    let first = propagate(&mut records, &mut set, &topo);
    assert!(!first.is_empty());
    let snapshot = (records.clone(), set.endpoints().to_vec());

    let second = propagate(&mut records, &mut set, &topo);
    assert!(second.is_empty());
    assert_eq!(records, snapshot.0);
    assert_eq!(set.endpoints(), snapshot.1.as_slice());
}

#[test]
fn test_derive_tags_deterministic() {
    let topo = Topology::default();
    for record in parse_dumps(SPINE, POD) {
        let first = derive_tags(&record, &topo);
        for _ in 0..3 {
            assert_eq!(derive_tags(&record, &topo), first);
        }
    }
}

#[test]
fn test_path_indexes_dense() {
    let graph = build_graph(SPINE, POD, &Topology::default());
    for (i, path) in graph.paths().iter().enumerate() {
        assert_eq!(path.index, i);
    }
    // one path per rule with both ports, plus the trunk
    assert_eq!(graph.paths().len(), graph.records().len() + 1);
}
