use super::dumps::{POD, SPINE};
use flowpath::build_graph;
use flowpath::config::Topology;
use flowpath::flow::{self, Port, SwitchRole};
use flowpath::graph::Direction;

const SCENARIO_A: &str =
    " cookie=0x0, priority=100,in_port=2,dl_dst=00:11:22:33:44:55 actions=output:1";

#[test]
fn test_spine_output_rule() {
    let graph = build_graph(SCENARIO_A, "", &Topology::default());
    let record = &graph.records()[0];

    assert_eq!(record.in_port, Some(2));
    assert_eq!(record.output, Some(Port::Number(1)));
    assert_eq!(record.mac.as_deref(), Some("00:11:22:33:44:55"));
    assert!(!record.is_flood);
    assert_eq!(
        record.tags.to_strings(),
        vec!["sw_ssw", "mac_001122334455", "to_testee"]
    );
}

#[test]
fn test_spine_flood_rule() {
    let graph = build_graph(
        " cookie=0x0, priority=100,in_port=2 actions=FLOOD",
        "",
        &Topology::default(),
    );
    let record = &graph.records()[0];

    assert_eq!(record.output, Some(Port::Flood));
    assert!(record.is_flood);
    assert!(record.flood_mark);
    assert!(record.tags.contains_str("flood"));
}

#[test]
fn test_pod_trunk_to_edge() {
    let graph = build_graph("", " cookie=0x0, in_port=1 actions=output:5", &Topology::default());
    assert!(graph.records()[0].tags.contains_str("to_testee"));
}

#[test]
fn test_pod_unrecognized_direction() {
    let graph = build_graph(SPINE, POD, &Topology::default());
    // last pod rule: in_port=3 -> output:3, index 3 spine + 4 pod
    let record = &graph.records()[7];
    assert_eq!(record.switch_role, SwitchRole::Pod);
    assert_eq!(record.in_port, Some(3));
    assert_eq!(record.output, Some(Port::Number(3)));
    assert!(record.tags.contains_str("rule_7"));
}

#[test]
fn test_trunk_mac_reaches_edge_rule() {
    let spine = " cookie=0x0, in_port=1,dl_dst=00:00:00:00:00:04 actions=output:4\n\
                 \x20cookie=0x0, in_port=4 actions=output:1";
    let graph = build_graph(spine, "", &Topology::default());

    let tagged = graph.endpoints_with_tag("mac_000000000004");
    let edge_source = tagged
        .iter()
        .filter_map(|&id| graph.endpoint(id))
        .find(|ep| ep.flow_index == 1 && ep.direction == Direction::Source)
        .expect("edge rule should carry the trunk MAC");
    assert_eq!(edge_source.port, Port::Number(4));

    // path of the edge rule carries the tag too
    let path = graph
        .paths()
        .iter()
        .find(|p| p.flow_index() == Some(1))
        .unwrap();
    assert!(path.tags.contains_str("mac_000000000004"));
}

#[test]
fn test_pod_trunk_mac_and_flood_on_reply_rule() {
    let graph = build_graph(SPINE, POD, &Topology::default());
    // pod rule "in_port=3 actions=output:1" is index 4
    let tags = graph.flow_tags(4).unwrap().to_strings();
    assert_eq!(
        tags,
        vec!["sw_psw", "to_tester", "mac_000000000003", "flood"]
    );
    // derived tags on the record itself are unchanged
    assert_eq!(graph.records()[4].tags.to_string(), "sw_psw to_tester");
    assert!(graph.records()[4].flood_mark);
}

/// The pod trunk rule's testee MAC reaches every pod rule entering port 3.
#[test]
fn test_highlight_by_mac_spans_both_switches() {
    let graph = build_graph(SPINE, POD, &Topology::default());
    let rows: Vec<(SwitchRole, usize)> = graph
        .records_with_tag("mac_000000000003")
        .iter()
        .map(|r| (r.switch_role, r.index))
        .collect();
    assert_eq!(
        rows,
        vec![
            (SwitchRole::Spine, 0),
            (SwitchRole::Pod, 3),
            (SwitchRole::Pod, 4),
            (SwitchRole::Pod, 7),
        ]
    );
}

#[test]
fn test_inter_switch_path() {
    let graph = build_graph(SPINE, POD, &Topology::default());
    let trunks: Vec<_> = graph.paths().iter().filter(|p| p.is_inter_switch()).collect();
    assert_eq!(trunks.len(), 1);

    let trunk = trunks[0];
    assert_eq!(trunk.index, graph.paths().len() - 1);
    assert!(trunk.tags.is_empty());
    assert_eq!(trunk.source.role, SwitchRole::Spine);
    assert_eq!(trunk.target.role, SwitchRole::Pod);
    assert_eq!(trunk.source.port, Port::Number(1));
    assert_eq!(trunk.target.port, Port::Number(1));
}

#[test]
fn test_vlan_rewrite_rule() {
    let records = flow::parse(POD, SwitchRole::Pod);
    let rewrite = &records[2];
    assert_eq!(rewrite.vlan_id, Some(10));
    assert_eq!(rewrite.mod_vlan_vid, Some(20));
    assert_eq!(rewrite.output, Some(Port::Number(4)));
}

#[test]
fn test_view_endpoint_names_resolve() {
    let graph = build_graph(SPINE, POD, &Topology::default());
    let view = graph.view();
    let names: Vec<&str> = view
        .switches
        .iter()
        .flat_map(|s| s.ports.iter())
        .flat_map(|p| p.endpoints.iter())
        .map(|e| e.name.as_str())
        .collect();

    for path in view.paths.iter().filter(|p| p.flow_index.is_some()) {
        assert!(names.contains(&path.source.as_str()), "{}", path.source);
        assert!(names.contains(&path.target.as_str()), "{}", path.target);
    }
}

#[test]
fn test_spine_flood_rule_learns_tester_mac() {
    let graph = build_graph(SPINE, POD, &Topology::default());
    assert_eq!(
        graph.flow_tags(2).unwrap().to_string(),
        "sw_ssw flood to_testee mac_000000000001"
    );
}
