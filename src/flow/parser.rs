//! Rule parser for `ovs-ofctl dump-flows` output
//!
//! Only data rows are kept: lines whose first token (after leading
//! whitespace) is `cookie`. Headers, blank lines and summaries are
//! dropped without comment. Each field is extracted independently and a
//! field that does not match is simply left unset.

use super::{FlowRecord, Port, SwitchRole};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn data_row() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*cookie").expect("valid data row pattern"))
}

fn priority_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"priority=([0-9]+)").expect("valid priority pattern"))
}

fn in_port_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"in_port=([0-9]+)").expect("valid in_port pattern"))
}

fn dl_vlan_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"dl_vlan=([0-9]+)").expect("valid dl_vlan pattern"))
}

fn dl_dst_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"dl_dst=(\S+)").expect("valid dl_dst pattern"))
}

fn dl_src_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"dl_src=(\S+)").expect("valid dl_src pattern"))
}

fn actions_field() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"actions=(\S+)").expect("valid actions pattern"))
}

fn output_action() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"output:([0-9]+)").expect("valid output pattern"))
}

fn mod_vlan_vid_action() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"mod_vlan_vid:([0-9]+)").expect("valid mod_vlan_vid pattern"))
}

/// First capture group of `re` in `text`, if any
fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Numeric capture; digits that overflow are treated as absent
fn capture_u32(re: &Regex, text: &str) -> Option<u32> {
    capture(re, text).and_then(|digits| digits.parse().ok())
}

/// Returns true if the line is a flow table data row
pub fn is_data_row(line: &str) -> bool {
    data_row().is_match(line)
}

/// Parse a single data row. Never fails; unmatched fields stay `None`.
pub fn parse_line(line: &str, role: SwitchRole) -> FlowRecord {
    let mut record = FlowRecord::new(role, line);

    record.priority = capture_u32(priority_field(), line);
    record.in_port = capture_u32(in_port_field(), line);
    record.vlan_id = capture_u32(dl_vlan_field(), line);

    // dl_dst then dl_src: when both are present dl_src wins
    for re in [dl_dst_field(), dl_src_field()] {
        if let Some(mac) = capture(re, line) {
            record.mac = Some(mac.to_string());
        }
    }

    if let Some(actions) = capture(actions_field(), line) {
        if actions.contains("FLOOD") {
            record.output = Some(Port::Flood);
            record.is_flood = true;
            record.flood_mark = true;
        }
        // An explicit output replaces the FLOOD sentinel but keeps the flood flags
        if let Some(port) = capture_u32(output_action(), actions) {
            record.output = Some(Port::Number(port));
        }
        if let Some(vid) = capture_u32(mod_vlan_vid_action(), actions) {
            record.mod_vlan_vid = Some(vid);
        }
    }

    record
}

/// Parse one switch dump into records indexed from 0 in line order.
///
/// Tags are left empty; they depend on the final index, which is only
/// known once both dumps are concatenated.
pub fn parse(dump: &str, role: SwitchRole) -> Vec<FlowRecord> {
    let mut skipped = 0usize;
    let records: Vec<FlowRecord> = dump
        .lines()
        .filter(|line| {
            let keep = is_data_row(line);
            if !keep {
                skipped += 1;
            }
            keep
        })
        .enumerate()
        .map(|(index, line)| {
            let mut record = parse_line(line, role);
            record.index = index;
            record
        })
        .collect();

    debug!(
        "{}: parsed {} rules, skipped {} non-data lines",
        role,
        records.len(),
        skipped
    );
    records
}

/// Parse both dumps, spine first, assigning a dense index across the two.
pub fn parse_dumps(spine_dump: &str, pod_dump: &str) -> Vec<FlowRecord> {
    let mut records = parse(spine_dump, SwitchRole::Spine);
    records.extend(parse(pod_dump, SwitchRole::Pod));
    for (index, record) in records.iter_mut().enumerate() {
        record.index = index;
    }
    records
}
