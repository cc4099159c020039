//! Semantic tags
//!
//! Every record and endpoint carries an ordered set of tags. Renderers
//! join them with spaces and select on exact tag matches, so the string
//! form of each [`Tag`] is fixed.

use super::{FlowRecord, Port, SwitchRole};
use crate::config::Topology;
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `sw_ssw` / `sw_psw`
    Switch(SwitchRole),
    /// `mac_<hex digits>`, colons stripped
    Mac(String),
    /// `flood`
    Flood,
    /// `to_testee`
    ToTestee,
    /// `to_tester`
    ToTester,
    /// `rule_<index>`, for rules that fit no known direction
    Rule(usize),
}

impl Tag {
    /// Build a MAC tag from a colon-separated address
    pub fn mac(mac: &str) -> Self {
        Tag::Mac(mac.replace(':', ""))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Switch(role) => write!(f, "sw_{}", role),
            Tag::Mac(hex) => write!(f, "mac_{}", hex),
            Tag::Flood => f.write_str("flood"),
            Tag::ToTestee => f.write_str("to_testee"),
            Tag::ToTester => f.write_str("to_tester"),
            Tag::Rule(index) => write!(f, "rule_{}", index),
        }
    }
}

/// Insertion-ordered set of tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a tag unless already present. Returns true if it was added.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.0.contains(&tag) {
            return false;
        }
        self.0.push(tag);
        true
    }

    pub fn contains(&self, tag: &Tag) -> bool {
        self.0.contains(tag)
    }

    /// Exact match against the external string form, e.g. `"mac_001122334455"`
    pub fn contains_str(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t.to_string() == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tags as strings, in order
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(Tag::to_string).collect()
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Derive the tag set for one record.
///
/// Order is fixed: switch, MAC, flood, then the direction (or the
/// `rule_<index>` fallback on the pod switch).
pub fn derive_tags(record: &FlowRecord, topology: &Topology) -> TagSet {
    let mut tags = TagSet::new();
    tags.insert(Tag::Switch(record.switch_role));

    if !record.is_flood {
        if let Some(mac) = &record.mac {
            tags.insert(Tag::mac(mac));
        }
    }

    if record.flood_mark {
        tags.insert(Tag::Flood);
    }

    tags.insert(direction_tag(record, topology));
    tags
}

fn direction_tag(record: &FlowRecord, topology: &Topology) -> Tag {
    let in_edge = record.in_port.is_some_and(|p| topology.is_edge(p));

    match record.switch_role {
        // Anything not entering on an edge port arrives over the trunk
        SwitchRole::Spine => {
            if in_edge {
                Tag::ToTestee
            } else {
                Tag::ToTester
            }
        }
        SwitchRole::Pod => {
            let out_trunk = record.output == Some(topology.trunk());
            let out_edge = matches!(record.output, Some(Port::Number(p)) if topology.is_edge(p));
            let in_trunk = record.in_port.is_some_and(|p| topology.is_trunk(p));

            if in_edge && (out_trunk || record.is_flood) {
                Tag::ToTester
            } else if in_trunk && out_edge {
                Tag::ToTestee
            } else {
                Tag::Rule(record.index)
            }
        }
    }
}

/// Assign derived tags to every record
pub fn tag_records(records: &mut [FlowRecord], topology: &Topology) {
    for record in records.iter_mut() {
        record.tags = derive_tags(record, topology);
    }
}
