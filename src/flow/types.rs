//! Flow record types

use crate::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::TagSet;

/// Which dump a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SwitchRole {
    /// Spine switch, `ssw` in tags and node names
    #[serde(rename = "ssw")]
    Spine,
    /// Pod switch, `psw` in tags and node names
    #[serde(rename = "psw")]
    Pod,
}

impl SwitchRole {
    /// Both roles in pipeline order
    pub const ALL: [SwitchRole; 2] = [SwitchRole::Spine, SwitchRole::Pod];

    pub fn short_name(self) -> &'static str {
        match self {
            SwitchRole::Spine => "ssw",
            SwitchRole::Pod => "psw",
        }
    }
}

impl fmt::Display for SwitchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

impl FromStr for SwitchRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ssw" | "spine" => Ok(SwitchRole::Spine),
            "psw" | "pod" => Ok(SwitchRole::Pod),
            _ => Err(Error::UnknownSwitchRole {
                name: s.to_string(),
            }),
        }
    }
}

/// A switch port as seen by the graph.
///
/// `Flood` is the sentinel for the FLOOD action and sorts after every
/// numbered port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Port {
    Number(u32),
    Flood,
}

impl Port {
    pub fn number(self) -> Option<u32> {
        match self {
            Port::Number(n) => Some(n),
            Port::Flood => None,
        }
    }

    pub fn is_flood(self) -> bool {
        self == Port::Flood
    }
}

impl From<u32> for Port {
    fn from(n: u32) -> Self {
        Port::Number(n)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{}", n),
            Port::Flood => f.write_str("FLOOD"),
        }
    }
}

impl Serialize for Port {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Port::Number(n) => serializer.serialize_u32(*n),
            Port::Flood => serializer.serialize_str("FLOOD"),
        }
    }
}

/// One parsed rule line.
///
/// Every parsed field is optional: a rule without `in_port` is distinct
/// from a rule matching `in_port=0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowRecord {
    pub switch_role: SwitchRole,
    /// The matched line, verbatim
    pub rule_text: String,
    pub in_port: Option<u32>,
    pub output: Option<Port>,
    pub priority: Option<u32>,
    /// `dl_vlan` match
    pub vlan_id: Option<u32>,
    /// `mod_vlan_vid` action (exclusive-mode wiring)
    pub mod_vlan_vid: Option<u32>,
    pub mac: Option<String>,
    /// Action list contains FLOOD
    pub is_flood: bool,
    /// Rule is known to broadcast; starts equal to `is_flood`
    pub flood_mark: bool,
    /// Position across the spine dump followed by the pod dump
    pub index: usize,
    pub tags: TagSet,
}

impl FlowRecord {
    pub fn new(switch_role: SwitchRole, rule_text: impl Into<String>) -> Self {
        Self {
            switch_role,
            rule_text: rule_text.into(),
            in_port: None,
            output: None,
            priority: None,
            vlan_id: None,
            mod_vlan_vid: None,
            mac: None,
            is_flood: false,
            flood_mark: false,
            index: 0,
            tags: TagSet::new(),
        }
    }

    /// True when the rule can contribute at least one endpoint
    pub fn has_ports(&self) -> bool {
        self.in_port.is_some() || self.output.is_some()
    }
}
