//! Flow table records
//!
//! Turns `dump-flows` text into typed [`FlowRecord`]s and derives the
//! semantic tags a renderer uses to highlight related rules.

mod parser;
mod tags;
mod types;

pub use parser::{is_data_row, parse, parse_dumps, parse_line};
pub use tags::{derive_tags, tag_records, Tag, TagSet};
pub use types::{FlowRecord, Port, SwitchRole};
