//! Configuration management
//!
//! Handles flowpath.toml: the switch topology and logging settings.
//! Every field has a default, so running without a file is the same as
//! loading an empty one.

mod types;
mod validation;

pub use types::*;
pub use validation::{validate, ValidationResult};

use crate::{Error, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Parse configuration from TOML text
pub fn parse(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
}

/// Load the configuration at `path`, or the defaults when no path is given
pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Config> {
    match path {
        Some(p) => load(p),
        None => Ok(Config::default()),
    }
}
