//! Generator configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::diagnostic::FluidError;

/// Which end of the call the generated code serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Client,
    Server,
}

impl FromStr for Side {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Side::Client),
            "server" => Ok(Side::Server),
            other => Err(FluidError::UnsupportedSide {
                side: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Client => f.write_str("client"),
            Side::Server => f.write_str("server"),
        }
    }
}

/// Configuration for the Fluid generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// A JSON array of specs, or a directory of `*.json` specs.
    pub src: PathBuf,

    /// Directory to write generated code.
    pub dest: PathBuf,

    /// Name of the top-level generated file and directory.
    pub name: String,

    /// Target back-end (e.g. "haskell", "json").
    pub target: String,

    pub side: Side,

    /// Module name or prefix for generated code.
    pub prefix: String,

    /// Oldest supported major version.
    pub major_floor: u32,

    /// Add-on identifiers, passed through to the emitter untouched.
    pub addons: Vec<String>,

    /// Spec source format (default: "json").
    pub format: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            src: PathBuf::from("specs"),
            dest: PathBuf::from("generated"),
            name: "Api".to_string(),
            target: "haskell".to_string(),
            side: Side::Client,
            prefix: "Api".to_string(),
            major_floor: 0,
            addons: Vec::new(),
            format: "json".to_string(),
        }
    }
}

/// Splits a comma-separated add-on list, dropping blanks.
pub fn parse_addons(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
