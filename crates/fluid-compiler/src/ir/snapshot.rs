//! One revision of an API spec.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{TypeDefinition, TypeRef};

/// A `{major, minor}` version assignment.
///
/// Ordering is lexicographic: major first, then minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    /// Version of a first spec that does not declare one.
    pub const INITIAL: Version = Version { major: 0, minor: 0 };

    pub fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// The remote-call descriptor of a spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullDescriptor {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub path: String,
    /// Service name, used to name generated artifacts and entry points.
    pub name: String,
    /// Request metadata type.
    pub meta: TypeRef,
    /// Error type returned by failed calls.
    pub error: TypeRef,
}

impl Default for PullDescriptor {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "localhost".to_string(),
            port: 8080,
            path: "/".to_string(),
            name: "Api".to_string(),
            meta: TypeRef::named("Unit"),
            error: TypeRef::named("Unit"),
        }
    }
}

/// A normalized spec revision.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Position in the chronological input.
    pub index: usize,
    /// Version declared by the document itself, if any.
    pub declared_version: Option<Version>,
    /// Type definitions in document order.
    pub types: Vec<TypeDefinition>,
    pub pull: PullDescriptor,
    /// The document as it was read, kept for pass-through to emitters.
    pub raw: serde_json::Value,
}

impl Snapshot {
    /// Looks up a type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }
}
