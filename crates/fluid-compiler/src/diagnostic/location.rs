//! Location tracking inside a spec history.

use std::fmt;

/// Where in the spec history an issue was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaLocation {
    /// Index of the spec in the chronological input.
    pub snapshot: usize,
    /// The type the issue belongs to, if any.
    pub type_name: Option<String>,
}

impl SchemaLocation {
    pub fn snapshot(snapshot: usize) -> Self {
        Self {
            snapshot,
            type_name: None,
        }
    }

    pub fn of_type(snapshot: usize, type_name: impl Into<String>) -> Self {
        Self {
            snapshot,
            type_name: Some(type_name.into()),
        }
    }
}

impl fmt::Display for SchemaLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_name {
            Some(name) => write!(f, "spec #{}, type '{}'", self.snapshot, name),
            None => write!(f, "spec #{}", self.snapshot),
        }
    }
}
