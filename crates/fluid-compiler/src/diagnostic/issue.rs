//! Per-type schema issues.
//!
//! A spec history may contain many independent types, so problems with one
//! type never abort the run. Each problem becomes a [`SchemaIssue`], the
//! offending type is skipped or flagged, and all issues are handed back
//! together in a [`Diagnostics`] collection.
#![allow(unused_assignments)]

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::SchemaLocation;
use crate::ir::Version;

/// A recoverable problem found while normalizing, diffing, or validating a spec.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum SchemaIssue {
    // =========================================================================
    // Normalization
    // =========================================================================
    #[error("{location}: document has no 'schema' mapping")]
    #[diagnostic(
        code(fluid::schema::missing_schema),
        help("Every spec needs a \"schema\": {{ TypeName: ... }} object")
    )]
    MissingSchema {
        location: SchemaLocation,
    },

    #[error("{location}: 'schema' is not an object")]
    #[diagnostic(code(fluid::schema::schema_not_object))]
    SchemaNotObject {
        location: SchemaLocation,
    },

    #[error("{location}: {reason}")]
    #[diagnostic(
        code(fluid::schema::malformed_type),
        help("A type is a string (wrap), an array (enumeration), or an object with m/e/w/o fields")
    )]
    MalformedType {
        location: SchemaLocation,
        reason: String,
    },

    #[error("{location}: 'version' must be {{\"major\": n, \"minor\": n}}, ignoring it")]
    #[diagnostic(code(fluid::schema::malformed_version), severity(Warning))]
    MalformedVersion {
        location: SchemaLocation,
    },

    #[error("{location}: {reason}")]
    #[diagnostic(code(fluid::schema::missing_pull), severity(Warning))]
    MissingPull {
        location: SchemaLocation,
        reason: String,
    },

    // =========================================================================
    // History
    // =========================================================================
    #[error("{location}: variant changed from {from} to {to}")]
    #[diagnostic(
        code(fluid::history::variant_changed),
        severity(Advice),
        help("Treated as a breaking modification of the earlier {from}")
    )]
    VariantChanged {
        location: SchemaLocation,
        from: &'static str,
        to: &'static str,
    },

    #[error("{location}: explicit version {explicit} understates a {required} change from {previous}")]
    #[diagnostic(code(fluid::history::understated_version), severity(Warning))]
    UnderstatedVersion {
        location: SchemaLocation,
        previous: Version,
        explicit: Version,
        required: &'static str,
    },

    // =========================================================================
    // Structure
    // =========================================================================
    #[error("{location}: struct has no members")]
    #[diagnostic(code(fluid::structure::empty_struct), severity(Warning))]
    EmptyStruct {
        location: SchemaLocation,
    },

    #[error("{location}: enumeration has no enumerals")]
    #[diagnostic(code(fluid::structure::empty_enumeration), severity(Warning))]
    EmptyEnumeration {
        location: SchemaLocation,
    },

    #[error("{location}: duplicate member '{member}'")]
    #[diagnostic(code(fluid::structure::duplicate_member), severity(Warning))]
    DuplicateMember {
        location: SchemaLocation,
        member: String,
    },

    #[error("{location}: duplicate enumeral '{tag}'")]
    #[diagnostic(code(fluid::structure::duplicate_enumeral), severity(Warning))]
    DuplicateEnumeral {
        location: SchemaLocation,
        tag: String,
    },

    #[error("{location}: unknown type reference '{reference}'")]
    #[diagnostic(
        code(fluid::structure::unknown_reference),
        severity(Warning),
        help("References must name a primitive or a type defined in the same spec")
    )]
    UnknownTypeReference {
        location: SchemaLocation,
        reference: String,
    },
}

impl SchemaIssue {
    /// Where the issue was found.
    pub fn location(&self) -> &SchemaLocation {
        match self {
            SchemaIssue::MissingSchema { location }
            | SchemaIssue::SchemaNotObject { location }
            | SchemaIssue::MalformedType { location, .. }
            | SchemaIssue::MalformedVersion { location }
            | SchemaIssue::MissingPull { location, .. }
            | SchemaIssue::VariantChanged { location, .. }
            | SchemaIssue::UnderstatedVersion { location, .. }
            | SchemaIssue::EmptyStruct { location }
            | SchemaIssue::EmptyEnumeration { location }
            | SchemaIssue::DuplicateMember { location, .. }
            | SchemaIssue::DuplicateEnumeral { location, .. }
            | SchemaIssue::UnknownTypeReference { location, .. } => location,
        }
    }

    /// Whether the issue caused part of a spec to be dropped.
    pub fn is_error(&self) -> bool {
        matches!(self.severity(), None | Some(Severity::Error))
    }
}

/// Ordered collection of issues from one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    issues: Vec<SchemaIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an issue.
    pub fn push(&mut self, issue: SchemaIssue) {
        tracing::debug!(
            snapshot = issue.location().snapshot,
            code = ?issue.code().map(|c| c.to_string()),
            "{}",
            issue
        );
        self.issues.push(issue);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchemaIssue> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues that dropped data, as opposed to warnings.
    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|i| i.is_error()).count()
    }
}
