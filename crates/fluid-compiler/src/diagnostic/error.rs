//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

use crate::ir::Version;

/// Errors that stop a run.
///
/// Per-type problems inside a schema are not errors; they are collected as
/// [`SchemaIssue`](super::SchemaIssue)s and returned alongside the result.
#[derive(Error, Diagnostic, Debug)]
pub enum FluidError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read '{}': {message}", path.display())]
    #[diagnostic(code(fluid::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Invalid JSON in '{}': {message}", path.display())]
    #[diagnostic(code(fluid::io::invalid_json))]
    InvalidJson {
        path: PathBuf,
        message: String,
    },

    #[error("JSON source '{}' is not an array of specs", path.display())]
    #[diagnostic(
        code(fluid::io::not_an_array),
        help("A single-file source must contain `[ spec, spec, ... ]` in chronological order")
    )]
    NotAnArray {
        path: PathBuf,
    },

    #[error("Unsupported spec format: {format}")]
    #[diagnostic(code(fluid::frontend::unsupported_format))]
    UnsupportedFormat {
        format: String,
    },

    // =========================================================================
    // Run-level Outcomes
    // =========================================================================
    #[error("No specs")]
    #[diagnostic(
        code(fluid::history::no_specs),
        help("Point --src at a JSON array of specs or a directory of *.json specs")
    )]
    NoSpecs,

    #[error("Support floor excludes all available versions (floor: {floor}, latest major: {latest_major})")]
    #[diagnostic(
        code(fluid::history::no_supported_version),
        help("Lower --major to {latest_major} or below")
    )]
    NoSupportedVersion {
        floor: u32,
        latest_major: u32,
    },

    #[error("Spec #{snapshot} declares version {explicit}, which is lower than the preceding version {previous}")]
    #[diagnostic(
        code(fluid::history::non_monotonic_version),
        help("Explicit versions must never decrease along the spec history")
    )]
    NonMonotonicVersion {
        snapshot: usize,
        previous: Version,
        explicit: Version,
    },

    #[error("Spec #{snapshot} needs a {delta} bump past {previous}, which overflows the version")]
    #[diagnostic(
        code(fluid::history::version_overflow),
        help("Declare a lower explicit version earlier in the history")
    )]
    VersionOverflow {
        snapshot: usize,
        previous: Version,
        delta: &'static str,
    },

    // =========================================================================
    // Internal Invariants
    // =========================================================================
    #[error("Type '{name}' was classified into more than one diff set ({}) in transition #{transition}", .sets.join(", "))]
    #[diagnostic(code(fluid::diff::inconsistent))]
    InconsistentDiff {
        transition: usize,
        name: String,
        sets: Vec<&'static str>,
    },

    // =========================================================================
    // Code Generation Errors
    // =========================================================================
    #[error("Unsupported target language: {target}")]
    #[diagnostic(
        code(fluid::codegen::unsupported_target),
        help("Supported targets: haskell, json")
    )]
    UnsupportedTarget {
        target: String,
    },

    #[error("Unsupported side: {side}")]
    #[diagnostic(
        code(fluid::codegen::unsupported_side),
        help("Use 'client' or 'server'")
    )]
    UnsupportedSide {
        side: String,
    },

    #[error("Failed to generate code: {message}")]
    #[diagnostic(code(fluid::codegen::generation_failed))]
    CodegenFailed {
        message: String,
    },
}

impl FluidError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}
