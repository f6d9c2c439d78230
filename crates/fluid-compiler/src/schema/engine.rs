//! The schema evolution pipeline.
//!
//! ```text
//! raw documents ─▶ normalize ─▶ validate ─▶ track ─▶ collapse ─▶ resolve
//! ```
//!
//! The whole pipeline is a pure function of its input: the same documents
//! always give the same diffs, versions, and type sources.

use serde_json::Value;

use crate::diagnostic::{Diagnostics, FluidError};
use crate::frontend::normalize_all;
use crate::ir::{Snapshot, Version};
use crate::validate::validate_history;

use super::diff::Diff;
use super::history::collapse;
use super::provenance::{track, ProvenanceTable};
use super::resolve::{resolve_specs, ResolvedSpec};

/// Everything one run of the engine computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Specs handed to emitters, oldest first.
    pub specs: Vec<ResolvedSpec>,
    /// Assigned version of every input spec.
    pub versions: Vec<Version>,
    /// One diff per adjacent pair of input specs.
    pub diffs: Vec<Diff>,
    /// Provenance of every input spec.
    pub tables: Vec<ProvenanceTable>,
    /// One provenance table per major version.
    pub collapsed: Vec<ProvenanceTable>,
    pub diagnostics: Diagnostics,
}

impl Resolution {
    /// The newest resolved spec.
    pub fn latest(&self) -> Option<&ResolvedSpec> {
        self.specs.last()
    }
}

/// Runs the engine over raw documents in chronological order.
pub fn resolve_history(docs: &[Value], floor: u32) -> Result<Resolution, FluidError> {
    if docs.is_empty() {
        return Err(FluidError::NoSpecs);
    }

    let mut diagnostics = Diagnostics::new();
    let snapshots = normalize_all(docs, &mut diagnostics);
    resolve_snapshots(&snapshots, floor, diagnostics)
}

/// Runs the engine over already-normalized specs.
pub fn resolve_snapshots(
    snapshots: &[Snapshot],
    floor: u32,
    mut diagnostics: Diagnostics,
) -> Result<Resolution, FluidError> {
    if snapshots.is_empty() {
        return Err(FluidError::NoSpecs);
    }

    validate_history(snapshots, &mut diagnostics);

    let history = track(snapshots, &mut diagnostics)?;
    let collapsed = collapse(&history.tables);
    let specs = resolve_specs(snapshots, &history.versions, &collapsed, floor)?;

    tracing::info!(
        input = snapshots.len(),
        resolved = specs.len(),
        majors = collapsed.len(),
        issues = diagnostics.len(),
        "resolved spec history"
    );

    Ok(Resolution {
        specs,
        versions: history.versions,
        diffs: history.diffs,
        tables: history.tables,
        collapsed,
        diagnostics,
    })
}
