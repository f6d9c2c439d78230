//! Validation of normalized specs.

mod structure;

use crate::diagnostic::Diagnostics;
use crate::ir::Snapshot;

pub use structure::validate_structure;

/// Validates every spec in a history, collecting all findings.
pub fn validate_history(snapshots: &[Snapshot], diagnostics: &mut Diagnostics) {
    for snapshot in snapshots {
        validate_structure(snapshot, diagnostics);
    }
}
