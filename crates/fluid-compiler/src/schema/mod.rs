//! Schema evolution engine.
//!
//! This module decides what changed between spec revisions and what that
//! means for versioning. It ensures safe evolution by:
//!
//! 1. Diffing every adjacent pair of specs structurally
//! 2. Assigning semantic versions (additions → minor, anything else → major)
//! 3. Tracking, per type, the version its current shape was introduced at
//! 4. Collapsing that provenance to one table per major version
//! 5. Resolving the specs each emitter must generate code for

pub mod diff;
pub mod engine;
pub mod history;
pub mod provenance;
pub mod resolve;
pub mod version;

pub use diff::{diff_snapshots, ChangeSet, Classification, Diff};
pub use engine::{resolve_history, resolve_snapshots, Resolution};
pub use history::collapse;
pub use provenance::{track, History, ProvenanceTable};
pub use resolve::{resolve_specs, ResolvedSpec};
pub use version::VersionDelta;
