//! Semantic version policy.
//!
//! Additive-only evolution is the one change shape guaranteed to keep
//! existing callers working, so a transition that only adds types bumps the
//! minor version. Any removal or modification bumps the major version and
//! resets the minor.

use crate::ir::Version;

use super::diff::Diff;

/// Size of a version step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum VersionDelta {
    None,
    Minor,
    Major,
}

impl VersionDelta {
    /// The delta a diff requires.
    pub fn of(diff: &Diff) -> Self {
        if diff.is_breaking() {
            VersionDelta::Major
        } else if !diff.add_type.is_empty() {
            VersionDelta::Minor
        } else {
            VersionDelta::None
        }
    }

    /// The delta a move from `from` to `to` expresses.
    ///
    /// Returns `None` when `to` is lower than `from`.
    pub fn between(from: Version, to: Version) -> Option<Self> {
        if to < from {
            None
        } else if to.major > from.major {
            Some(VersionDelta::Major)
        } else if to.minor > from.minor {
            Some(VersionDelta::Minor)
        } else {
            Some(VersionDelta::None)
        }
    }

    /// Steps `version` by this delta. `None` when the bumped component overflows.
    pub fn apply(self, version: Version) -> Option<Version> {
        match self {
            VersionDelta::None => Some(version),
            VersionDelta::Minor => version.minor.checked_add(1).map(|minor| Version::new(version.major, minor)),
            VersionDelta::Major => version.major.checked_add(1).map(|major| Version::new(major, 0)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionDelta::None => "none",
            VersionDelta::Minor => "minor",
            VersionDelta::Major => "major",
        }
    }
}
