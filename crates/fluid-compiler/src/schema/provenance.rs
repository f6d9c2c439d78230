//! Per-type provenance tracking.
//!
//! For every spec in the history, a [`ProvenanceTable`] records the version at
//! which each type's current shape was introduced. Tables are produced by a
//! left fold over adjacent pairs of specs: the accumulator holds everything
//! computed so far and each step only reads the previous table.

use std::collections::BTreeMap;

use crate::diagnostic::{Diagnostics, FluidError, SchemaIssue, SchemaLocation};
use crate::ir::{Snapshot, Version};

use super::diff::{diff_snapshots, Diff};
use super::version::VersionDelta;

/// Type name → version at which its current shape last changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceTable {
    /// Version assigned to the spec this table belongs to.
    pub version: Version,
    pub types: BTreeMap<String, Version>,
}

impl ProvenanceTable {
    /// Table for the first spec: every type originates at its version.
    pub fn initial(snapshot: &Snapshot, version: Version) -> Self {
        Self {
            version,
            types: snapshot.type_names().map(|name| (name.to_string(), version)).collect(),
        }
    }

    /// Table after a transition to `version` described by `diff`.
    ///
    /// Removed types are dropped, added and modified types move to
    /// `version`, and every other entry is carried over untouched.
    pub fn advance(&self, version: Version, diff: &Diff) -> Self {
        let mut types = self.types.clone();
        for name in &diff.remove_type {
            types.remove(name);
        }
        for name in diff.changed_names() {
            types.insert(name.clone(), version);
        }
        Self { version, types }
    }

    pub fn get(&self, name: &str) -> Option<Version> {
        self.types.get(name).copied()
    }

    /// The table at major-version granularity, as emitters consume it.
    pub fn type_source(&self) -> BTreeMap<String, u32> {
        self.types
            .iter()
            .map(|(name, version)| (name.clone(), version.major))
            .collect()
    }
}

/// Everything the fold computes, one entry per spec (diffs: one per transition).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    pub versions: Vec<Version>,
    pub diffs: Vec<Diff>,
    pub tables: Vec<ProvenanceTable>,
}

impl History {
    fn start(first: &Snapshot) -> Self {
        let version = first.declared_version.unwrap_or(Version::INITIAL);
        Self {
            versions: vec![version],
            diffs: Vec::new(),
            tables: vec![ProvenanceTable::initial(first, version)],
        }
    }
}

/// Folds the version policy over the whole history.
///
/// Returns an empty history for an empty input.
pub fn track(snapshots: &[Snapshot], diagnostics: &mut Diagnostics) -> Result<History, FluidError> {
    let Some(first) = snapshots.first() else {
        return Ok(History::default());
    };

    snapshots
        .windows(2)
        .enumerate()
        .try_fold(History::start(first), |mut history, (transition, pair)| {
            let (before, after) = (&pair[0], &pair[1]);

            let diff = diff_snapshots(before, after, diagnostics);
            diff.check_consistency(transition)?;

            let previous = history.versions[transition];
            let required = VersionDelta::of(&diff);
            let version = assign_version(previous, required, after, diagnostics)?;

            tracing::debug!(
                transition,
                added = diff.add_type.len(),
                removed = diff.remove_type.len(),
                delta = required.as_str(),
                version = %version,
                "transition"
            );

            let table = history.tables[transition].advance(version, &diff);
            history.versions.push(version);
            history.diffs.push(diff);
            history.tables.push(table);
            Ok(history)
        })
}

/// The version of `after`: its declared version if any, else the computed one.
fn assign_version(
    previous: Version,
    required: VersionDelta,
    after: &Snapshot,
    diagnostics: &mut Diagnostics,
) -> Result<Version, FluidError> {
    let Some(declared) = after.declared_version else {
        return required.apply(previous).ok_or(FluidError::VersionOverflow {
            snapshot: after.index,
            previous,
            delta: required.as_str(),
        });
    };

    match VersionDelta::between(previous, declared) {
        None => Err(FluidError::NonMonotonicVersion {
            snapshot: after.index,
            previous,
            explicit: declared,
        }),
        Some(expressed) => {
            if expressed < required {
                diagnostics.push(SchemaIssue::UnderstatedVersion {
                    location: SchemaLocation::snapshot(after.index),
                    previous,
                    explicit: declared,
                    required: required.as_str(),
                });
            }
            Ok(declared)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{PullDescriptor, TypeDefinition, TypeRef};

    fn snapshot(index: usize, types: &[(&str, &str)]) -> Snapshot {
        Snapshot {
            index,
            declared_version: None,
            types: types
                .iter()
                .map(|(name, wrapped)| TypeDefinition::wrap(*name, TypeRef::named(*wrapped)))
                .collect(),
            pull: PullDescriptor::default(),
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_additive_history() {
        let specs = vec![
            snapshot(0, &[("A", "Int")]),
            snapshot(1, &[("A", "Int"), ("B", "Int")]),
        ];

        let history = track(&specs, &mut Diagnostics::new()).unwrap();

        assert_eq!(history.versions, vec![Version::new(0, 0), Version::new(0, 1)]);
        assert_eq!(history.tables[0].get("A"), Some(Version::new(0, 0)));
        assert_eq!(history.tables[1].get("A"), Some(Version::new(0, 0)));
        assert_eq!(history.tables[1].get("B"), Some(Version::new(0, 1)));
    }

    #[test]
    fn test_removal_drops_entry() {
        let specs = vec![
            snapshot(0, &[("A", "Int")]),
            snapshot(1, &[("A", "Int")]),
            snapshot(2, &[]),
        ];

        let history = track(&specs, &mut Diagnostics::new()).unwrap();

        assert_eq!(
            history.versions,
            vec![Version::new(0, 0), Version::new(0, 0), Version::new(1, 0)]
        );
        assert!(history.tables[2].types.is_empty());
        assert_eq!(history.tables[2].version, Version::new(1, 0));
    }

    #[test]
    fn test_carried_over_types_keep_their_version() {
        let specs = vec![
            snapshot(0, &[("A", "Int"), ("B", "Int")]),
            snapshot(1, &[("A", "String"), ("B", "Int")]),
            snapshot(2, &[("A", "String"), ("B", "Int"), ("C", "Int")]),
        ];

        let history = track(&specs, &mut Diagnostics::new()).unwrap();

        assert_eq!(history.tables[2].get("A"), Some(Version::new(1, 0)));
        assert_eq!(history.tables[2].get("B"), Some(Version::new(0, 0)));
        assert_eq!(history.tables[2].get("C"), Some(Version::new(1, 1)));
        assert_eq!(
            history.tables[2].type_source(),
            BTreeMap::from([("A".to_string(), 1), ("B".to_string(), 0), ("C".to_string(), 1)])
        );
    }

    #[test]
    fn test_declared_versions_override() {
        let mut first = snapshot(0, &[("A", "Int")]);
        first.declared_version = Some(Version::new(3, 4));
        let mut second = snapshot(1, &[("A", "Int"), ("B", "Int")]);
        second.declared_version = Some(Version::new(4, 0));

        let history = track(&[first, second], &mut Diagnostics::new()).unwrap();

        assert_eq!(history.versions, vec![Version::new(3, 4), Version::new(4, 0)]);
        assert_eq!(history.tables[1].get("A"), Some(Version::new(3, 4)));
        assert_eq!(history.tables[1].get("B"), Some(Version::new(4, 0)));
    }

    #[test]
    fn test_understated_declared_version_warns() {
        let first = snapshot(0, &[("A", "Int")]);
        let mut second = snapshot(1, &[("A", "String")]);
        second.declared_version = Some(Version::new(0, 1));

        let mut diagnostics = Diagnostics::new();
        let history = track(&[first, second], &mut diagnostics).unwrap();

        assert_eq!(history.versions[1], Version::new(0, 1));
        assert!(diagnostics
            .iter()
            .any(|i| matches!(i, SchemaIssue::UnderstatedVersion { required: "major", .. })));
    }

    #[test]
    fn test_decreasing_declared_version_is_fatal() {
        let mut first = snapshot(0, &[("A", "Int")]);
        first.declared_version = Some(Version::new(2, 0));
        let mut second = snapshot(1, &[("A", "Int")]);
        second.declared_version = Some(Version::new(1, 5));

        let result = track(&[first, second], &mut Diagnostics::new());
        assert!(matches!(result, Err(FluidError::NonMonotonicVersion { snapshot: 1, .. })));
    }

    #[test]
    fn test_empty_history() {
        let history = track(&[], &mut Diagnostics::new()).unwrap();
        assert!(history.versions.is_empty());
        assert!(history.versions.is_empty());
    }
}
