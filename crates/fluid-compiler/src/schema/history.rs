//! Collapsing provenance to one table per major version.

use super::provenance::ProvenanceTable;

/// Keeps, for each distinct major version, the table of the last spec with
/// that major (its greatest minor). Output is in chronological order.
///
/// A client pinned to a major version sees exactly the type origins in the
/// kept table for that major.
pub fn collapse(tables: &[ProvenanceTable]) -> Vec<ProvenanceTable> {
    let mut kept: Vec<ProvenanceTable> = Vec::new();

    for table in tables.iter().rev() {
        let same_major = kept
            .last()
            .is_some_and(|last| last.version.major == table.version.major);
        if !same_major {
            kept.push(table.clone());
        }
    }

    kept.reverse();
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Version;
    use std::collections::BTreeMap;

    fn table(major: u32, minor: u32) -> ProvenanceTable {
        ProvenanceTable {
            version: Version::new(major, minor),
            types: BTreeMap::from([("T".to_string(), Version::new(major, minor))]),
        }
    }

    #[test]
    fn test_keeps_latest_minor_per_major() {
        let tables = vec![table(0, 0), table(0, 1), table(0, 2), table(1, 0), table(1, 1), table(2, 0)];

        let collapsed = collapse(&tables);

        let versions: Vec<Version> = collapsed.iter().map(|t| t.version).collect();
        assert_eq!(versions, vec![Version::new(0, 2), Version::new(1, 1), Version::new(2, 0)]);
    }

    #[test]
    fn test_repeated_version_keeps_last() {
        let collapsed = collapse(&[table(0, 0), table(0, 0), table(1, 0)]);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].version, Version::new(0, 0));
    }

    #[test]
    fn test_empty() {
        assert!(collapse(&[]).is_empty());
    }
}
