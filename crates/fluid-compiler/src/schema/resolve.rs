//! Joining specs with their collapsed provenance.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::diagnostic::FluidError;
use crate::ir::{Snapshot, Version};

use super::provenance::ProvenanceTable;

/// A spec annotated with its version and type sources, ready for emitters.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpec {
    pub version: Version,
    pub snapshot: Snapshot,
    /// Type name → major version whose definition of the type is current.
    pub type_source: BTreeMap<String, u32>,
    /// The raw document minus `schema`, with the resolved `version`.
    pub original: Value,
}

impl ResolvedSpec {
    /// Whether `name` was last defined in an older major than this spec's.
    pub fn is_inherited(&self, name: &str) -> bool {
        self.source_major(name)
            .is_some_and(|major| major < self.version.major)
    }

    pub fn source_major(&self, name: &str) -> Option<u32> {
        self.type_source.get(name).copied()
    }
}

/// Builds the pass-through document for emitters.
pub fn original_document(raw: &Value, version: Version) -> Value {
    let mut doc = match raw {
        Value::Object(obj) => obj.clone(),
        _ => Map::new(),
    };
    doc.remove("schema");
    doc.insert(
        "version".to_string(),
        serde_json::json!({ "major": version.major, "minor": version.minor }),
    );
    Value::Object(doc)
}

/// Produces the final, ordered list of specs handed to emitters.
///
/// Each collapsed table is attached to every spec whose version equals the
/// table's exactly; specs matching no table (non-latest minors) are dropped,
/// then so is every spec below the `floor` major.
pub fn resolve_specs(
    snapshots: &[Snapshot],
    versions: &[Version],
    collapsed: &[ProvenanceTable],
    floor: u32,
) -> Result<Vec<ResolvedSpec>, FluidError> {
    let Some(latest) = versions.last() else {
        return Err(FluidError::NoSpecs);
    };

    let mut resolved = Vec::new();
    for table in collapsed {
        let type_source = table.type_source();
        for (snapshot, version) in snapshots.iter().zip(versions) {
            if *version == table.version {
                resolved.push(ResolvedSpec {
                    version: *version,
                    snapshot: snapshot.clone(),
                    type_source: type_source.clone(),
                    original: original_document(&snapshot.raw, *version),
                });
            }
        }
    }

    let supported: Vec<ResolvedSpec> = resolved
        .into_iter()
        .filter(|spec| spec.version.major >= floor)
        .collect();

    if supported.is_empty() {
        return Err(FluidError::NoSupportedVersion {
            floor,
            latest_major: latest.major,
        });
    }

    Ok(supported)
}
