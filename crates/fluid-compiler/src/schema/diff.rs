//! Structural diff between adjacent specs.
//!
//! Every type name that appears in either spec is classified exactly once:
//!
//! - **Added**: only in the later spec (minor-class)
//! - **Removed**: only in the earlier spec (major-class)
//! - **Modified**: in both, with a different shape (major-class), filed under
//!   the variant the type had in the earlier spec
//! - **Unchanged**: in both, with the same shape

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::diagnostic::{Diagnostics, FluidError, SchemaIssue, SchemaLocation};
use crate::ir::{Enumeral, Snapshot, TypeDefinition, TypeKind, Variant};

/// One of the six classification sets of a [`Diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSet {
    AddType,
    RemoveType,
    ModifyType,
    ModifyWrap,
    ModifyStruct,
    ModifyEnumeration,
}

impl ChangeSet {
    pub const ALL: [ChangeSet; 6] = [
        ChangeSet::AddType,
        ChangeSet::RemoveType,
        ChangeSet::ModifyType,
        ChangeSet::ModifyWrap,
        ChangeSet::ModifyStruct,
        ChangeSet::ModifyEnumeration,
    ];

    /// Set that records a modification of a type with this earlier variant.
    pub fn modify(variant: Variant) -> Self {
        match variant {
            Variant::Hollow => ChangeSet::ModifyType,
            Variant::Wrap => ChangeSet::ModifyWrap,
            Variant::Struct => ChangeSet::ModifyStruct,
            Variant::Enumeration => ChangeSet::ModifyEnumeration,
        }
    }

    /// Whether a non-empty set of this kind breaks existing callers.
    pub fn is_breaking(&self) -> bool {
        !matches!(self, ChangeSet::AddType)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeSet::AddType => "addType",
            ChangeSet::RemoveType => "removeType",
            ChangeSet::ModifyType => "modifyType",
            ChangeSet::ModifyWrap => "modifyWrap",
            ChangeSet::ModifyStruct => "modifyStruct",
            ChangeSet::ModifyEnumeration => "modifyEnumeration",
        }
    }
}

/// How one type name fared across a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Added,
    Removed,
    /// Modified; carries the variant the type had before the transition.
    Modified(Variant),
    Unchanged,
}

/// Structural delta between spec *i* and spec *i + 1*.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diff {
    pub add_type: BTreeSet<String>,
    pub remove_type: BTreeSet<String>,
    pub modify_type: BTreeSet<String>,
    pub modify_wrap: BTreeSet<String>,
    pub modify_struct: BTreeSet<String>,
    pub modify_enumeration: BTreeSet<String>,
}

impl Diff {
    pub fn set(&self, set: ChangeSet) -> &BTreeSet<String> {
        match set {
            ChangeSet::AddType => &self.add_type,
            ChangeSet::RemoveType => &self.remove_type,
            ChangeSet::ModifyType => &self.modify_type,
            ChangeSet::ModifyWrap => &self.modify_wrap,
            ChangeSet::ModifyStruct => &self.modify_struct,
            ChangeSet::ModifyEnumeration => &self.modify_enumeration,
        }
    }

    fn set_mut(&mut self, set: ChangeSet) -> &mut BTreeSet<String> {
        match set {
            ChangeSet::AddType => &mut self.add_type,
            ChangeSet::RemoveType => &mut self.remove_type,
            ChangeSet::ModifyType => &mut self.modify_type,
            ChangeSet::ModifyWrap => &mut self.modify_wrap,
            ChangeSet::ModifyStruct => &mut self.modify_struct,
            ChangeSet::ModifyEnumeration => &mut self.modify_enumeration,
        }
    }

    pub fn insert(&mut self, set: ChangeSet, name: impl Into<String>) {
        self.set_mut(set).insert(name.into());
    }

    /// Whether nothing changed.
    pub fn is_empty(&self) -> bool {
        ChangeSet::ALL.iter().all(|s| self.set(*s).is_empty())
    }

    /// Whether any removal or modification was recorded.
    pub fn is_breaking(&self) -> bool {
        ChangeSet::ALL
            .iter()
            .any(|s| s.is_breaking() && !self.set(*s).is_empty())
    }

    /// Names whose shape is new after this transition: added or modified.
    pub fn changed_names(&self) -> impl Iterator<Item = &String> {
        ChangeSet::ALL
            .into_iter()
            .filter(|s| *s != ChangeSet::RemoveType)
            .flat_map(move |s| self.set(s).iter())
    }

    pub fn classify(&self, name: &str) -> Classification {
        if self.add_type.contains(name) {
            Classification::Added
        } else if self.remove_type.contains(name) {
            Classification::Removed
        } else if self.modify_type.contains(name) {
            Classification::Modified(Variant::Hollow)
        } else if self.modify_wrap.contains(name) {
            Classification::Modified(Variant::Wrap)
        } else if self.modify_struct.contains(name) {
            Classification::Modified(Variant::Struct)
        } else if self.modify_enumeration.contains(name) {
            Classification::Modified(Variant::Enumeration)
        } else {
            Classification::Unchanged
        }
    }

    /// Checks that no name was filed under more than one set.
    ///
    /// A violation means the diff algorithm itself is wrong, so it is fatal.
    pub fn check_consistency(&self, transition: usize) -> Result<(), FluidError> {
        let mut seen: BTreeMap<&str, Vec<&'static str>> = BTreeMap::new();
        for set in ChangeSet::ALL {
            for name in self.set(set) {
                seen.entry(name.as_str()).or_default().push(set.as_str());
            }
        }

        match seen.into_iter().find(|(_, sets)| sets.len() > 1) {
            Some((name, sets)) => Err(FluidError::InconsistentDiff {
                transition,
                name: name.to_string(),
                sets,
            }),
            None => Ok(()),
        }
    }

    /// Format the diff for display.
    pub fn format_changes(&self) -> String {
        let mut lines = Vec::new();

        for set in ChangeSet::ALL {
            for name in self.set(set) {
                let marker = if set.is_breaking() { "(BREAKING)" } else { "(OK)" };
                let desc = match set {
                    ChangeSet::AddType => format!("+ Type '{}' added", name),
                    ChangeSet::RemoveType => format!("- Type '{}' removed", name),
                    ChangeSet::ModifyType => format!("~ Hollow '{}' output changed", name),
                    ChangeSet::ModifyWrap => format!("~ Wrap '{}' changed", name),
                    ChangeSet::ModifyStruct => format!("~ Struct '{}' changed", name),
                    ChangeSet::ModifyEnumeration => format!("~ Enumeration '{}' changed", name),
                };
                lines.push(format!("  {} {}", desc, marker));
            }
        }

        lines.join("\n")
    }
}

/// Compare two adjacent specs.
///
/// A type whose variant changed is reported as a modification of its earlier
/// variant (never as remove + add) and noted in `diagnostics`.
pub fn diff_snapshots(before: &Snapshot, after: &Snapshot, diagnostics: &mut Diagnostics) -> Diff {
    let old: BTreeMap<&str, &TypeDefinition> = before.types.iter().map(|t| (t.name.as_str(), t)).collect();
    let new: BTreeMap<&str, &TypeDefinition> = after.types.iter().map(|t| (t.name.as_str(), t)).collect();

    let mut diff = Diff::default();

    for (name, old_def) in &old {
        match new.get(name) {
            None => diff.insert(ChangeSet::RemoveType, *name),
            Some(new_def) => {
                if old_def.variant() != new_def.variant() {
                    diagnostics.push(SchemaIssue::VariantChanged {
                        location: SchemaLocation::of_type(after.index, *name),
                        from: old_def.variant().as_str(),
                        to: new_def.variant().as_str(),
                    });
                }
                if is_modified(old_def, new_def) {
                    diff.insert(ChangeSet::modify(old_def.variant()), *name);
                }
            }
        }
    }

    for name in new.keys() {
        if !old.contains_key(name) {
            diff.insert(ChangeSet::AddType, *name);
        }
    }

    diff
}

/// Whether `after` is a structural modification of `before`.
pub fn is_modified(before: &TypeDefinition, after: &TypeDefinition) -> bool {
    if before.output != after.output {
        return true;
    }

    match (&before.kind, &after.kind) {
        (TypeKind::Wrap { wrapped: a }, TypeKind::Wrap { wrapped: b }) => a != b,
        // Order matters: generators emit positional constructors.
        (TypeKind::Struct { members: a }, TypeKind::Struct { members: b }) => a != b,
        (TypeKind::Enumeration { enumerals: a }, TypeKind::Enumeration { enumerals: b }) => {
            enumerations_differ(a, b)
        }
        (TypeKind::Hollow, TypeKind::Hollow) => false,
        _ => true,
    }
}

fn enumerations_differ(before: &[Enumeral], after: &[Enumeral]) -> bool {
    let old: BTreeMap<&str, &Enumeral> = before.iter().map(|e| (e.tag.as_str(), e)).collect();
    let new: BTreeMap<&str, &Enumeral> = after.iter().map(|e| (e.tag.as_str(), e)).collect();

    if old.keys().ne(new.keys()) {
        return true;
    }

    old.iter()
        .any(|(tag, enumeral)| new.get(tag).map_or(true, |other| enumeral.members() != other.members()))
}
