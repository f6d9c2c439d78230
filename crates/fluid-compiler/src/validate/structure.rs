//! Structure validation for canonical types.
//!
//! Checks each definition on its own terms, independently of how it relates
//! to the previous spec. Findings are warnings; nothing here changes the
//! diff or the version history.

use std::collections::HashSet;

use crate::diagnostic::{Diagnostics, SchemaIssue, SchemaLocation};
use crate::ir::{is_primitive, Member, Snapshot, TypeDefinition, TypeKind};

/// Validates every definition in a spec.
pub fn validate_structure(snapshot: &Snapshot, diagnostics: &mut Diagnostics) {
    let defined: HashSet<&str> = snapshot.type_names().collect();

    for def in &snapshot.types {
        let location = SchemaLocation::of_type(snapshot.index, def.name.clone());
        validate_shape(def, &location, diagnostics);
        validate_references(def, &defined, &location, diagnostics);
    }
}

fn validate_shape(def: &TypeDefinition, location: &SchemaLocation, diagnostics: &mut Diagnostics) {
    match &def.kind {
        TypeKind::Struct { members } => {
            if members.is_empty() {
                diagnostics.push(SchemaIssue::EmptyStruct {
                    location: location.clone(),
                });
            }
            check_duplicate_members(members, location, diagnostics);
        }
        TypeKind::Enumeration { enumerals } => {
            if enumerals.is_empty() {
                diagnostics.push(SchemaIssue::EmptyEnumeration {
                    location: location.clone(),
                });
            }

            let mut tags = HashSet::new();
            for enumeral in enumerals {
                if !tags.insert(enumeral.tag.as_str()) {
                    diagnostics.push(SchemaIssue::DuplicateEnumeral {
                        location: location.clone(),
                        tag: enumeral.tag.clone(),
                    });
                }
                check_duplicate_members(enumeral.members(), location, diagnostics);
            }
        }
        TypeKind::Wrap { .. } | TypeKind::Hollow => {}
    }
}

fn check_duplicate_members(members: &[Member], location: &SchemaLocation, diagnostics: &mut Diagnostics) {
    let mut seen = HashSet::new();
    for member in members {
        if !seen.insert(member.name.as_str()) {
            diagnostics.push(SchemaIssue::DuplicateMember {
                location: location.clone(),
                member: member.name.clone(),
            });
        }
    }
}

fn validate_references(
    def: &TypeDefinition,
    defined: &HashSet<&str>,
    location: &SchemaLocation,
    diagnostics: &mut Diagnostics,
) {
    let mut reported = HashSet::new();
    for reference in def.references() {
        for name in reference.names() {
            if !is_primitive(name) && !defined.contains(name) && reported.insert(name) {
                diagnostics.push(SchemaIssue::UnknownTypeReference {
                    location: location.clone(),
                    reference: name.to_string(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Enumeral, PullDescriptor, TypeRef};

    fn validate(types: Vec<TypeDefinition>) -> Diagnostics {
        let snapshot = Snapshot {
            index: 0,
            declared_version: None,
            types,
            pull: PullDescriptor::default(),
            raw: serde_json::Value::Null,
        };
        let mut diagnostics = Diagnostics::new();
        validate_structure(&snapshot, &mut diagnostics);
        diagnostics
    }

    #[test]
    fn test_valid_spec_has_no_issues() {
        let diagnostics = validate(vec![
            TypeDefinition::wrap("UserId", TypeRef::named("String")),
            TypeDefinition::structure("User", vec![Member::new("id", TypeRef::named("UserId"))]),
            TypeDefinition::hollow("GetUsers").with_output(TypeRef::list(TypeRef::named("User"))),
        ]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_duplicates_and_empties() {
        let diagnostics = validate(vec![
            TypeDefinition::structure("Empty", vec![]),
            TypeDefinition::structure(
                "Twice",
                vec![Member::new("a", TypeRef::named("Int")), Member::new("a", TypeRef::named("Int"))],
            ),
            TypeDefinition::enumeration("Tags", vec![Enumeral::tag("X"), Enumeral::tag("X")]),
            TypeDefinition::enumeration("Nothing", vec![]),
        ]);

        let issues: Vec<&SchemaIssue> = diagnostics.iter().collect();
        assert_eq!(issues.len(), 4);
        assert!(matches!(issues[0], SchemaIssue::EmptyStruct { .. }));
        assert!(matches!(issues[1], SchemaIssue::DuplicateMember { member, .. } if member == "a"));
        assert!(matches!(issues[2], SchemaIssue::DuplicateEnumeral { tag, .. } if tag == "X"));
        assert!(matches!(issues[3], SchemaIssue::EmptyEnumeration { .. }));
    }

    #[test]
    fn test_unknown_reference_reported_once_per_type() {
        let diagnostics = validate(vec![TypeDefinition::structure(
            "Order",
            vec![
                Member::new("item", TypeRef::named("Item")),
                Member::new("items", TypeRef::list(TypeRef::named("Item"))),
            ],
        )]);

        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(
            diagnostics.iter().next(),
            Some(SchemaIssue::UnknownTypeReference { reference, .. }) if reference == "Item"
        ));
    }
}
