//! Raw spec document → canonical [`Snapshot`].
//!
//! A raw type entry is classified by the first rule that matches:
//!
//! 1. a string is a wrap around that type;
//! 2. an array is an enumeration of its elements;
//! 3. an object with an enumerals field (`e`) is an enumeration;
//! 4. any other object is a struct if it has members (`m`), a wrap if it
//!    has a wrapped type (`w`), and hollow otherwise.
//!
//! Objects may carry an output (`o`), which makes the type a call. Long
//! field names (`enumerals`, `members`, `wrap`, `output`) are accepted too.
//!
//! Entries matching no rule are skipped and reported; the rest of the spec
//! is still normalized.

use serde_json::{Map, Value};

use crate::diagnostic::{Diagnostics, SchemaIssue, SchemaLocation};
use crate::ir::{
    Enumeral, Member, PullDescriptor, Snapshot, TypeDefinition, TypeRef, Version,
};

const ENUMERALS: (&str, &str) = ("e", "enumerals");
const MEMBERS: (&str, &str) = ("m", "members");
const WRAP: (&str, &str) = ("w", "wrap");
const OUTPUT: (&str, &str) = ("o", "output");

/// Normalizes one raw document at position `index` of the history.
pub fn normalize_document(index: usize, doc: &Value, diagnostics: &mut Diagnostics) -> Snapshot {
    let declared_version = match doc.get("version") {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value::<Version>(value.clone()) {
            Ok(version) => Some(version),
            Err(_) => {
                diagnostics.push(SchemaIssue::MalformedVersion {
                    location: SchemaLocation::snapshot(index),
                });
                None
            }
        },
    };

    let types = normalize_schema(index, doc.get("schema"), diagnostics);
    let pull = normalize_pull(index, doc.get("pull"), diagnostics);

    Snapshot {
        index,
        declared_version,
        types,
        pull,
        raw: doc.clone(),
    }
}

/// Normalizes the `schema` mapping into definitions, in document order.
pub fn normalize_schema(
    index: usize,
    schema: Option<&Value>,
    diagnostics: &mut Diagnostics,
) -> Vec<TypeDefinition> {
    let entries = match schema {
        None | Some(Value::Null) => {
            diagnostics.push(SchemaIssue::MissingSchema {
                location: SchemaLocation::snapshot(index),
            });
            return Vec::new();
        }
        Some(Value::Object(entries)) => entries,
        Some(_) => {
            diagnostics.push(SchemaIssue::SchemaNotObject {
                location: SchemaLocation::snapshot(index),
            });
            return Vec::new();
        }
    };

    let mut types = Vec::with_capacity(entries.len());
    for (name, entry) in entries {
        match normalize_type(name, entry) {
            Ok(def) => types.push(def),
            Err(reason) => diagnostics.push(SchemaIssue::MalformedType {
                location: SchemaLocation::of_type(index, name.clone()),
                reason,
            }),
        }
    }
    types
}

/// Classifies a single raw type entry.
pub fn normalize_type(name: &str, entry: &Value) -> Result<TypeDefinition, String> {
    match entry {
        Value::String(wrapped) => Ok(TypeDefinition::wrap(name, parse_named(wrapped)?)),
        Value::Array(elements) => Ok(TypeDefinition::enumeration(name, parse_enumerals(elements)?)),
        Value::Object(obj) => normalize_object(name, obj),
        other => Err(format!("type entry is {}, expected a string, array, or object", describe(other))),
    }
}

fn normalize_object(name: &str, obj: &Map<String, Value>) -> Result<TypeDefinition, String> {
    let def = if let Some(enumerals) = field(obj, ENUMERALS) {
        match enumerals {
            Value::Array(elements) => TypeDefinition::enumeration(name, parse_enumerals(elements)?),
            other => return Err(format!("enumerals must be an array, found {}", describe(other))),
        }
    } else if let Some(members) = field(obj, MEMBERS) {
        TypeDefinition::structure(name, parse_members(members)?)
    } else if let Some(wrapped) = field(obj, WRAP) {
        TypeDefinition::wrap(name, parse_type_ref(wrapped)?)
    } else {
        TypeDefinition::hollow(name)
    };

    match field(obj, OUTPUT) {
        Some(output) => Ok(def.with_output(parse_type_ref(output).map_err(|e| format!("output: {}", e))?)),
        None => Ok(def),
    }
}

fn parse_enumerals(elements: &[Value]) -> Result<Vec<Enumeral>, String> {
    elements.iter().map(parse_enumeral).collect()
}

fn parse_enumeral(element: &Value) -> Result<Enumeral, String> {
    match element {
        Value::String(tag) if !tag.is_empty() => Ok(Enumeral::tag(tag.clone())),
        Value::Object(obj) => {
            let tag = match obj.get("tag") {
                Some(Value::String(tag)) if !tag.is_empty() => tag.clone(),
                _ => return Err("enumeral object is missing a string 'tag'".to_string()),
            };
            let members = match field(obj, MEMBERS) {
                Some(members) => Some(
                    parse_members(members).map_err(|e| format!("enumeral '{}': {}", tag, e))?,
                ),
                None => None,
            };
            Ok(Enumeral { tag, members })
        }
        other => Err(format!("enumeral is {}, expected a tag string or object", describe(other))),
    }
}

/// Members are an ordered list of single-key objects, or one ordered object.
fn parse_members(value: &Value) -> Result<Vec<Member>, String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(obj) if obj.len() == 1 => {
                    let (name, typ) = obj.iter().next().ok_or("empty member object")?;
                    Ok(Member::new(name.clone(), parse_type_ref(typ).map_err(|e| format!("member '{}': {}", name, e))?))
                }
                _ => Err("each member must be an object with exactly one key".to_string()),
            })
            .collect(),
        Value::Object(obj) => obj
            .iter()
            .map(|(name, typ)| {
                Ok(Member::new(name.clone(), parse_type_ref(typ).map_err(|e| format!("member '{}': {}", name, e))?))
            })
            .collect(),
        other => Err(format!("members must be an array, found {}", describe(other))),
    }
}

/// Parses a raw type reference: a name, or `{"n": "List" | "Option" | "Either", "p": ...}`.
pub fn parse_type_ref(value: &Value) -> Result<TypeRef, String> {
    match value {
        Value::String(name) => parse_named(name),
        Value::Object(obj) => {
            let constructor = match obj.get("n") {
                Some(Value::String(n)) => n.as_str(),
                _ => return Err("type reference object is missing a string 'n'".to_string()),
            };
            let param = obj
                .get("p")
                .ok_or_else(|| format!("'{}' is missing its parameter 'p'", constructor))?;
            match constructor {
                "List" => Ok(TypeRef::list(parse_type_ref(param)?)),
                "Option" => Ok(TypeRef::option(parse_type_ref(param)?)),
                "Either" => match param {
                    Value::Array(pair) if pair.len() == 2 => Ok(TypeRef::either(
                        parse_type_ref(&pair[0])?,
                        parse_type_ref(&pair[1])?,
                    )),
                    _ => Err("'Either' takes exactly two parameters".to_string()),
                },
                other => Err(format!("unknown type constructor '{}'", other)),
            }
        }
        other => Err(format!("type reference is {}", describe(other))),
    }
}

fn parse_named(name: &str) -> Result<TypeRef, String> {
    if name.trim().is_empty() {
        return Err("type name is empty".to_string());
    }
    Ok(TypeRef::named(name))
}

/// Normalizes the call descriptor, falling back to defaults field by field.
pub fn normalize_pull(index: usize, pull: Option<&Value>, diagnostics: &mut Diagnostics) -> PullDescriptor {
    let location = SchemaLocation::snapshot(index);
    let obj = match pull {
        Some(Value::Object(obj)) => obj,
        Some(_) => {
            diagnostics.push(SchemaIssue::MissingPull {
                location,
                reason: "'pull' is not an object, using defaults".to_string(),
            });
            return PullDescriptor::default();
        }
        None => {
            diagnostics.push(SchemaIssue::MissingPull {
                location,
                reason: "document has no 'pull' descriptor, using defaults".to_string(),
            });
            return PullDescriptor::default();
        }
    };

    let mut pull = PullDescriptor::default();
    let mut missing = Vec::new();

    for (key, slot) in [
        ("protocol", &mut pull.protocol),
        ("host", &mut pull.host),
        ("path", &mut pull.path),
        ("name", &mut pull.name),
    ] {
        match obj.get(key) {
            Some(Value::String(s)) => *slot = s.clone(),
            _ => missing.push(key),
        }
    }

    match obj.get("port") {
        Some(Value::Number(n)) => match n.as_u64().and_then(|p| u16::try_from(p).ok()) {
            Some(port) => pull.port = port,
            None => missing.push("port"),
        },
        Some(Value::String(s)) => match s.parse() {
            Ok(port) => pull.port = port,
            Err(_) => missing.push("port"),
        },
        _ => missing.push("port"),
    }

    for (key, slot) in [("meta", &mut pull.meta), ("error", &mut pull.error)] {
        match obj.get(key).map(parse_type_ref) {
            Some(Ok(typ)) => *slot = typ,
            _ => missing.push(key),
        }
    }

    if !missing.is_empty() {
        diagnostics.push(SchemaIssue::MissingPull {
            location,
            reason: format!("'pull' is missing or has invalid {}, using defaults", missing.join(", ")),
        });
    }

    pull
}

fn field<'a>(obj: &'a Map<String, Value>, (short, long): (&str, &str)) -> Option<&'a Value> {
    obj.get(short).or_else(|| obj.get(long))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{TypeKind, Variant};
    use serde_json::json;

    #[test]
    fn test_string_is_wrap() {
        let def = normalize_type("UserId", &json!("String")).unwrap();
        assert_eq!(def.kind, TypeKind::Wrap { wrapped: TypeRef::named("String") });
        assert_eq!(def.name, "UserId");
    }

    #[test]
    fn test_array_is_enumeration() {
        let def = normalize_type(
            "Color",
            &json!(["Red", {"tag": "Custom", "m": [{"hex": "String"}]}]),
        )
        .unwrap();

        match def.kind {
            TypeKind::Enumeration { enumerals } => {
                assert_eq!(enumerals[0], Enumeral::tag("Red"));
                assert_eq!(enumerals[1].tag, "Custom");
                assert_eq!(enumerals[1].members(), &[Member::new("hex", TypeRef::named("String"))]);
            }
            other => panic!("expected enumeration, got {:?}", other),
        }
    }

    #[test]
    fn test_enumerals_field_beats_members() {
        let def = normalize_type(
            "Shape",
            &json!({"e": ["Circle"], "m": [{"x": "Int"}], "o": "Bool"}),
        )
        .unwrap();
        assert_eq!(def.variant(), Variant::Enumeration);
        assert_eq!(def.output, Some(TypeRef::named("Bool")));
    }

    #[test]
    fn test_members_make_struct_in_order() {
        let def = normalize_type(
            "Point",
            &json!({"m": [{"y": "Int"}, {"x": {"n": "Option", "p": "Int"}}]}),
        )
        .unwrap();

        assert_eq!(
            def.kind,
            TypeKind::Struct {
                members: vec![
                    Member::new("y", TypeRef::named("Int")),
                    Member::new("x", TypeRef::option(TypeRef::named("Int"))),
                ]
            }
        );
    }

    #[test]
    fn test_object_members_keep_document_order() {
        let def = normalize_type("Pair", &json!({"members": {"b": "Int", "a": "Int"}})).unwrap();
        match def.kind {
            TypeKind::Struct { members } => {
                let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
                assert_eq!(names, vec!["b", "a"]);
            }
            other => panic!("expected struct, got {:?}", other),
        }
    }

    #[test]
    fn test_wrap_call_and_hollow() {
        let wrap = normalize_type("Echo", &json!({"w": "String", "o": "String"})).unwrap();
        assert_eq!(wrap.variant(), Variant::Wrap);
        assert!(wrap.is_call());

        let hollow = normalize_type("Ping", &json!({"o": "Unit"})).unwrap();
        assert_eq!(hollow.variant(), Variant::Hollow);
        assert!(hollow.is_call());
    }

    #[test]
    fn test_either_type_ref() {
        let typ = parse_type_ref(&json!({"n": "Either", "p": ["String", {"n": "List", "p": "Int"}]})).unwrap();
        assert_eq!(typ.to_string(), "Either<String, List<Int>>");

        assert!(parse_type_ref(&json!({"n": "Either", "p": "Int"})).is_err());
        assert!(parse_type_ref(&json!({"n": "Map", "p": "Int"})).is_err());
        assert!(parse_type_ref(&json!(42)).is_err());
    }

    #[test]
    fn test_malformed_entry_does_not_stop_siblings() {
        let mut diagnostics = Diagnostics::new();
        let types = normalize_schema(
            3,
            Some(&json!({"A": "Int", "Bad": 7, "C": ["X"]})),
            &mut diagnostics,
        );

        let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(diagnostics.len(), 1);
        let issue = diagnostics.iter().next().unwrap();
        assert!(matches!(issue, SchemaIssue::MalformedType { .. }));
        assert_eq!(issue.location(), &SchemaLocation::of_type(3, "Bad"));
    }

    #[test]
    fn test_missing_schema_is_empty_with_issue() {
        let mut diagnostics = Diagnostics::new();
        let types = normalize_schema(0, None, &mut diagnostics);
        assert!(types.is_empty());
        assert!(matches!(diagnostics.iter().next(), Some(SchemaIssue::MissingSchema { .. })));

        let mut diagnostics = Diagnostics::new();
        let types = normalize_schema(0, Some(&json!(["A"])), &mut diagnostics);
        assert!(types.is_empty());
        assert!(matches!(diagnostics.iter().next(), Some(SchemaIssue::SchemaNotObject { .. })));
    }

    #[test]
    fn test_document_with_version_and_pull() {
        let doc = json!({
            "version": {"major": 2, "minor": 1},
            "pull": {
                "protocol": "https", "host": "api.example.com", "port": 443, "path": "/rpc",
                "name": "Shop", "meta": "Unit", "error": "ShopError"
            },
            "schema": {"ShopError": ["NotFound"]}
        });

        let mut diagnostics = Diagnostics::new();
        let snapshot = normalize_document(0, &doc, &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(snapshot.declared_version, Some(Version::new(2, 1)));
        assert_eq!(snapshot.pull.port, 443);
        assert_eq!(snapshot.pull.error, TypeRef::named("ShopError"));
        assert_eq!(snapshot.types.len(), 1);
    }

    #[test]
    fn test_partial_pull_uses_defaults() {
        let mut diagnostics = Diagnostics::new();
        let pull = normalize_pull(1, Some(&json!({"name": "Svc", "port": "9000"})), &mut diagnostics);

        assert_eq!(pull.name, "Svc");
        assert_eq!(pull.port, 9000);
        assert_eq!(pull.host, PullDescriptor::default().host);
        assert_eq!(diagnostics.len(), 1);
    }
}
