//! Language-agnostic intermediate representation.
//!
//! The normalizer produces this IR from raw spec documents; the schema
//! evolution engine and the code generators consume it. Variants are decided
//! once during normalization and are never re-derived from field presence.

mod snapshot;
mod types;

pub use snapshot::{PullDescriptor, Snapshot, Version};
pub use types::{Enumeral, Member, TypeDefinition, TypeKind, TypeRef, Variant};

/// Primitive type names every spec may reference without defining.
pub const PRIMITIVES: &[&str] = &[
    "Unit", "Bool", "Int", "Num", "Char", "String",
    "I8", "I16", "I32", "I64",
    "U8", "U16", "U32", "U64",
];

/// Whether `name` is a built-in primitive.
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}
