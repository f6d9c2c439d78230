//! The per-language view of a resolved spec that emitters consume.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::ir::{Member, TypeDefinition, TypeKind, TypeRef, Version};
use crate::schema::ResolvedSpec;

use super::syntax::{lowercase_first, TypeSyntax};

/// A resolved spec rendered for one target syntax.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecView {
    /// Module name or prefix of the generated code.
    pub module: String,
    pub version: Version,
    /// Service name from the pull descriptor.
    pub name: String,
    pub lowercase_name: String,
    pub error: String,
    pub meta: String,
    /// `meta`, qualified by this spec's major.
    pub meta_version: String,
    pub hollow: Vec<HollowView>,
    #[serde(rename = "struct")]
    pub structs: Vec<StructView>,
    pub enumeration: Vec<EnumerationView>,
    pub wrap: Vec<WrapView>,
    pub pull: PullView,
    pub type_source: BTreeMap<String, u32>,
    pub original: Value,
}

/// Fields every type record carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeHead {
    pub name: String,
    pub label: String,
    pub lowercase_name: String,
    /// Name of the call function; present only for invocable types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub func: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HollowView {
    #[serde(flatten)]
    pub head: TypeHead,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructView {
    #[serde(flatten)]
    pub head: TypeHead,
    pub members: Vec<MemberView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumerationView {
    #[serde(flatten)]
    pub head: TypeHead,
    pub enumerals: Vec<EnumeralView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrapView {
    #[serde(flatten)]
    pub head: TypeHead,
    #[serde(rename = "type")]
    pub typ: String,
    pub instances: WrapInstances,
}

/// Which literal instances a wrapper can derive from its wrapped primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WrapInstances {
    pub text: bool,
    pub number: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberView {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub typ: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumeralView {
    pub tag: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<MemberView>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullView {
    pub protocol: String,
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl SpecView {
    pub fn build(spec: &ResolvedSpec, module: &str, syntax: &dyn TypeSyntax) -> Self {
        let snapshot = &spec.snapshot;
        let pull = &snapshot.pull;

        let mut view = SpecView {
            module: module.to_string(),
            version: spec.version,
            name: pull.name.clone(),
            lowercase_name: lowercase_first(&pull.name),
            error: syntax.render(&pull.error),
            meta: syntax.render(&pull.meta),
            meta_version: syntax.render_versioned(&pull.meta, spec.version.major),
            hollow: Vec::new(),
            structs: Vec::new(),
            enumeration: Vec::new(),
            wrap: Vec::new(),
            pull: PullView {
                protocol: pull.protocol.clone(),
                host: pull.host.clone(),
                port: pull.port,
                path: pull.path.clone(),
            },
            type_source: spec.type_source.clone(),
            original: spec.original.clone(),
        };

        for def in &snapshot.types {
            let head = type_head(def, syntax);
            match &def.kind {
                TypeKind::Hollow => view.hollow.push(HollowView { head }),
                TypeKind::Struct { members } => view.structs.push(StructView {
                    head,
                    members: member_views(members, syntax),
                }),
                TypeKind::Enumeration { enumerals } => view.enumeration.push(EnumerationView {
                    head,
                    enumerals: enumerals
                        .iter()
                        .map(|e| EnumeralView {
                            tag: syntax.type_name(&e.tag),
                            label: e.tag.clone(),
                            members: e.members.as_deref().map(|m| member_views(m, syntax)),
                        })
                        .collect(),
                }),
                TypeKind::Wrap { wrapped } => view.wrap.push(WrapView {
                    head,
                    typ: syntax.render(wrapped),
                    instances: wrap_instances(wrapped),
                }),
            }
        }

        view
    }

    /// Whether `name` is defined by an older major than this view's.
    pub fn is_inherited(&self, name: &str) -> bool {
        self.source_major(name)
            .is_some_and(|major| major < self.version.major)
    }

    pub fn source_major(&self, name: &str) -> Option<u32> {
        self.type_source.get(name).copied()
    }

    /// Every type head in declaration-group order: hollow, wrap, struct, enumeration.
    pub fn heads(&self) -> impl Iterator<Item = &TypeHead> {
        self.hollow
            .iter()
            .map(|t| &t.head)
            .chain(self.wrap.iter().map(|t| &t.head))
            .chain(self.structs.iter().map(|t| &t.head))
            .chain(self.enumeration.iter().map(|t| &t.head))
    }

    /// Type heads that double as calls.
    pub fn calls(&self) -> impl Iterator<Item = &TypeHead> {
        self.heads().filter(|head| head.func.is_some())
    }
}

fn type_head(def: &TypeDefinition, syntax: &dyn TypeSyntax) -> TypeHead {
    let name = syntax.type_name(&def.name);
    let lowercase_name = lowercase_first(&name);
    TypeHead {
        func: def.output.as_ref().map(|_| lowercase_name.clone()),
        output: def.output.as_ref().map(|o| syntax.render(o)),
        label: def.name.clone(),
        lowercase_name,
        name,
    }
}

fn member_views(members: &[Member], syntax: &dyn TypeSyntax) -> Vec<MemberView> {
    members
        .iter()
        .map(|m| MemberView {
            name: m.name.clone(),
            label: m.name.clone(),
            typ: syntax.render(&m.typ),
        })
        .collect()
}

fn wrap_instances(wrapped: &TypeRef) -> WrapInstances {
    let named = match wrapped {
        TypeRef::Named(name) => name.as_str(),
        _ => "",
    };
    WrapInstances {
        text: named == "String",
        number: matches!(named, "Int" | "Num"),
    }
}
