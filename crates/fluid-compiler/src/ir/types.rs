//! Canonical type definitions.

use std::fmt;

/// A reference to a type from a member, wrap, or call output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A primitive (`Int`, `String`, ...) or a type defined in the same spec.
    Named(String),
    List(Box<TypeRef>),
    Option(Box<TypeRef>),
    Either(Box<TypeRef>, Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn option(inner: TypeRef) -> Self {
        TypeRef::Option(Box::new(inner))
    }

    pub fn either(left: TypeRef, right: TypeRef) -> Self {
        TypeRef::Either(Box::new(left), Box::new(right))
    }

    /// Every named leaf in this reference, left to right.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeRef::Named(name) => out.push(name),
            TypeRef::List(inner) | TypeRef::Option(inner) => inner.collect_names(out),
            TypeRef::Either(left, right) => {
                left.collect_names(out);
                right.collect_names(out);
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "List<{}>", inner),
            TypeRef::Option(inner) => write!(f, "Option<{}>", inner),
            TypeRef::Either(left, right) => write!(f, "Either<{}, {}>", left, right),
        }
    }
}

/// A named, typed field of a struct or enumeral.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub name: String,
    pub typ: TypeRef,
}

impl Member {
    pub fn new(name: impl Into<String>, typ: TypeRef) -> Self {
        Self {
            name: name.into(),
            typ,
        }
    }
}

/// One alternative of an enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeral {
    pub tag: String,
    /// `None` for a bare tag.
    pub members: Option<Vec<Member>>,
}

impl Enumeral {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            members: None,
        }
    }

    /// Members of this enumeral; a bare tag has none.
    pub fn members(&self) -> &[Member] {
        self.members.as_deref().unwrap_or(&[])
    }
}

/// The shape of a type, decided once by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Wrap { wrapped: TypeRef },
    Struct { members: Vec<Member> },
    Enumeration { enumerals: Vec<Enumeral> },
    Hollow,
}

/// Variant tag of a [`TypeKind`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    Wrap,
    Struct,
    Enumeration,
    Hollow,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Wrap => "wrap",
            Variant::Struct => "struct",
            Variant::Enumeration => "enumeration",
            Variant::Hollow => "hollow",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical type definition within one spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    /// Present when the type doubles as an invocable call.
    pub output: Option<TypeRef>,
}

impl TypeDefinition {
    pub fn wrap(name: impl Into<String>, wrapped: TypeRef) -> Self {
        Self::new(name, TypeKind::Wrap { wrapped })
    }

    pub fn structure(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self::new(name, TypeKind::Struct { members })
    }

    pub fn enumeration(name: impl Into<String>, enumerals: Vec<Enumeral>) -> Self {
        Self::new(name, TypeKind::Enumeration { enumerals })
    }

    pub fn hollow(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Hollow)
    }

    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            output: None,
        }
    }

    /// Marks this definition as a call returning `output`.
    pub fn with_output(mut self, output: TypeRef) -> Self {
        self.output = Some(output);
        self
    }

    pub fn variant(&self) -> Variant {
        match self.kind {
            TypeKind::Wrap { .. } => Variant::Wrap,
            TypeKind::Struct { .. } => Variant::Struct,
            TypeKind::Enumeration { .. } => Variant::Enumeration,
            TypeKind::Hollow => Variant::Hollow,
        }
    }

    pub fn is_call(&self) -> bool {
        self.output.is_some()
    }

    /// Every type reference this definition makes, including its output.
    pub fn references(&self) -> Vec<&TypeRef> {
        let mut refs = Vec::new();
        match &self.kind {
            TypeKind::Wrap { wrapped } => refs.push(wrapped),
            TypeKind::Struct { members } => refs.extend(members.iter().map(|m| &m.typ)),
            TypeKind::Enumeration { enumerals } => {
                for enumeral in enumerals {
                    refs.extend(enumeral.members().iter().map(|m| &m.typ));
                }
            }
            TypeKind::Hollow => {}
        }
        refs.extend(self.output.iter());
        refs
    }
}
