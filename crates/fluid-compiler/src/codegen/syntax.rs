//! Rendering type references in a target language's syntax.

use crate::ir::TypeRef;

/// How a target language spells type references.
pub trait TypeSyntax {
    /// Target spelling of a primitive, or `None` for a user-defined name.
    fn primitive(&self, name: &str) -> Option<&'static str>;

    fn list(&self, inner: &str) -> String;

    fn option(&self, inner: &str) -> String;

    fn either(&self, left: &str, right: &str) -> String;

    /// A user-defined name qualified by the major version that defines it.
    fn qualify(&self, name: &str, major: u32) -> String;

    fn type_name(&self, name: &str) -> String {
        self.primitive(name)
            .map(str::to_string)
            .unwrap_or_else(|| name.to_string())
    }

    fn render(&self, typ: &TypeRef) -> String {
        self.render_with(typ, &|name: &str| self.type_name(name))
    }

    /// Renders `typ` with every user-defined name qualified by `major`.
    fn render_versioned(&self, typ: &TypeRef, major: u32) -> String {
        self.render_with(typ, &|name: &str| match self.primitive(name) {
            Some(prim) => prim.to_string(),
            None => self.qualify(name, major),
        })
    }

    fn render_with(&self, typ: &TypeRef, name: &dyn Fn(&str) -> String) -> String {
        match typ {
            TypeRef::Named(n) => name(n),
            TypeRef::List(inner) => self.list(&self.render_with(inner, name)),
            TypeRef::Option(inner) => self.option(&self.render_with(inner, name)),
            TypeRef::Either(left, right) => {
                self.either(&self.render_with(left, name), &self.render_with(right, name))
            }
        }
    }
}

/// The language-neutral spelling used by the JSON emitter and `fluid diff`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalSyntax;

impl TypeSyntax for CanonicalSyntax {
    fn primitive(&self, _name: &str) -> Option<&'static str> {
        None
    }

    fn list(&self, inner: &str) -> String {
        format!("List<{}>", inner)
    }

    fn option(&self, inner: &str) -> String {
        format!("Option<{}>", inner)
    }

    fn either(&self, left: &str, right: &str) -> String {
        format!("Either<{}, {}>", left, right)
    }

    fn qualify(&self, name: &str, _major: u32) -> String {
        name.to_string()
    }
}

/// Haskell spelling; generated modules import `Prelude as P`,
/// `Data.Text as T`, and `Data.Int`/`Data.Word` as `I`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaskellSyntax;

impl TypeSyntax for HaskellSyntax {
    fn primitive(&self, name: &str) -> Option<&'static str> {
        let prim = match name {
            "Unit" => "()",
            "Bool" => "P.Bool",
            "Int" => "P.Int",
            "Num" => "P.Double",
            "Char" => "P.Char",
            "String" => "T.Text",
            "I8" => "I.Int8",
            "I16" => "I.Int16",
            "I32" => "I.Int32",
            "I64" => "I.Int64",
            "U8" => "I.Word8",
            "U16" => "I.Word16",
            "U32" => "I.Word32",
            "U64" => "I.Word64",
            _ => return None,
        };
        Some(prim)
    }

    fn list(&self, inner: &str) -> String {
        format!("[{}]", inner)
    }

    fn option(&self, inner: &str) -> String {
        format!("(P.Maybe {})", inner)
    }

    fn either(&self, left: &str, right: &str) -> String {
        format!("(P.Either ({}) ({}))", left, right)
    }

    fn qualify(&self, name: &str, major: u32) -> String {
        format!("V{}.{}", major, name)
    }
}

/// Lowercases the first character: `GetUser` → `getUser`.
pub fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TypeRef {
        TypeRef::either(
            TypeRef::list(TypeRef::named("User")),
            TypeRef::option(TypeRef::named("String")),
        )
    }

    #[test]
    fn test_canonical_matches_display() {
        let typ = sample();
        assert_eq!(CanonicalSyntax.render(&typ), typ.to_string());
        assert_eq!(CanonicalSyntax.render(&typ), "Either<List<User>, Option<String>>");
    }

    #[test]
    fn test_haskell_rendering() {
        assert_eq!(HaskellSyntax.render(&sample()), "(P.Either ([User]) ((P.Maybe T.Text)))");
        assert_eq!(HaskellSyntax.render(&TypeRef::named("Unit")), "()");
        assert_eq!(HaskellSyntax.render(&TypeRef::named("U16")), "I.Word16");
    }

    #[test]
    fn test_haskell_versioned_names() {
        let typ = TypeRef::list(TypeRef::named("User"));
        assert_eq!(HaskellSyntax.render_versioned(&typ, 2), "[V2.User]");
        assert_eq!(HaskellSyntax.render_versioned(&TypeRef::named("Int"), 2), "P.Int");
    }

    #[test]
    fn test_lowercase_first() {
        assert_eq!(lowercase_first("GetUser"), "getUser");
        assert_eq!(lowercase_first("x"), "x");
        assert_eq!(lowercase_first(""), "");
    }
}
