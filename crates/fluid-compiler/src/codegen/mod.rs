//! Code generation from resolved specs.
//!
//! Emitters never see the engine's internals. They receive one [`SpecView`]
//! per resolved spec, rendered in the emitter's own [`TypeSyntax`], and
//! return the files to write:
//! - `json`: the views themselves, for downstream tooling
//! - `haskell`: client and server modules, one per supported major

mod haskell;
mod json;
pub mod syntax;
pub mod view;

use std::collections::BTreeMap;

use crate::config::Side;
use crate::diagnostic::FluidError;

pub use haskell::HaskellEmitter;
pub use json::JsonEmitter;
pub use syntax::{lowercase_first, CanonicalSyntax, HaskellSyntax, TypeSyntax};
pub use view::SpecView;

/// Generated code.
#[derive(Debug, Clone, Default)]
pub struct GeneratedCode {
    /// Relative path and content of each file.
    pub files: Vec<(String, String)>,
}

/// Options an emitter receives besides the views.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub side: Side,
    /// Module name or prefix.
    pub prefix: String,
    /// Name of the top-level file and directory.
    pub name: String,
    /// Add-on identifiers; each emitter decides which it understands.
    pub addons: Vec<String>,
}

impl EmitOptions {
    pub fn has_addon(&self, addon: &str) -> bool {
        self.addons.iter().any(|a| a == addon)
    }
}

/// A code generation back-end.
pub trait Emitter {
    /// Identifier used to select this emitter (e.g. "haskell").
    fn target(&self) -> &'static str;

    /// Syntax the views handed to [`Emitter::generate`] must be built with.
    fn syntax(&self) -> &dyn TypeSyntax;

    /// Generates files from views ordered oldest first.
    fn generate(&self, views: &[SpecView], options: &EmitOptions) -> Result<GeneratedCode, FluidError>;
}

/// Creates an emitter for the given target.
pub fn create_emitter(target: &str) -> Result<Box<dyn Emitter>, FluidError> {
    match target {
        "haskell" => Ok(Box::new(HaskellEmitter)),
        "json" => Ok(Box::new(JsonEmitter)),
        other => Err(FluidError::UnsupportedTarget {
            target: other.to_string(),
        }),
    }
}

/// One view per major version, ordered by major.
///
/// Several specs can resolve to the same version; the last one wins.
pub fn by_major(views: &[SpecView]) -> Vec<&SpecView> {
    let mut majors: BTreeMap<u32, &SpecView> = BTreeMap::new();
    for view in views {
        majors.insert(view.version.major, view);
    }
    majors.into_values().collect()
}

/// The newest view, or `NoSpecs` when there is none.
pub(crate) fn latest(views: &[SpecView]) -> Result<&SpecView, FluidError> {
    views.last().ok_or(FluidError::NoSpecs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(major: u32, minor: u32, name: &str) -> SpecView {
        SpecView {
            module: "Api".to_string(),
            version: crate::ir::Version::new(major, minor),
            name: name.to_string(),
            lowercase_name: lowercase_first(name),
            error: "Unit".to_string(),
            meta: "Unit".to_string(),
            meta_version: "Unit".to_string(),
            hollow: Vec::new(),
            structs: Vec::new(),
            enumeration: Vec::new(),
            wrap: Vec::new(),
            pull: view::PullView {
                protocol: "http".to_string(),
                host: "localhost".to_string(),
                port: 8080,
                path: "/".to_string(),
            },
            type_source: BTreeMap::new(),
            original: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_by_major_keeps_last_per_major() {
        let views = vec![view(0, 1, "A"), view(1, 0, "B"), view(1, 0, "C")];
        let layout = by_major(&views);

        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].name, "A");
        assert_eq!(layout[1].name, "C");
    }

    #[test]
    fn test_create_emitter() {
        assert_eq!(create_emitter("haskell").unwrap().target(), "haskell");
        assert_eq!(create_emitter("json").unwrap().target(), "json");
        assert!(matches!(
            create_emitter("cobol"),
            Err(FluidError::UnsupportedTarget { target }) if target == "cobol"
        ));
    }
}
