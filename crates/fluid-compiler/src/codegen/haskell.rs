//! Haskell emitter.
//!
//! Client side writes one module for the newest spec. Server side writes a
//! module per supported major plus a root module re-exporting the newest;
//! a versioned module re-exports types it inherited from an older major
//! instead of declaring them again.

use std::collections::BTreeSet;

use crate::config::Side;
use crate::diagnostic::FluidError;

use super::syntax::{HaskellSyntax, TypeSyntax};
use super::view::{EnumerationView, MemberView, SpecView, StructView, TypeHead, WrapView};
use super::{by_major, latest, EmitOptions, Emitter, GeneratedCode};

const HTTP_CLIENT: &str = "http-client";

pub struct HaskellEmitter;

impl Emitter for HaskellEmitter {
    fn target(&self) -> &'static str {
        "haskell"
    }

    fn syntax(&self) -> &dyn TypeSyntax {
        &HaskellSyntax
    }

    fn generate(&self, views: &[SpecView], options: &EmitOptions) -> Result<GeneratedCode, FluidError> {
        let newest = latest(views)?;
        check_addons(options);

        let mut files = Vec::new();
        match options.side {
            Side::Client => {
                files.push((format!("{}.hs", options.name), client_module(newest, options)));
            }
            Side::Server => {
                let majors = by_major(views);
                let emitted: BTreeSet<u32> = majors.iter().map(|v| v.version.major).collect();
                files.push((format!("{}.hs", options.name), server_root(newest, &majors, options)));
                for view in majors {
                    files.push((
                        format!("{}/V{}.hs", options.name, view.version.major),
                        server_module(view, &emitted, options),
                    ));
                }
            }
        }

        Ok(GeneratedCode { files })
    }
}

fn check_addons(options: &EmitOptions) {
    for addon in &options.addons {
        match (addon.as_str(), options.side) {
            (HTTP_CLIENT, Side::Client) => {}
            (HTTP_CLIENT, Side::Server) => {
                tracing::warn!(addon = %addon, "add-on only applies to client code, ignoring")
            }
            _ => tracing::warn!(addon = %addon, target = "haskell", "unknown add-on, ignoring"),
        }
    }
}

// =========================================================================
// Modules
// =========================================================================

fn client_module(view: &SpecView, options: &EmitOptions) -> String {
    let http_client = options.has_addon(HTTP_CLIENT);
    let lc = &view.lowercase_name;

    let mut exports = vec![format!("{}'Version", lc), format!("{}'Pull", lc)];
    exports.extend(view.heads().map(|head| format!("{}(..)", head.name)));
    exports.extend(view.calls().filter_map(|head| head.func.clone()));
    exports.extend(expression_exports(view));
    if http_client {
        exports.push(format!("{}'HttpClient'Post", lc));
    }

    let mut output = pragmas();
    output.push_str(&module_header(&view.module, &exports));
    output.push_str(&imports("Fluid.Client"));
    output.push_str("import qualified Data.Map as Map\n");
    if http_client {
        output.push_str("import qualified Data.ByteString.Lazy as R\n");
        output.push_str("import qualified Fluid.Client.HttpClient as HttpClient\n");
    }

    output.push_str(&version_and_pull(view));
    output.push_str(&declarations(view, |_| true));
    output.push_str(&client_calls(view));
    output.push_str(&client_expressions(view));
    if http_client {
        output.push_str(&http_client_post(view));
    }
    output
}

/// A versioned server module. Inherited types are imported only when their
/// source major is among `emitted`; otherwise they are declared here.
fn server_module(view: &SpecView, emitted: &BTreeSet<u32>, options: &EmitOptions) -> String {
    let lc = &view.lowercase_name;
    let imported = |label: &str| {
        view.is_inherited(label)
            && view
                .source_major(label)
                .is_some_and(|major| emitted.contains(&major))
    };
    let module = versioned_module(&options.prefix, view.version.major);

    let mut exports = vec![
        format!("{}'Version", lc),
        format!("{}'Pull", lc),
        format!("{}'Service(..)", view.name),
    ];
    exports.extend(view.heads().map(|head| format!("{}(..)", head.name)));

    let mut output = pragmas();
    output.push_str(&module_header(&module, &exports));
    output.push_str(&imports("Fluid.Server"));

    for head in view.heads().filter(|head| imported(&head.label)) {
        if let Some(source) = view.source_major(&head.label) {
            output.push_str(&format!(
                "import {} ({}(..))\n",
                versioned_module(&options.prefix, source),
                head.name
            ));
        }
    }

    output.push_str(&version_and_pull(view));
    output.push_str(&declarations(view, |label| !imported(label)));
    output.push_str(&service_class(view));
    output
}

fn server_root(newest: &SpecView, majors: &[&SpecView], options: &EmitOptions) -> String {
    let lc = &newest.lowercase_name;
    let newest_module = versioned_module(&options.prefix, newest.version.major);
    let supported: Vec<String> = majors.iter().map(|v| v.version.major.to_string()).collect();

    let mut output = String::new();
    output.push_str(&module_header(
        &options.prefix,
        &[format!("module {}", newest_module), format!("{}'Majors", lc)],
    ));
    output.push('\n');
    output.push_str("import qualified Prelude as P\n");
    output.push_str(&format!("import {}\n", newest_module));
    output.push('\n');
    output.push_str(&format!("{}'Majors :: [P.Int]\n", lc));
    output.push_str(&format!("{}'Majors = [{}]\n", lc, supported.join(", ")));
    output
}

fn versioned_module(prefix: &str, major: u32) -> String {
    format!("{}.V{}", prefix, major)
}

fn pragmas() -> String {
    let mut output = String::from("-- Pragmas\n");
    for pragma in [
        "DeriveGeneric",
        "DuplicateRecordFields",
        "EmptyDataDeriving",
        "FlexibleContexts",
        "GeneralizedNewtypeDeriving",
        "LambdaCase",
        "FlexibleInstances",
        "MultiParamTypeClasses",
        "NamedFieldPuns",
        "NoImplicitPrelude",
        "OverloadedStrings",
    ] {
        output.push_str(&format!("{{-# LANGUAGE {} #-}}\n", pragma));
    }
    output
}

fn module_header(module: &str, exports: &[String]) -> String {
    let mut output = format!("\nmodule {}\n", module);
    for (i, export) in exports.iter().enumerate() {
        let lead = if i == 0 { "(" } else { "," };
        output.push_str(&format!("  {} {}\n", lead, export));
    }
    output.push_str("  ) where\n");
    output
}

fn imports(runtime: &str) -> String {
    let mut output = String::from("\n-- Imports\n");
    output.push_str("import qualified Prelude as P\n");
    output.push_str("import qualified Data.Text as T\n");
    output.push_str("import qualified Data.String as P (IsString)\n");
    output.push_str("import qualified Data.Int as I\n");
    output.push_str("import qualified Data.Word as I\n");
    output.push_str(&format!("import qualified {} as C\n", runtime));
    output.push_str("import qualified Fluid.Ast as Ast\n");
    output
}

fn version_and_pull(view: &SpecView) -> String {
    let lc = &view.lowercase_name;
    let pull = &view.pull;

    let mut output = String::from("\n");
    output.push_str(&format!("{}'Version :: C.Version\n", lc));
    output.push_str(&format!(
        "{}'Version = C.Version {} {}\n",
        lc, view.version.major, view.version.minor
    ));
    output.push('\n');
    output.push_str(&format!("{}'Pull :: C.Pull\n", lc));
    output.push_str(&format!(
        "{}'Pull = C.Pull \"{}\" \"{}\" \"{}\" {}\n",
        lc, pull.protocol, pull.host, pull.path, pull.port
    ));
    output
}

// =========================================================================
// Declarations
// =========================================================================

/// Declares every type whose label passes `include`.
fn declarations(view: &SpecView, include: impl Fn(&str) -> bool) -> String {
    let mut output = String::new();

    for hollow in view.hollow.iter().filter(|t| include(&t.head.label)) {
        output.push_str(&format!("\n-- Hollow: {}\n", hollow.head.label));
        output.push_str(&format!("data {} = {}\n", hollow.head.name, hollow.head.name));
        output.push_str("  deriving (P.Show, P.Eq)\n");
    }
    for wrap in view.wrap.iter().filter(|t| include(&t.head.label)) {
        output.push_str(&declare_wrap(wrap));
    }
    for structure in view.structs.iter().filter(|t| include(&t.head.label)) {
        output.push_str(&declare_struct(structure));
    }
    for enumeration in view.enumeration.iter().filter(|t| include(&t.head.label)) {
        output.push_str(&declare_enumeration(enumeration));
    }

    output
}

fn declare_wrap(wrap: &WrapView) -> String {
    let name = &wrap.head.name;
    let mut deriving = vec!["P.Eq", "P.Ord", "P.Show"];
    if wrap.instances.text {
        deriving.push("P.IsString");
    }
    if wrap.instances.number {
        deriving.push("P.Num");
    }

    let mut output = format!("\n-- Wrap: {}\n", wrap.head.label);
    output.push_str(&format!("newtype {} = {} {}\n", name, name, wrap.typ));
    output.push_str(&format!("  deriving ({})\n", deriving.join(", ")));
    output
}

fn declare_struct(structure: &StructView) -> String {
    let name = &structure.head.name;
    let mut output = format!("\n-- Struct: {}\n", structure.head.label);

    if structure.members.is_empty() {
        output.push_str(&format!("data {} = {}\n", name, name));
        output.push_str("  deriving (P.Show, P.Eq)\n");
        return output;
    }

    output.push_str(&format!("data {} = {}\n", name, name));
    for (i, member) in structure.members.iter().enumerate() {
        let lead = if i == 0 { "{" } else { "," };
        output.push_str(&format!("  {} {} :: {}\n", lead, member.name, member.typ));
    }
    output.push_str("  } deriving (P.Show, P.Eq)\n");
    output
}

fn declare_enumeration(enumeration: &EnumerationView) -> String {
    let name = &enumeration.head.name;
    let mut output = format!("\n-- Enumeration: {}\n", enumeration.head.label);
    output.push_str(&format!("data {}\n", name));

    for (i, enumeral) in enumeration.enumerals.iter().enumerate() {
        let lead = if i == 0 { "=" } else { "|" };
        output.push_str(&format!("  {} {}'{}\n", lead, name, enumeral.tag));

        let members = enumeral.members.as_deref().unwrap_or(&[]);
        for (j, member) in members.iter().enumerate() {
            let lead = if j == 0 { "{" } else { "," };
            output.push_str(&format!("    {} {} :: {}\n", lead, member.name, member.typ));
        }
        if !members.is_empty() {
            output.push_str("    }\n");
        }
    }

    output.push_str("  deriving (P.Show, P.Eq)\n");
    output
}

// =========================================================================
// Calls
// =========================================================================

fn client_calls(view: &SpecView) -> String {
    let mut output = String::new();

    for head in view.hollow.iter().map(|t| &t.head) {
        if let (Some(func), Some(out)) = (&head.func, &head.output) {
            output.push('\n');
            output.push_str(&format!("{} :: C.Expr {}\n", func, out));
            output.push_str(&format!(
                "{} = C.unsafeExpr (Ast.Ast'HollowCall (Ast.HollowCall \"{}\"))\n",
                func, head.label
            ));
        }
    }

    let calls = view
        .wrap
        .iter()
        .map(|t| (&t.head, "Wrap"))
        .chain(view.structs.iter().map(|t| (&t.head, "Struct")))
        .chain(view.enumeration.iter().map(|t| (&t.head, "Enumeration")));
    for (head, kind) in calls {
        output.push_str(&input_call(head, kind));
    }

    output
}

fn input_call(head: &TypeHead, kind: &str) -> String {
    let (Some(func), Some(out)) = (&head.func, &head.output) else {
        return String::new();
    };

    let mut output = String::from("\n");
    output.push_str(&format!("{} :: C.Expr {} -> C.Expr {}\n", func, head.name, out));
    output.push_str(&format!(
        "{} expr'' = C.unsafeExpr (Ast.Ast'{}Call (Ast.{}Call \"{}\" (Ast.toAst expr'')))\n",
        func, kind, kind, head.label
    ));
    output
}

// =========================================================================
// Client expressions
// =========================================================================

/// Builders, paths and lifters exported next to the calls.
fn expression_exports(view: &SpecView) -> Vec<String> {
    let mut exports = Vec::new();

    for head in view.structs.iter().map(|t| &t.head).chain(view.wrap.iter().map(|t| &t.head)) {
        exports.push(format!("{}'Mk", head.lowercase_name));
    }
    for enumeration in &view.enumeration {
        for enumeral in &enumeration.enumerals {
            exports.push(format!("{}'{}'Mk", enumeration.head.lowercase_name, enumeral.tag));
        }
    }

    let lifted = view
        .structs
        .iter()
        .map(|t| &t.head)
        .chain(view.wrap.iter().map(|t| &t.head))
        .chain(view.enumeration.iter().map(|t| &t.head));
    exports.extend(lifted.map(|head| format!("{}'", head.lowercase_name)));

    for structure in &view.structs {
        for member in &structure.members {
            exports.push(format!("{}'{}", structure.head.lowercase_name, member.name));
        }
    }
    exports
}

fn client_expressions(view: &SpecView) -> String {
    let mut output = String::new();
    for wrap in &view.wrap {
        output.push_str(&wrap_expressions(wrap));
    }
    for structure in &view.structs {
        output.push_str(&struct_expressions(structure));
    }
    for enumeration in &view.enumeration {
        output.push_str(&enumeration_expressions(enumeration));
    }
    output
}

/// `x' :: X -> C.Expr X`, shared by every non-hollow type.
fn lift(head: &TypeHead) -> String {
    let mut output = String::from("\n");
    output.push_str(&format!("{}' :: {} -> C.Expr {}\n", head.lowercase_name, head.name, head.name));
    output.push_str(&format!("{}' = C.unsafeExpr P.. Ast.toAst\n", head.lowercase_name));
    output
}

/// Curried builder signature `C.Expr (a -> b -> Name)`.
fn builder_type(members: &[MemberView], name: &str) -> String {
    let mut parts: Vec<&str> = members.iter().map(|m| m.typ.as_str()).collect();
    parts.push(name);
    format!("C.Expr ({})", parts.join(" -> "))
}

fn quoted_labels(members: &[MemberView]) -> String {
    let labels: Vec<String> = members.iter().map(|m| format!("\"{}\"", m.label)).collect();
    format!("[{}]", labels.join(", "))
}

/// Pattern binding every member by name, e.g. `{ id, title }`.
fn puns(members: &[MemberView], indent: &str) -> String {
    let mut output = String::new();
    for (i, member) in members.iter().enumerate() {
        let lead = if i == 0 { "{" } else { "," };
        output.push_str(&format!("{}{} {}\n", indent, lead, member.name));
    }
    output.push_str(&format!("{}}}", indent));
    output
}

/// `Map.fromList` of every member converted to its AST.
fn member_map(members: &[MemberView], indent: &str) -> String {
    let mut output = String::new();
    for (i, member) in members.iter().enumerate() {
        let lead = if i == 0 { "[" } else { "," };
        output.push_str(&format!(
            "{}{} (\"{}\", Ast.toAst {})\n",
            indent, lead, member.label, member.name
        ));
    }
    output.push_str(&format!("{}]\n", indent));
    output
}

fn wrap_expressions(wrap: &WrapView) -> String {
    let head = &wrap.head;
    let mut output = String::from("\n");
    output.push_str(&format!("instance Ast.ToAst {} where\n", head.name));
    output.push_str(&format!("  toAst ({} w) = Ast.toAst w\n", head.name));

    output.push('\n');
    output.push_str(&format!("{}'Mk :: C.Expr ({} -> {})\n", head.lowercase_name, wrap.typ, head.name));
    output.push_str(&format!("{}'Mk = C.unsafeWrapExpr\n", head.lowercase_name));
    output.push_str(&lift(head));
    output
}

fn struct_expressions(structure: &StructView) -> String {
    let head = &structure.head;
    let lc = &head.lowercase_name;
    let members = &structure.members;
    let mut output = String::new();

    for member in members {
        output.push('\n');
        output.push_str(&format!("{}'{} :: C.Path ({} -> {})\n", lc, member.name, head.name, member.typ));
        output.push_str(&format!("{}'{} = C.unsafePath [\"{}\"]\n", lc, member.name, member.label));
    }

    output.push_str(&format!("\ninstance Ast.ToAst {} where\n", head.name));
    if members.is_empty() {
        output.push_str(&format!(
            "  toAst {} = Ast.Ast'Struct (Ast.Struct Map.empty)\n",
            head.name
        ));
    } else {
        output.push_str(&format!("  toAst {}\n", head.name));
        output.push_str(&puns(members, "    "));
        output.push_str(" = Ast.Ast'Struct P.. Ast.Struct P.$ Map.fromList\n");
        output.push_str(&member_map(members, "    "));
    }

    output.push('\n');
    output.push_str(&format!("{}'Mk :: {}\n", lc, builder_type(members, &head.name)));
    output.push_str(&format!("{}'Mk = C.unsafeStructExpr {}\n", lc, quoted_labels(members)));
    output.push_str(&lift(head));
    output
}

fn enumeration_expressions(enumeration: &EnumerationView) -> String {
    let head = &enumeration.head;
    let lc = &head.lowercase_name;

    let mut output = format!("\ninstance Ast.ToAst {} where\n", head.name);
    output.push_str("  toAst = \\case\n");
    for enumeral in &enumeration.enumerals {
        let constructor = format!("{}'{}", head.name, enumeral.tag);
        match enumeral.members.as_deref() {
            Some(members) if !members.is_empty() => {
                output.push_str(&format!("    {}\n", constructor));
                output.push_str(&puns(members, "      "));
                output.push_str(&format!(
                    " -> Ast.Ast'Enumeral P.$ Ast.Enumeral \"{}\" P.$ P.Just P.$ Map.fromList\n",
                    enumeral.label
                ));
                output.push_str(&member_map(members, "      "));
            }
            _ => output.push_str(&format!(
                "    {} -> Ast.Ast'Enumeral P.$ Ast.Enumeral \"{}\" P.Nothing\n",
                constructor, enumeral.label
            )),
        }
    }

    for enumeral in &enumeration.enumerals {
        let builder = format!("{}'{}'Mk", lc, enumeral.tag);
        output.push('\n');
        match enumeral.members.as_deref() {
            Some(members) if !members.is_empty() => {
                output.push_str(&format!("{} :: {}\n", builder, builder_type(members, &head.name)));
                output.push_str(&format!(
                    "{} = C.unsafeEnumeralExpr \"{}\" {}\n",
                    builder,
                    enumeral.label,
                    quoted_labels(members)
                ));
            }
            _ => {
                output.push_str(&format!("{} :: C.Expr {}\n", builder, head.name));
                output.push_str(&format!(
                    "{} = C.unsafeExpr P.. Ast.toAst P.$ {}'{}\n",
                    builder, head.name, enumeral.tag
                ));
            }
        }
    }

    output.push_str(&lift(head));
    output
}

fn service_class(view: &SpecView) -> String {
    let mut output = format!("\nclass P.Monad m => {}'Service meta m", view.name);

    let methods: Vec<String> = view
        .calls()
        .filter_map(|head| {
            let func = head.func.as_ref()?;
            let out = head.output.as_ref()?;
            let is_hollow = view.hollow.iter().any(|h| h.head.label == head.label);
            Some(if is_hollow {
                format!("  {} :: meta -> m {}\n", func, out)
            } else {
                format!("  {} :: meta -> {} -> m {}\n", func, head.name, out)
            })
        })
        .collect();

    if methods.is_empty() {
        output.push('\n');
        return output;
    }

    output.push_str(" where\n");
    for method in methods {
        output.push_str(&method);
    }
    output
}

fn http_client_post(view: &SpecView) -> String {
    let lc = &view.lowercase_name;

    let mut output = String::from("\n");
    output.push_str(&format!("{}'HttpClient'Post\n", lc));
    output.push_str("  :: (C.HasType a, Ast.ToAst a, C.FromVal a)\n");
    output.push_str("  => HttpClient.Manager\n");
    output.push_str("  -> C.Pull\n");
    output.push_str("  -> HttpClient.RequestHeaders\n");
    output.push_str(&format!("  -> C.Request {} a\n", view.meta));
    output.push_str(&format!(
        "  -> P.IO (HttpClient.HttpClientResponse R.ByteString, P.Maybe (C.Response {} a))\n",
        view.error
    ));
    output.push_str(&format!("{}'HttpClient'Post = HttpClient.sendRequest\n", lc));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::resolve_history;
    use serde_json::json;

    fn views() -> Vec<SpecView> {
        views_from(0)
    }

    fn views_from(floor: u32) -> Vec<SpecView> {
        let docs = vec![
            json!({
                "pull": { "name": "Shop" },
                "schema": {
                    "Token": "String",
                    "User": { "m": [{ "id": "String" }] },
                    "Color": ["Red", { "tag": "Custom", "m": [{ "hex": "String" }] }],
                    "GetUser": { "m": [{ "id": "String" }], "o": "User" }
                }
            }),
            json!({
                "pull": { "name": "Shop" },
                "schema": {
                    "Token": "String",
                    "User": { "m": [{ "id": "Int" }, { "name": "String" }] },
                    "Color": ["Red", { "tag": "Custom", "m": [{ "hex": "String" }] }],
                    "GetUser": { "m": [{ "id": "String" }], "o": "User" }
                }
            }),
        ];
        resolve_history(&docs, floor)
            .unwrap()
            .specs
            .iter()
            .map(|spec| SpecView::build(spec, "Shop.Api", &HaskellSyntax))
            .collect()
    }

    fn options(side: Side, addons: &[&str]) -> EmitOptions {
        EmitOptions {
            side,
            prefix: "Shop.Api".to_string(),
            name: "Shop".to_string(),
            addons: addons.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn test_client_module() {
        let code = HaskellEmitter.generate(&views(), &options(Side::Client, &[])).unwrap();
        assert_eq!(code.files.len(), 1);

        let (path, content) = &code.files[0];
        assert_eq!(path, "Shop.hs");
        assert!(content.contains("module Shop.Api\n"));
        assert!(content.contains("shop'Version = C.Version 1 0\n"));
        assert!(content.contains("  { id :: P.Int\n  , name :: T.Text\n"));
        assert!(content.contains("  = Color'Red\n"));
        assert!(content.contains("  | Color'Custom\n    { hex :: T.Text\n    }\n"));
        assert!(content.contains("getUser :: C.Expr GetUser -> C.Expr User\n"));
        assert!(!content.contains("HttpClient"));
    }

    #[test]
    fn test_http_client_addon() {
        let code = HaskellEmitter
            .generate(&views(), &options(Side::Client, &["http-client"]))
            .unwrap();
        let content = &code.files[0].1;

        assert!(content.contains("import qualified Fluid.Client.HttpClient as HttpClient\n"));
        assert!(content.contains("  , shop'HttpClient'Post\n"));
        assert!(content.contains("shop'HttpClient'Post = HttpClient.sendRequest\n"));
    }

    #[test]
    fn test_unknown_addon_is_ignored() {
        let plain = HaskellEmitter.generate(&views(), &options(Side::Client, &[])).unwrap();
        let extra = HaskellEmitter
            .generate(&views(), &options(Side::Client, &["telepathy"]))
            .unwrap();
        assert_eq!(plain.files, extra.files);
    }

    #[test]
    fn test_server_layout_and_inherited_types() {
        let code = HaskellEmitter.generate(&views(), &options(Side::Server, &[])).unwrap();
        let paths: Vec<&str> = code.files.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["Shop.hs", "Shop/V0.hs", "Shop/V1.hs"]);

        let root = &code.files[0].1;
        assert!(root.contains("  ( module Shop.Api.V1\n"));
        assert!(root.contains("shop'Majors = [0, 1]\n"));

        let v0 = &code.files[1].1;
        assert!(v0.contains("module Shop.Api.V0\n"));
        assert!(v0.contains("data Color\n"));

        let v1 = &code.files[2].1;
        assert!(v1.contains("import Shop.Api.V0 (Color(..))\n"));
        assert!(!v1.contains("data Color\n"));
        assert!(v1.contains("data User = User\n"));
        assert!(v1.contains("class P.Monad m => Shop'Service meta m where\n"));
        assert!(v1.contains("  getUser :: meta -> GetUser -> m User\n"));
    }

    #[test]
    fn test_client_expressions() {
        let code = HaskellEmitter.generate(&views(), &options(Side::Client, &[])).unwrap();
        let content = &code.files[0].1;

        assert!(content.contains("import qualified Data.Map as Map\n"));
        assert!(content.contains("instance Ast.ToAst Token where\n  toAst (Token w) = Ast.toAst w\n"));
        assert!(content.contains("token'Mk :: C.Expr (T.Text -> Token)\ntoken'Mk = C.unsafeWrapExpr\n"));

        assert!(content.contains("user'name :: C.Path (User -> T.Text)\nuser'name = C.unsafePath [\"name\"]\n"));
        assert!(content.contains(
            "  toAst User\n    { id\n    , name\n    } = Ast.Ast'Struct P.. Ast.Struct P.$ Map.fromList\n"
        ));
        assert!(content.contains("    [ (\"id\", Ast.toAst id)\n    , (\"name\", Ast.toAst name)\n    ]\n"));
        assert!(content.contains("user'Mk :: C.Expr (P.Int -> T.Text -> User)\n"));
        assert!(content.contains("user'Mk = C.unsafeStructExpr [\"id\", \"name\"]\n"));
        assert!(content.contains("user' :: User -> C.Expr User\nuser' = C.unsafeExpr P.. Ast.toAst\n"));

        assert!(content.contains("  toAst = \\case\n"));
        assert!(content.contains("    Color'Red -> Ast.Ast'Enumeral P.$ Ast.Enumeral \"Red\" P.Nothing\n"));
        assert!(content.contains("    Color'Custom\n      { hex\n      } -> Ast.Ast'Enumeral"));
        assert!(content.contains("color'Red'Mk = C.unsafeExpr P.. Ast.toAst P.$ Color'Red\n"));
        assert!(content.contains("color'Custom'Mk :: C.Expr (T.Text -> Color)\n"));
        assert!(content.contains("color'Custom'Mk = C.unsafeEnumeralExpr \"Custom\" [\"hex\"]\n"));

        for export in ["user'Mk", "token'Mk", "color'Custom'Mk", "color'", "user'id"] {
            assert!(content.contains(&format!("  , {}\n", export)), "missing export {}", export);
        }
    }

    #[test]
    fn test_server_declares_types_from_dropped_majors() {
        let code = HaskellEmitter
            .generate(&views_from(1), &options(Side::Server, &[]))
            .unwrap();
        let paths: Vec<&str> = code.files.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["Shop.hs", "Shop/V1.hs"]);

        let v1 = &code.files[1].1;
        assert!(!v1.contains("import Shop.Api.V0"));
        assert!(v1.contains("data Color\n"));
        assert!(v1.contains("newtype Token = Token T.Text\n"));
        assert!(code.files[0].1.contains("shop'Majors = [1]\n"));
    }
}
