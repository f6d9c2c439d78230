//! JSON emitter: writes the spec views themselves.

use crate::config::Side;
use crate::diagnostic::FluidError;

use super::syntax::{CanonicalSyntax, TypeSyntax};
use super::view::SpecView;
use super::{by_major, latest, EmitOptions, Emitter, GeneratedCode};

pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn target(&self) -> &'static str {
        "json"
    }

    fn syntax(&self) -> &dyn TypeSyntax {
        &CanonicalSyntax
    }

    fn generate(&self, views: &[SpecView], options: &EmitOptions) -> Result<GeneratedCode, FluidError> {
        let mut files = vec![(format!("{}.json", options.name), render(latest(views)?)?)];

        if options.side == Side::Server {
            for view in by_major(views) {
                files.push((
                    format!("{}/v{}.json", options.name, view.version.major),
                    render(view)?,
                ));
            }
        }

        Ok(GeneratedCode { files })
    }
}

fn render(view: &SpecView) -> Result<String, FluidError> {
    let mut out = serde_json::to_string_pretty(view).map_err(|e| FluidError::CodegenFailed {
        message: format!("could not serialize spec {}: {}", view.version, e),
    })?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::SpecView;
    use crate::schema::resolve_history;
    use serde_json::json;

    fn views() -> Vec<SpecView> {
        let docs = vec![
            json!({ "pull": { "name": "Api" }, "schema": { "A": { "m": [{ "x": "Int" }] } } }),
            json!({ "pull": { "name": "Api" }, "schema": { "A": { "m": [{ "x": "String" }] } } }),
        ];
        let resolution = resolve_history(&docs, 0).unwrap();
        resolution
            .specs
            .iter()
            .map(|spec| SpecView::build(spec, "Api", &CanonicalSyntax))
            .collect()
    }

    fn options(side: Side) -> EmitOptions {
        EmitOptions {
            side,
            prefix: "Api".to_string(),
            name: "api".to_string(),
            addons: Vec::new(),
        }
    }

    #[test]
    fn test_client_writes_latest_only() {
        let code = JsonEmitter.generate(&views(), &options(Side::Client)).unwrap();
        assert_eq!(code.files.len(), 1);
        assert_eq!(code.files[0].0, "api.json");

        let latest: serde_json::Value = serde_json::from_str(&code.files[0].1).unwrap();
        assert_eq!(latest["version"], json!({ "major": 1, "minor": 0 }));
        assert_eq!(latest["struct"][0]["members"][0]["type"], "String");
    }

    #[test]
    fn test_server_writes_one_file_per_major() {
        let code = JsonEmitter.generate(&views(), &options(Side::Server)).unwrap();
        let paths: Vec<&str> = code.files.iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(paths, vec!["api.json", "api/v0.json", "api/v1.json"]);
    }

    #[test]
    fn test_no_views() {
        assert!(matches!(
            JsonEmitter.generate(&[], &options(Side::Client)),
            Err(FluidError::NoSpecs)
        ));
    }
}
