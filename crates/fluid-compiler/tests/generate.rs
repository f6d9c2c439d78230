//! Generator runs against spec histories on disk.

use std::fs;
use std::path::Path;

use fluid_compiler::{FluidError, Generator, GeneratorConfig, Side};
use serde_json::json;
use tempfile::TempDir;

fn write_history(dir: &Path) {
    let specs = dir.join("specs");
    fs::create_dir_all(&specs).unwrap();

    let v0 = json!({
        "pull": { "name": "Todo", "host": "api.example.com", "port": 443, "protocol": "https" },
        "schema": {
            "TodoId": "String",
            "Todo": { "m": [{ "id": "TodoId" }, { "title": "String" }] },
            "GetTodo": { "m": [{ "id": "TodoId" }], "o": { "n": "Option", "p": "Todo" } }
        }
    });
    let v1 = json!({
        "pull": { "name": "Todo", "host": "api.example.com", "port": 443, "protocol": "https" },
        "schema": {
            "TodoId": "String",
            "Todo": { "m": [{ "id": "TodoId" }, { "title": "String" }, { "done": "Bool" }] },
            "GetTodo": { "m": [{ "id": "TodoId" }], "o": { "n": "Option", "p": "Todo" } }
        }
    });

    // One document per file; file names give the chronological order.
    fs::write(specs.join("001.json"), serde_json::to_string(&v0).unwrap()).unwrap();
    fs::write(specs.join("002.json"), serde_json::to_string(&v1).unwrap()).unwrap();
    fs::write(specs.join("notes.txt"), "ignored").unwrap();
}

fn config(dir: &Path, target: &str, side: Side) -> GeneratorConfig {
    GeneratorConfig {
        src: dir.join("specs"),
        dest: dir.join("out"),
        name: "Todo".to_string(),
        target: target.to_string(),
        side,
        prefix: "Todo.Api".to_string(),
        ..GeneratorConfig::default()
    }
}

#[test]
fn haskell_server_writes_root_and_versioned_modules() {
    let dir = TempDir::new().unwrap();
    write_history(dir.path());

    let result = Generator::new(config(dir.path(), "haskell", Side::Server))
        .generate()
        .unwrap();

    assert_eq!(result.specs, 2);
    assert_eq!(result.majors, 2);

    let out = dir.path().join("out");
    assert!(out.join("Todo.hs").is_file());
    assert!(out.join("Todo/V0.hs").is_file());
    assert!(out.join("Todo/V1.hs").is_file());

    let v1 = fs::read_to_string(out.join("Todo/V1.hs")).unwrap();
    assert!(v1.contains("import Todo.Api.V0 (TodoId(..))\n"));
    assert!(v1.contains("  , done :: P.Bool\n"));
    assert!(v1.contains("todo'Pull = C.Pull \"https\" \"api.example.com\" \"/\" 443\n"));
}

#[test]
fn haskell_server_above_floor_declares_types_it_cannot_import() {
    let dir = TempDir::new().unwrap();
    write_history(dir.path());

    let mut config = config(dir.path(), "haskell", Side::Server);
    config.major_floor = 1;
    let result = Generator::new(config).generate().unwrap();

    let out = dir.path().join("out");
    assert_eq!(result.files, vec![out.join("Todo.hs"), out.join("Todo/V1.hs")]);
    assert!(!out.join("Todo/V0.hs").exists());

    let v1 = fs::read_to_string(out.join("Todo/V1.hs")).unwrap();
    assert!(!v1.contains("import Todo.Api.V0"));
    assert!(v1.contains("newtype TodoId = TodoId T.Text\n"));
}

#[test]
fn haskell_client_writes_single_module() {
    let dir = TempDir::new().unwrap();
    write_history(dir.path());

    let mut config = config(dir.path(), "haskell", Side::Client);
    config.addons = vec!["http-client".to_string()];
    let result = Generator::new(config).generate().unwrap();

    assert_eq!(result.files, vec![dir.path().join("out").join("Todo.hs")]);
    let module = fs::read_to_string(&result.files[0]).unwrap();
    assert!(module.contains("getTodo :: C.Expr GetTodo -> C.Expr (P.Maybe Todo)\n"));
    assert!(module.contains("todo'HttpClient'Post = HttpClient.sendRequest\n"));
    assert!(module.contains("instance Ast.ToAst GetTodo where\n"));
    assert!(module.contains("todo'done :: C.Path (Todo -> P.Bool)\n"));
}

#[test]
fn json_target_writes_views() {
    let dir = TempDir::new().unwrap();
    write_history(dir.path());

    let result = Generator::new(config(dir.path(), "json", Side::Server))
        .generate()
        .unwrap();
    assert_eq!(result.files.len(), 3);

    let latest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("out/Todo.json")).unwrap()).unwrap();
    assert_eq!(latest["module"], "Todo.Api");
    assert_eq!(latest["version"], json!({ "major": 1, "minor": 0 }));
    assert_eq!(latest["typeSource"]["TodoId"], 0);
    assert_eq!(latest["hollow"], json!([]));
    assert_eq!(latest["original"]["pull"]["name"], "Todo");
    assert!(latest["original"].get("schema").is_none());
}

#[test]
fn unknown_target_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    write_history(dir.path());

    let err = Generator::new(config(dir.path(), "cobol", Side::Client))
        .generate()
        .unwrap_err();
    assert!(matches!(err, FluidError::UnsupportedTarget { .. }));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn empty_source_directory_has_no_specs() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("specs")).unwrap();

    let err = Generator::new(config(dir.path(), "json", Side::Client))
        .inspect()
        .unwrap_err();
    assert!(matches!(err, FluidError::NoSpecs));
}

#[test]
fn floor_above_history_is_reported() {
    let dir = TempDir::new().unwrap();
    write_history(dir.path());

    let mut config = config(dir.path(), "json", Side::Client);
    config.major_floor = 5;
    let err = Generator::new(config).generate().unwrap_err();
    assert!(matches!(err, FluidError::NoSupportedVersion { floor: 5, latest_major: 1 }));
}
