//! Debug script to see what the schema engine resolves.

use fluid_compiler::resolve_history;
use serde_json::json;

fn main() {
    let docs = vec![
        json!({
            "pull": { "name": "Todo" },
            "schema": {
                "TodoId": "String",
                "Todo": { "m": [{ "id": "TodoId" }, { "title": "String" }] },
                "GetTodos": { "o": { "n": "List", "p": "Todo" } }
            }
        }),
        json!({
            "pull": { "name": "Todo" },
            "schema": {
                "TodoId": "String",
                "Todo": { "m": [{ "id": "TodoId" }, { "title": "String" }] },
                "GetTodos": { "o": { "n": "List", "p": "Todo" } },
                "Priority": ["Low", "High"]
            }
        }),
        json!({
            "pull": { "name": "Todo" },
            "schema": {
                "TodoId": "String",
                "Todo": { "m": [{ "id": "TodoId" }, { "title": "String" }, { "priority": "Priority" }] },
                "GetTodos": { "o": { "n": "List", "p": "Todo" } },
                "Priority": ["Low", "High"]
            }
        }),
    ];

    match resolve_history(&docs, 0) {
        Ok(resolution) => {
            println!("Versions:");
            for (i, version) in resolution.versions.iter().enumerate() {
                println!("  spec #{} -> {}", i, version);
            }
            println!("\nDiffs:");
            for (i, diff) in resolution.diffs.iter().enumerate() {
                println!("  #{} -> #{}", i, i + 1);
                println!("{}", diff.format_changes());
            }
            println!("\nResolved:");
            for spec in &resolution.specs {
                println!("  {} typeSource: {:?}", spec.version, spec.type_source);
            }
            for issue in resolution.diagnostics.iter() {
                println!("\nIssue: {}", issue);
            }
        }
        Err(e) => {
            println!("Error: {:?}", e);
        }
    }
}
