//! JSON spec loader.
//!
//! A source is either a single `.json` file holding an array of specs, or a
//! directory whose `*.json` files are read in file-name order. Either way the
//! resulting order is the chronological order of the history.

use std::path::Path;

use serde_json::Value;
use walkdir::WalkDir;

use super::Frontend;
use crate::diagnostic::FluidError;

/// Loads raw spec documents from JSON.
#[derive(Debug, Default)]
pub struct JsonFrontend;

impl JsonFrontend {
    pub fn new() -> Self {
        Self
    }

    fn load_array(&self, path: &Path) -> Result<Vec<Value>, FluidError> {
        match read_json(path)? {
            Value::Array(docs) => Ok(docs),
            _ => Err(FluidError::NotAnArray {
                path: path.to_path_buf(),
            }),
        }
    }

    fn load_directory(&self, dir: &Path) -> Result<Vec<Value>, FluidError> {
        let mut docs = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| FluidError::io(dir, e.to_string()))?;
            if entry.file_type().is_file() && self.handles(entry.path()) {
                tracing::debug!(file = %entry.path().display(), "loading spec");
                docs.push(read_json(entry.path())?);
            }
        }

        Ok(docs)
    }
}

impl Frontend for JsonFrontend {
    fn format(&self) -> &str {
        "json"
    }

    fn extensions(&self) -> &[&str] {
        &["json"]
    }

    fn load(&self, path: &Path) -> Result<Vec<Value>, FluidError> {
        if path.is_dir() {
            self.load_directory(path)
        } else if self.handles(path) {
            self.load_array(path)
        } else {
            Err(FluidError::io(path, "expected a .json file or a directory of .json files"))
        }
    }
}

fn read_json(path: &Path) -> Result<Value, FluidError> {
    let content = std::fs::read_to_string(path).map_err(|e| FluidError::io(path, e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| FluidError::InvalidJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
