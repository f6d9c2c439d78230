//! Spec frontends.
//!
//! Each frontend is responsible for:
//! 1. Reading raw spec documents in its format, in chronological order
//! 2. Handing them to the normalizer, which builds the canonical IR
//!
//! Normalization is format-independent, so a new frontend only has to
//! produce `serde_json::Value` documents.

pub mod json;
pub mod normalize;

use std::path::Path;

use serde_json::Value;

use crate::diagnostic::{Diagnostics, FluidError};
use crate::ir::Snapshot;

pub use json::JsonFrontend;
pub use normalize::{normalize_document, normalize_type, parse_type_ref};

/// Trait for spec source formats.
pub trait Frontend {
    /// Returns the format name (e.g., "json").
    fn format(&self) -> &str;

    /// Returns file extensions this frontend handles.
    fn extensions(&self) -> &[&str];

    /// Whether `path` has one of [`Frontend::extensions`].
    fn handles(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Loads every raw document at `path`, oldest first.
    fn load(&self, path: &Path) -> Result<Vec<Value>, FluidError>;
}

/// Creates a frontend for the given format.
pub fn create_frontend(format: &str) -> Result<Box<dyn Frontend>, FluidError> {
    match format {
        "json" => Ok(Box::new(JsonFrontend::new())),
        _ => Err(FluidError::UnsupportedFormat {
            format: format.to_string(),
        }),
    }
}

/// Normalizes a chronological list of raw documents.
pub fn normalize_all(docs: &[Value], diagnostics: &mut Diagnostics) -> Vec<Snapshot> {
    docs.iter()
        .enumerate()
        .map(|(index, doc)| normalize_document(index, doc, diagnostics))
        .collect()
}
