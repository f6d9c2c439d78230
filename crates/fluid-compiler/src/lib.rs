//! # Fluid Compiler
//!
//! This crate turns the chronological history of an API's schema into
//! versioned code. Every revision of the spec is kept; the compiler works
//! out what changed between revisions, assigns semantic versions, and
//! records for every type which major version its current shape belongs to,
//! so generated code can serve several majors at once.
//!
//! ## Architecture
//!
//! ```text
//! Spec history (JSON)
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  Load raw documents, oldest first
//! │ (JSON → IR)  │  and normalize the compact type syntax
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Structure checks, collected as diagnostics
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │    Schema    │  Diff, version, track provenance,
//! │  (history)   │  collapse per major, resolve
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Build spec views, emit Haskell / JSON
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fluid_compiler::{Generator, GeneratorConfig};
//!
//! let config = GeneratorConfig {
//!     src: "specs".into(),
//!     dest: "src/generated".into(),
//!     prefix: "Shop.Api".to_string(),
//!     ..GeneratorConfig::default()
//! };
//!
//! let result = Generator::new(config).generate()?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod schema;
pub mod validate;

use std::path::PathBuf;

pub use config::{parse_addons, GeneratorConfig, Side};
pub use diagnostic::{Diagnostics, FluidError, SchemaIssue};
pub use schema::{resolve_history, Resolution};

use codegen::{EmitOptions, SpecView};

/// Runs the pipeline for one configuration.
pub struct Generator {
    config: GeneratorConfig,
}

impl Generator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates code for the configured target.
    ///
    /// This runs the full pipeline:
    /// 1. Create frontend and emitter (fails fast on unknown names)
    /// 2. Load the spec history
    /// 3. Resolve it through the schema engine
    /// 4. Build a view of each resolved spec in the emitter's syntax
    /// 5. Emit and write output files
    pub fn generate(&self) -> Result<GenerateResult, FluidError> {
        let emitter = codegen::create_emitter(&self.config.target)?;
        let resolution = self.inspect()?;

        let views: Vec<SpecView> = resolution
            .specs
            .iter()
            .map(|spec| SpecView::build(spec, &self.config.prefix, emitter.syntax()))
            .collect();

        let options = EmitOptions {
            side: self.config.side,
            prefix: self.config.prefix.clone(),
            name: self.config.name.clone(),
            addons: self.config.addons.clone(),
        };
        let generated = emitter.generate(&views, &options)?;
        let files = self.write_output(&generated)?;

        tracing::info!(
            target_lang = emitter.target(),
            side = %self.config.side,
            files = files.len(),
            "generated code"
        );

        Ok(GenerateResult {
            specs: resolution.versions.len(),
            majors: resolution.collapsed.len(),
            resolution,
            files,
        })
    }

    /// Loads the history and runs the schema engine without generating code.
    pub fn inspect(&self) -> Result<Resolution, FluidError> {
        let frontend = frontend::create_frontend(&self.config.format)?;
        let docs = frontend.load(&self.config.src)?;
        tracing::debug!(
            src = %self.config.src.display(),
            format = frontend.format(),
            documents = docs.len(),
            "loaded spec history"
        );
        resolve_history(&docs, self.config.major_floor)
    }

    /// Writes generated code to the output directory.
    fn write_output(&self, generated: &codegen::GeneratedCode) -> Result<Vec<PathBuf>, FluidError> {
        std::fs::create_dir_all(&self.config.dest)
            .map_err(|e| FluidError::io(&self.config.dest, e.to_string()))?;

        let mut written = Vec::with_capacity(generated.files.len());
        for (filename, content) in &generated.files {
            let path = self.config.dest.join(filename);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| FluidError::io(parent, e.to_string()))?;
            }
            std::fs::write(&path, content).map_err(|e| FluidError::io(&path, e.to_string()))?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Result of a successful generation.
#[derive(Debug)]
pub struct GenerateResult {
    /// Number of specs in the input history.
    pub specs: usize,
    /// Number of major versions in the history.
    pub majors: usize,
    /// Every file written, in emission order.
    pub files: Vec<PathBuf>,
    pub resolution: Resolution,
}
