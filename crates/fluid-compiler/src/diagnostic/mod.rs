//! Diagnostic types for error reporting.

mod error;
mod issue;
mod location;

pub use error::FluidError;
pub use issue::{Diagnostics, SchemaIssue};
pub use location::SchemaLocation;
