//! Error types for specular-gen.
//!
//! Only three conditions are errors. Unsupported or explicitly ignored
//! node kinds are not: those are classifier drop signals, local to the
//! offending node and logged at debug level.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that can occur during descriptor generation.
#[derive(Error, Debug)]
pub enum GenError {
    /// The input file could not be read. Fatal for the run.
    #[error("failed to read input {path}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not a structurally valid AST dump. Fatal for the run.
    #[error("malformed AST dump: {reason}")]
    MalformedInput { reason: String },

    /// A destination could not be finalized. Fatal for that destination
    /// only; other destinations are unaffected.
    #[error("failed to write output {path}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for GenError {
    fn from(error: serde_json::Error) -> Self {
        GenError::MalformedInput { reason: error.to_string() }
    }
}
