//! Reflection descriptor generation from Clang AST JSON dumps.
//!
//! This crate is the generator half of the Specular toolkit:
//!
//! ```text
//! AST dump (JSON) → classifier → element arena → generated descriptors
//! ```
//!
//! Ingestion recursively consumes the dump into an append-only [`Arena`]
//! of [`Element`]s, threading a per-sibling-list [`AccessContext`] so
//! visibility tracking never leaks across subtrees. Emission walks the
//! arena and renders `specular` descriptor registrations as Rust source
//! text, committed to each destination only when fully written.
//!
//! One invocation is one pure transformation over one input; nothing is
//! shared across invocations.

mod classify;
mod element;
mod emit;
mod error;
mod output;
mod schema;
mod tree;

pub use classify::{classify, Classification};
pub use element::{Arena, Element, ElementId, ElementKind};
pub use emit::{generate, GeneratedCode};
pub use error::{GenError, Result};
pub use output::write_staged;
pub use schema::DumpNode;
pub use tree::{AccessContext, TreeBuilder};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

/// Requested output destinations. Both are optional, but a generation run
/// needs at least one consumer for its text.
#[derive(Debug, Clone, Default)]
pub struct Outputs {
    /// Descriptor registrations (classes, class templates, enums).
    pub meta: Option<PathBuf>,
    /// Enum display conversions.
    pub enum_display: Option<PathBuf>,
}

/// Outcome of one generator invocation.
#[derive(Debug)]
pub struct Report {
    pub code: GeneratedCode,
    pub element_count: usize,
    pub written: Vec<PathBuf>,
    /// Destinations that could not be finalized. A failure here never
    /// affects other destinations or the generated text itself.
    pub failed: Vec<(PathBuf, GenError)>,
}

/// Ingests a dump document into an element arena.
pub fn ingest_str(json: &str) -> Result<Arena> {
    let root: DumpNode = serde_json::from_str(json)?;
    let arena = TreeBuilder::build(&root);
    if arena.is_empty() {
        return Err(GenError::MalformedInput {
            reason: format!("root node kind \"{}\" is not part of the input vocabulary", root.kind),
        });
    }
    Ok(arena)
}

/// Reads and ingests a dump file.
pub fn ingest_file(path: &Path) -> Result<Arena> {
    let text = fs::read_to_string(path).map_err(|source| GenError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    ingest_str(&text)
}

/// Ingests a dump document and renders generated code.
pub fn generate_str(json: &str) -> Result<GeneratedCode> {
    let arena = ingest_str(json)?;
    Ok(emit::generate(&arena))
}

/// Full generator pipeline for one input file.
///
/// Every requested destination is attempted; a destination that fails is
/// recorded in the report without aborting the others.
pub fn generate_file(input: &Path, outputs: &Outputs) -> Result<Report> {
    let arena = ingest_file(input)?;
    let code = emit::generate(&arena);
    info!(
        input = %input.display(),
        types = code.type_count,
        enums = code.enum_count,
        "generated descriptors"
    );

    let mut report = Report {
        element_count: arena.len(),
        code,
        written: Vec::new(),
        failed: Vec::new(),
    };

    let requested = [
        (outputs.meta.as_ref(), &report.code.meta),
        (outputs.enum_display.as_ref(), &report.code.enum_display),
    ];
    let mut written = Vec::new();
    let mut failed = Vec::new();
    for (path, contents) in requested {
        let Some(path) = path else { continue };
        match output::write_staged(path, contents) {
            Ok(()) => {
                info!(path = %path.display(), "wrote generated output");
                written.push(path.clone());
            }
            Err(source) => {
                failed.push((
                    path.clone(),
                    GenError::OutputWrite { path: path.clone(), source },
                ));
            }
        }
    }
    report.written = written;
    report.failed = failed;
    Ok(report)
}
