//! Per-file fact extraction.
//!
//! Each source file is read and parsed once. Everything later stages need
//! from it (resolved imports, line counts and function spans, struct and
//! impl inventory) is pulled out in that single pass, so the parsed AST
//! never leaves the worker that produced it.

pub mod imports;

pub use imports::{node_id_for, ModuleIndex, ModuleLocation};

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::ModuleImports;
use crate::errors::{Error, Result};
use crate::metrics::size::{measure_file, FileSize};
use crate::organization::god_object::{collect_type_inventory, TypeInventory};

/// Everything extracted from one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFacts {
    pub imports: ModuleImports,
    pub size: FileSize,
    pub types: TypeInventory,
}

/// Extract facts from already-loaded source text
pub fn analyze_source(node_id: &str, source: &str, index: &ModuleIndex) -> Result<SourceFacts> {
    let file = syn::parse_file(source).map_err(|e| Error::parse(node_id, e.to_string()))?;

    Ok(SourceFacts {
        imports: imports::resolve_imports(node_id, &file, index),
        size: measure_file(node_id, source, &file),
        types: collect_type_inventory(node_id, &file),
    })
}

fn analyze_path(root: &Path, path: &Path, index: &ModuleIndex) -> Result<SourceFacts> {
    let node_id = node_id_for(root, path);
    let source = fs::read_to_string(path)
        .map_err(|e| Error::file_system("Failed to read source file", path, e))?;
    analyze_source(&node_id, &source, index)
}

/// Extract facts from every file in parallel.
///
/// Unreadable or unparsable files are logged and left out. The result keeps
/// the order of `files`.
pub fn extract_sources(root: &Path, files: &[PathBuf]) -> Vec<SourceFacts> {
    let node_ids: Vec<String> = files.iter().map(|path| node_id_for(root, path)).collect();
    let index = ModuleIndex::build(node_ids.as_slice());

    files
        .par_iter()
        .filter_map(|path| match analyze_path(root, path, &index) {
            Ok(facts) => Some(facts),
            Err(e) => {
                log::warn!("Skipping {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}
