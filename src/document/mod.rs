//! Loading, decoding, folding, and re-encoding of input documents.
//!
//! This is the boundary between the filesystem/codec world and the merge
//! and resolve stages: files come in as bytes, leave this module as a
//! single merged root mapping, and return through [`encode`] as YAML text.
//! Every error out of this module names the offending file.

pub mod quoting;

use std::fs;
use std::path::{Path as FsPath, PathBuf};

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::core::{GraftError, Result};
use crate::merge::Merger;

/// Options governing how input documents are loaded and output is
/// rendered. Passed explicitly to keep the core free of process-global
/// state.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Quote `{{token}}` templating markers around the codec boundary.
    pub quote_templating: bool,
}

/// Read one input file, wrapping any I/O failure with its path.
pub fn read_file(path: &FsPath) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| GraftError::FileRead {
        path: path.display().to_string(),
        source,
    })
}

/// Decode one document and require a mapping at its root.
pub fn parse_document(path: &FsPath, bytes: &[u8]) -> Result<Mapping> {
    let value: Value = serde_yaml::from_slice(bytes).map_err(|source| GraftError::YamlParse {
        path: path.display().to_string(),
        source,
    })?;

    match value {
        Value::Mapping(map) => Ok(map),
        _ => Err(GraftError::NonMapRoot { path: path.display().to_string() }),
    }
}

/// Fold every input document, in order, into one root mapping.
///
/// The first document initializes the root; each later one overlays it.
/// Read and decode failures abort immediately; merge-internal problems
/// are deferred and surfaced once all documents are folded.
pub fn merge_all(paths: &[PathBuf], options: &LoadOptions) -> Result<Mapping> {
    let mut root = Mapping::new();
    let mut merger = Merger::new();

    for path in paths {
        debug!(file = %path.display(), "processing file");
        let mut bytes = read_file(path)?;
        if options.quote_templating {
            bytes = quoting::quote_templating(&bytes);
        }
        let doc = parse_document(path, &bytes)?;
        merger.merge(&mut root, doc);
    }

    merger.finish()?;
    Ok(root)
}

/// Serialize the resolved tree back to YAML text.
pub fn encode(tree: &Value) -> Result<String> {
    serde_yaml::to_string(tree).map_err(|source| GraftError::YamlEncode { source })
}
