//! graft: YAML overlay merging and cross-reference resolution.
//!
//! graft composes deployment and pipeline manifests from layered YAML
//! documents: a base document plus any number of environment overlays,
//! folded in order, with embedded `(( operator ))` expressions resolved
//! against the composite tree afterwards. No more copy-pasting a value
//! into five places; define it once and `grab` it everywhere else.
//!
//! # Pipeline
//!
//! 1. **Merge** ([`merge`]): documents fold into one root mapping.
//!    Mappings union recursively, scalars are last-document-wins, and
//!    sequences honor per-site directives (`(( append ))`,
//!    `(( prepend ))`, `(( replace ))`, or the default inline merge).
//! 2. **Resolve** ([`resolver`]): every `(( operator arg… ))` scalar
//!    becomes a node in a dependency graph over tree paths; the graph is
//!    checked for cycles, ordered topologically, and evaluated in one
//!    deterministic pass that writes each result back into the tree.
//! 3. **Prune** and **emit** ([`document`]): requested paths are deleted
//!    and the tree is re-encoded as YAML on stdout.
//!
//! # Example
//!
//! ```yaml
//! # base.yml                      # prod.yml
//! meta:                           meta:
//!   env: (( param "set an env" ))   env: prod
//! name: (( concat meta.env "-api" ))
//! ```
//!
//! ```bash
//! graft merge base.yml prod.yml
//! # name: prod-api
//! ```
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface
//! - [`core`] - Error types and user-friendly reporting
//! - [`document`] - File loading, YAML codec boundary, templating quoting
//! - [`merge`] - The recursive document merger
//! - [`operators`] - Operator parsing, registry, and built-ins
//! - [`resolver`] - Dependency graph construction and ordered evaluation
//! - [`tree`] - Path addressing over the document tree

pub mod cli;
pub mod core;
pub mod document;
pub mod merge;
pub mod operators;
pub mod resolver;
pub mod tree;
