//! Error handling for graft.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`GraftError`]) so each failure mode can be
//!    matched on precisely in code and in tests.
//! 2. **User-friendly reporting** ([`ErrorContext`], [`user_friendly_error`])
//!    so the CLI can render a single actionable line (plus optional
//!    suggestion) instead of a bare Debug dump.
//!
//! Every variant carries enough context (the input file, or the [`Path`]
//! inside the document tree) for a user to locate the offending input
//! without re-running under extra diagnostics.
//!
//! All errors are fatal: merging and resolution never retry, and no output
//! is produced after a failure.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::operators::EvalError;
use crate::tree::path::Path;

/// The main error type for graft operations.
///
/// Variants are grouped by the stage that produces them:
///
/// - **Document loading**: [`FileRead`], [`YamlParse`], [`NonMapRoot`]
/// - **Merging**: [`MisplacedDirective`]
/// - **Resolution**: [`DependencyCycle`], [`UnresolvedReference`],
///   [`UnknownOperator`], [`OperatorEval`]
/// - **Output**: [`YamlEncode`]
///
/// [`FileRead`]: GraftError::FileRead
/// [`YamlParse`]: GraftError::YamlParse
/// [`NonMapRoot`]: GraftError::NonMapRoot
/// [`MisplacedDirective`]: GraftError::MisplacedDirective
/// [`DependencyCycle`]: GraftError::DependencyCycle
/// [`UnresolvedReference`]: GraftError::UnresolvedReference
/// [`UnknownOperator`]: GraftError::UnknownOperator
/// [`OperatorEval`]: GraftError::OperatorEval
/// [`YamlEncode`]: GraftError::YamlEncode
#[derive(Error, Debug)]
pub enum GraftError {
    /// An input document could not be read from disk.
    #[error("Error reading file {path}: {source}")]
    FileRead {
        /// Path of the file that failed to read.
        path: String,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An input document is not valid YAML.
    #[error("{path}: {source}")]
    YamlParse {
        /// Path of the file that failed to decode.
        path: String,
        /// The underlying decode failure.
        #[source]
        source: serde_yaml::Error,
    },

    /// An input document decoded cleanly but its root is not a mapping.
    ///
    /// Overlay merging is defined over mappings; a document whose top level
    /// is a sequence or a scalar cannot participate.
    #[error("{path}: Root of YAML document is not a hash/map")]
    NonMapRoot {
        /// Path of the offending file.
        path: String,
    },

    /// An array merge directive appeared somewhere other than the first
    /// element of an incoming sequence.
    #[error("array merge directive (( {directive} )) must be the first element of the list (found at index {index})")]
    MisplacedDirective {
        /// The directive word (`append`, `prepend`, ...).
        directive: String,
        /// Index at which the marker was found.
        index: usize,
    },

    /// Operator references form a cycle and cannot be ordered.
    #[error("cycle detected in operator references: {}", format_cycle(.cycle))]
    DependencyCycle {
        /// The paths participating in the cycle, in reference order. The
        /// first path is repeated at the end to show the cycle closing.
        cycle: Vec<Path>,
    },

    /// An operator argument names a path that exists nowhere in the tree,
    /// neither as a concrete value nor as another operator's location.
    #[error("`{site}` references `{path}`, which could not be found in the document tree")]
    UnresolvedReference {
        /// The path that could not be found.
        path: Path,
        /// The path of the operator call holding the dangling reference.
        site: Path,
    },

    /// A scalar parsed as an operator call, but no implementation is
    /// registered under that name.
    #[error("unknown operator `(( {name} ))` at `{path}`")]
    UnknownOperator {
        /// The unrecognized operator name.
        name: String,
        /// Location of the call in the document tree.
        path: Path,
    },

    /// A registered operator rejected its inputs or failed internally.
    #[error("`{path}`: {source}")]
    OperatorEval {
        /// Location of the failing call in the document tree.
        path: Path,
        /// The operator's own failure.
        #[source]
        source: EvalError,
    },

    /// The fully resolved tree could not be serialized back to YAML.
    #[error("Unable to convert merged result back to YAML: {source}")]
    YamlEncode {
        /// The underlying encode failure.
        #[source]
        source: serde_yaml::Error,
    },
}

fn format_cycle(cycle: &[Path]) -> String {
    cycle.iter().map(Path::to_string).collect::<Vec<_>>().join(" -> ")
}

/// An error wrapped with user-facing context for CLI display.
///
/// Wraps the underlying failure with an optional suggestion (an actionable
/// next step, shown in green) and optional details (background on why the
/// error occurred, shown in yellow).
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error.
    pub error: anyhow::Error,
    /// Optional suggestion for resolving the error.
    pub suggestion: Option<String>,
    /// Optional additional details about the error.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub fn new(error: anyhow::Error) -> Self {
        Self { error, suggestion: None, details: None }
    }

    /// Add an actionable suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add background details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with color highlighting.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`GraftError`] variants get a tailored suggestion; everything else
/// passes through unchanged and is displayed as-is.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let (suggestion, details) = match error.downcast_ref::<GraftError>() {
        Some(GraftError::FileRead { .. }) => (
            Some("Check that the file exists and is readable".to_string()),
            None,
        ),
        Some(GraftError::YamlParse { .. }) => (
            Some("Validate the file with a YAML linter to locate the syntax error".to_string()),
            None,
        ),
        Some(GraftError::NonMapRoot { .. }) => (
            Some("Wrap the document's contents under top-level keys".to_string()),
            Some("Only mapping-rooted documents can be merged as overlays".to_string()),
        ),
        Some(GraftError::MisplacedDirective { .. }) => (
            Some("Move the (( append )) / (( prepend )) marker to the first element of the list".to_string()),
            None,
        ),
        Some(GraftError::DependencyCycle { .. }) => (
            Some("Break the cycle by making at least one of the listed values concrete".to_string()),
            Some("Each operator must be resolvable from values that do not, directly or indirectly, depend on its own result".to_string()),
        ),
        Some(GraftError::UnresolvedReference { .. }) => (
            Some("Check the referenced path for typos, or define it in one of the merged documents".to_string()),
            None,
        ),
        Some(GraftError::UnknownOperator { .. }) => (
            Some("Check the operator name for typos; built-ins are grab, concat, and param".to_string()),
            None,
        ),
        _ => (None, None),
    };

    ErrorContext { error, suggestion, details }
}
