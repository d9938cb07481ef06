//! Command-line interface for graft.
//!
//! The CLI is a thin shell over the merge and resolve stages: it parses
//! arguments, configures logging, and hands file lists to the `merge`
//! subcommand. All global flags apply to every subcommand.
//!
//! # Usage
//!
//! ```bash
//! # Merge overlays onto a base document and resolve references
//! graft merge base.yml overrides.yml
//!
//! # Drop scaffolding keys from the final output
//! graft merge --prune meta base.yml overrides.yml
//!
//! # Protect {{parameter}} tokens in Concourse pipeline files
//! graft --concourse merge pipeline.yml secrets.yml
//! ```

mod merge;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::document::LoadOptions;

/// Runtime configuration derived from the global CLI flags.
///
/// Kept as an explicit struct (rather than reading flags ad hoc) so tests
/// and programmatic callers can drive execution without a parsed
/// command line.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` disables logging entirely.
    pub log_level: Option<String>,
}

/// Main CLI structure for graft.
#[derive(Parser)]
#[command(
    name = "graft",
    about = "Merge YAML overlay documents and resolve (( operator )) cross-references",
    version,
    long_about = "graft folds an ordered list of YAML documents into one composite \
                  document, resolves embedded (( operator )) expressions in dependency \
                  order, and writes the result to standard output."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output on stderr.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Quote {{parameter}} tokens for Concourse-style templating.
    ///
    /// Wraps each token in quotes before parsing so it survives the YAML
    /// round-trip, and strips the quotes from the final output.
    #[arg(long, global = true)]
    concourse: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Merge file2.yml through fileN.yml on top of file1.yml and resolve
    /// the result.
    Merge(merge::MergeCommand),
}

impl Cli {
    /// Execute the parsed command line.
    pub fn execute(self) -> Result<()> {
        init_logging(&self.build_config());

        let options = LoadOptions { quote_templating: self.concourse };
        match self.command {
            Commands::Merge(cmd) => cmd.execute(&options),
        }
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig { log_level }
    }
}

/// Initialize the tracing subscriber once, honoring `RUST_LOG` when the
/// flags did not ask for something more specific.
fn init_logging(config: &CliConfig) {
    let level = match &config.log_level {
        Some(level) => level.clone(),
        None => return,
    };

    let filter = if level == "info" && std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
