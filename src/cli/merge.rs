//! The `merge` subcommand: fold, resolve, prune, print.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_yaml::Value;

use crate::document::{self, LoadOptions, quoting};
use crate::resolver::Evaluator;
use crate::tree::path::Path;

/// Merge overlay documents and resolve the composite tree.
///
/// Documents are folded in argument order, so later files override
/// earlier ones. After every `(( operator ))` expression resolves, the
/// `--prune` paths are deleted and the result is written to stdout.
#[derive(Args)]
pub struct MergeCommand {
    /// Specify keys to prune from final output (may be specified more
    /// than once).
    #[arg(long = "prune", value_name = "KEY")]
    prune: Vec<String>,

    /// Documents to merge: base first, overlays after.
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl MergeCommand {
    /// Run the merge pipeline end to end.
    pub fn execute(self, options: &LoadOptions) -> Result<()> {
        let root = document::merge_all(&self.files, options)?;

        let mut evaluator = Evaluator::new(Value::Mapping(root));
        let prune: Vec<Path> = self.prune.iter().map(|s| Path::parse(s)).collect();
        evaluator.run(&prune)?;

        let mut output = document::encode(evaluator.tree())?;
        if options.quote_templating {
            output = quoting::dequote_templating(&output);
        }
        // The encoded document already ends in a newline; println adds the
        // trailing blank line.
        println!("{output}");
        Ok(())
    }
}
