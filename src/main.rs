//! graft CLI entry point.
//!
//! Handles command-line parsing, delegates to the subcommand, and renders
//! any failure as a single user-friendly error before exiting non-zero.

use clap::Parser;
use graft_cli::cli;
use graft_cli::core::user_friendly_error;

fn main() {
    let cli = cli::Cli::parse();

    if let Err(e) = cli.execute() {
        let error_ctx = user_friendly_error(e);
        error_ctx.display();
        std::process::exit(1);
    }
}
