//! Integration test suite for graft.
//!
//! End-to-end tests that drive the compiled binary against fixture
//! documents under `tests/fixtures/`, verifying merged output, operator
//! resolution, pruning, and error reporting as a user would see them.
//!
//! # Running
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! Tests are organized by functionality area:
//! - **merge_command**: successful merge/resolve/prune runs
//! - **error_scenarios**: failure modes, exit codes, and stderr messages

mod error_scenarios;
mod merge_command;

use std::path::PathBuf;

use assert_cmd::Command;

/// The graft binary, ready to run.
pub fn graft() -> Command {
    Command::cargo_bin("graft").expect("graft binary builds")
}

/// Absolute path to a fixture document.
pub fn fixture(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(relative)
}
