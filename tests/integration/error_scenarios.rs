//! Failure modes: exit codes, stderr messages, and the no-partial-output
//! guarantee.

use predicates::prelude::*;

use crate::{fixture, graft};

#[test]
fn missing_file_is_reported_with_its_path() {
    graft()
        .args(["merge", "no/such/file.yml"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error reading file no/such/file.yml"));
}

#[test]
fn missing_file_in_later_position_still_fails() {
    graft()
        .args([
            "merge",
            fixture("merge/first.yml").to_str().unwrap(),
            "nonexistent.yml",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Error reading file nonexistent.yml"));
}

#[test]
fn invalid_yaml_is_reported_with_its_file() {
    graft()
        .args(["merge", fixture("merge/invalid.yml").to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid.yml"));
}

#[test]
fn sequence_root_is_rejected() {
    graft()
        .args([
            "merge",
            fixture("merge/first.yml").to_str().unwrap(),
            fixture("merge/sequence_root.yml").to_str().unwrap(),
        ])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Root of YAML document is not a hash/map"));
}

#[test]
fn reference_cycle_names_the_participants() {
    graft()
        .args(["merge", fixture("resolve/cycle.yml").to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("cycle detected")
                .and(predicate::str::contains("a"))
                .and(predicate::str::contains("b")),
        );
}

#[test]
fn unknown_operator_names_operator_and_path() {
    graft()
        .args(["merge", fixture("resolve/unknown_op.yml").to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("unknown operator")
                .and(predicate::str::contains("vault"))
                .and(predicate::str::contains("secret")),
        );
}

#[test]
fn dangling_reference_names_site_and_target() {
    graft()
        .args(["merge", fixture("resolve/dangling.yml").to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("meta.missing").and(predicate::str::contains("msg")),
        );
}

#[test]
fn surviving_param_fails_the_merge() {
    // Without the prod overlay, meta.env is still a (( param )) call.
    graft()
        .args(["merge", fixture("resolve/base.yml").to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("please provide an environment name"));
}

#[test]
fn usage_error_when_no_files_are_given() {
    graft().arg("merge").assert().failure();
}
