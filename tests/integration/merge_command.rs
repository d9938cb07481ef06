//! Successful merge/resolve/prune runs through the binary.

use serde_yaml::Value;

use crate::{fixture, graft};

fn merged_value(args: &[&str]) -> Value {
    let output = graft().args(args).assert().success().get_output().stdout.clone();
    serde_yaml::from_slice(&output).expect("stdout is valid YAML")
}

#[test]
fn merges_overlays_with_array_directives() {
    let tree = merged_value(&[
        "merge",
        fixture("merge/first.yml").to_str().unwrap(),
        fixture("merge/second.yml").to_str().unwrap(),
    ]);

    let expected: Value = serde_yaml::from_str(
        r#"
key: overridden
array_append:
- one
- two
- three
array_prepend:
- three
- four
- five
array_inline:
- name: first_elem
  val: overwritten
- second_elem was overwritten
- third elem is appended
map:
  key: value
  key2: val2
"#,
    )
    .unwrap();
    assert_eq!(tree, expected);
}

#[test]
fn single_document_passes_through() {
    let tree = merged_value(&["merge", fixture("merge/first.yml").to_str().unwrap()]);
    let expected: Value =
        serde_yaml::from_str(&std::fs::read_to_string(fixture("merge/first.yml")).unwrap())
            .unwrap();
    assert_eq!(tree, expected);
}

#[test]
fn operators_resolve_against_the_merged_tree() {
    let tree = merged_value(&[
        "merge",
        fixture("resolve/base.yml").to_str().unwrap(),
        fixture("resolve/prod.yml").to_str().unwrap(),
    ]);

    assert_eq!(tree["meta"]["env"], Value::from("prod"));
    assert_eq!(tree["name"], Value::from("prod-api"));
    // endpoint grabs name, which is itself an operator result.
    assert_eq!(tree["endpoint"], Value::from("prod-api"));
    // named-entry lookup into the jobs sequence.
    assert_eq!(tree["api_count"], Value::from(3));
}

#[test]
fn prune_removes_subtrees_after_resolution() {
    let tree = merged_value(&[
        "merge",
        "--prune",
        "meta",
        "--prune",
        "jobs",
        fixture("resolve/base.yml").to_str().unwrap(),
        fixture("resolve/prod.yml").to_str().unwrap(),
    ]);

    assert!(tree.get("meta").is_none());
    assert!(tree.get("jobs").is_none());
    // Values resolved from the pruned subtree survive.
    assert_eq!(tree["name"], Value::from("prod-api"));
    assert_eq!(tree["api_count"], Value::from(3));
}

#[test]
fn pruning_an_absent_key_is_not_an_error() {
    let tree = merged_value(&[
        "merge",
        "--prune",
        "no.such.key",
        fixture("merge/first.yml").to_str().unwrap(),
    ]);
    assert_eq!(tree["key"], Value::from("base"));
}

#[test]
fn output_is_deterministic_across_runs() {
    let base = fixture("resolve/base.yml");
    let prod = fixture("resolve/prod.yml");
    let args = [
        "merge",
        "--prune",
        "meta",
        base.to_str().unwrap(),
        prod.to_str().unwrap(),
    ];
    let first = graft().args(args).assert().success().get_output().stdout.clone();
    let second = graft().args(args).assert().success().get_output().stdout.clone();
    assert_eq!(first, second);
}

#[test]
fn output_ends_with_a_trailing_blank_line() {
    let stdout = graft()
        .args(["merge", fixture("merge/first.yml").to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(stdout).unwrap();
    assert!(text.ends_with("\n\n"), "expected trailing blank line, got {text:?}");
}

#[test]
fn concourse_tokens_survive_the_round_trip() {
    let stdout = graft()
        .args([
            "--concourse",
            "merge",
            fixture("resolve/concourse.yml").to_str().unwrap(),
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(stdout).unwrap();
    assert!(text.contains("{{resource-name}}"), "token mangled in output: {text}");
    assert!(!text.contains("'{{resource-name}}'"), "token left quoted: {text}");
    assert!(!text.contains("\"{{resource-name}}\""), "token left quoted: {text}");
}
