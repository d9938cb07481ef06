//! Path-addressed operations over a YAML document tree.
//!
//! The tree itself is [`serde_yaml::Value`], already the tagged union of
//! mapping / sequence / scalar this tool needs, with insertion-ordered
//! mappings for deterministic output. This module adds what the codec does
//! not provide: navigating, replacing, and deleting nodes by [`Path`], and
//! enumerating every string scalar with its location.
//!
//! Resolution rules, per segment:
//!
//! - key against a mapping: plain lookup;
//! - index against a sequence: positional;
//! - key against a sequence: the first element that is a mapping whose
//!   `name` entry equals the key (so `jobs.api.instances` addresses the
//!   list element named `api`);
//! - index against a mapping: lookup by the index's decimal string form.
//!
//! Mapping entries with non-string keys are never addressable by a path;
//! they merge and re-encode untouched.

pub mod path;

use serde_yaml::Value;

use path::{Path, PathSegment};

/// Resolve `path` against `tree`, returning the addressed node if present.
#[must_use]
pub fn get<'a>(tree: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = tree;
    for segment in path.segments() {
        current = step(current, segment)?;
    }
    Some(current)
}

/// Mutable variant of [`get`].
pub fn get_mut<'a>(tree: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    let mut current = tree;
    for segment in path.segments() {
        current = step_mut(current, segment)?;
    }
    Some(current)
}

/// Overwrite the node at `path` with `new`, returning whether the path
/// resolved. The tree is unchanged when it did not.
pub fn set(tree: &mut Value, path: &Path, new: Value) -> bool {
    match get_mut(tree, path) {
        Some(slot) => {
            *slot = new;
            true
        }
        None => false,
    }
}

/// Remove the node at `path` and everything beneath it.
///
/// Returns whether anything was removed; a path that does not resolve (or
/// the root path) is a no-op. Removing a sequence element shifts the
/// elements after it down by one.
pub fn delete(tree: &mut Value, path: &Path) -> bool {
    let (last, parent_segments) = match path.segments().split_last() {
        Some(split) => split,
        None => return false,
    };
    let parent_path = Path::from_segments(parent_segments.to_vec());
    let parent = match get_mut(tree, &parent_path) {
        Some(parent) => parent,
        None => return false,
    };

    match (parent, last) {
        (Value::Mapping(map), PathSegment::Key(key)) => map.remove(key.as_str()).is_some(),
        (Value::Mapping(map), PathSegment::Index(index)) => {
            map.remove(index.to_string().as_str()).is_some()
        }
        (Value::Sequence(seq), PathSegment::Index(index)) => {
            if *index < seq.len() {
                seq.remove(*index);
                true
            } else {
                false
            }
        }
        (Value::Sequence(seq), PathSegment::Key(key)) => {
            match seq.iter().position(|element| has_name(element, key)) {
                Some(position) => {
                    seq.remove(position);
                    true
                }
                None => false,
            }
        }
        _ => false,
    }
}

/// Every string scalar in the tree, paired with its path, in document
/// order: mapping entries in insertion order, sequence elements by index.
#[must_use]
pub fn scalar_locations(tree: &Value) -> Vec<(Path, String)> {
    let mut locations = Vec::new();
    collect_scalars(tree, &Path::root(), &mut locations);
    locations
}

fn collect_scalars(value: &Value, path: &Path, out: &mut Vec<(Path, String)>) {
    match value {
        Value::String(s) => out.push((path.clone(), s.clone())),
        Value::Mapping(map) => {
            for (key, child) in map {
                if let Some(key) = key.as_str() {
                    collect_scalars(child, &path.child_key(key), out);
                }
            }
        }
        Value::Sequence(seq) => {
            for (index, child) in seq.iter().enumerate() {
                collect_scalars(child, &path.child_index(index), out);
            }
        }
        _ => {}
    }
}

fn step<'a>(value: &'a Value, segment: &PathSegment) -> Option<&'a Value> {
    match (value, segment) {
        (Value::Mapping(map), PathSegment::Key(key)) => map.get(key.as_str()),
        (Value::Mapping(map), PathSegment::Index(index)) => map.get(index.to_string().as_str()),
        (Value::Sequence(seq), PathSegment::Index(index)) => seq.get(*index),
        (Value::Sequence(seq), PathSegment::Key(key)) => {
            seq.iter().find(|element| has_name(element, key))
        }
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &PathSegment) -> Option<&'a mut Value> {
    match (value, segment) {
        (Value::Mapping(map), PathSegment::Key(key)) => map.get_mut(key.as_str()),
        (Value::Mapping(map), PathSegment::Index(index)) => {
            map.get_mut(index.to_string().as_str())
        }
        (Value::Sequence(seq), PathSegment::Index(index)) => seq.get_mut(*index),
        (Value::Sequence(seq), PathSegment::Key(key)) => {
            let position = seq.iter().position(|element| has_name(element, key))?;
            seq.get_mut(position)
        }
        _ => None,
    }
}

fn has_name(element: &Value, name: &str) -> bool {
    element
        .as_mapping()
        .and_then(|map| map.get("name"))
        .and_then(Value::as_str)
        == Some(name)
}
