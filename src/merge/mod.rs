//! Recursive document merging with per-array directives.
//!
//! A [`Merger`] folds successive overlay documents into one accumulating
//! root mapping. Mappings union (recursing on shared keys), scalars are
//! last-document-wins, and sequences combine according to a directive the
//! incoming sequence may declare as its first element:
//!
//! ```yaml
//! array_append:
//!   - (( append ))
//!   - three
//! ```
//!
//! Recognized directives are `append`, `prepend`, `replace`, and `inline`
//! (the default: pairwise merge by index, extras appended). The marker
//! element is consumed during the merge and never appears in output. The
//! directive vocabulary is deliberately centralized in [`directive_for`].
//!
//! Merging itself never aborts mid-stream: a structural mismatch is a
//! legitimate replace, and the one recoverable misuse (a directive marker
//! past the head of its list) is recorded and surfaced by
//! [`Merger::finish`] after all documents are folded, so a multi-file run
//! reports its first problem exactly once.

use serde_yaml::{Mapping, Sequence, Value};
use tracing::{debug, trace};

use crate::core::GraftError;
use crate::operators::parse::parse_call;

/// Policy governing how an incoming sequence combines with the existing
/// sequence at the same location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayDirective {
    /// Pairwise merge by index; incoming extras are appended. The default.
    Inline,
    /// Incoming elements are concatenated after the existing ones.
    Append,
    /// Incoming elements are concatenated before the existing ones.
    Prepend,
    /// The incoming sequence replaces the existing one wholesale.
    Replace,
}

/// Map a directive word to its policy.
///
/// This is the single point defining the marker vocabulary; the marker
/// itself is an operator-call-shaped element (`(( append ))`) at the head
/// of the incoming sequence.
#[must_use]
pub fn directive_for(name: &str) -> Option<ArrayDirective> {
    match name {
        "inline" => Some(ArrayDirective::Inline),
        "append" => Some(ArrayDirective::Append),
        "prepend" => Some(ArrayDirective::Prepend),
        "replace" => Some(ArrayDirective::Replace),
        _ => None,
    }
}

/// Folds overlay documents into an accumulating root mapping.
///
/// Deferred-error contract: [`merge`](Self::merge) always completes, and
/// [`finish`](Self::finish) returns the first problem encountered across
/// all documents, if any.
#[derive(Default)]
pub struct Merger {
    error: Option<GraftError>,
}

impl Merger {
    /// Create a merger with no recorded error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `next` into `root`, consuming `next`.
    ///
    /// Keys present only in `root` are untouched; keys present only in
    /// `next` are inserted; keys present in both merge recursively.
    pub fn merge(&mut self, root: &mut Mapping, next: Mapping) {
        debug!(keys = next.len(), "merging document into root");
        self.merge_map(root, next);
    }

    /// Surface the first deferred error, if any.
    pub fn finish(self) -> Result<(), GraftError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn merge_map(&mut self, root: &mut Mapping, next: Mapping) {
        for (key, incoming) in next {
            if let Some(existing) = root.get_mut(&key) {
                self.merge_value(existing, incoming);
                continue;
            }
            let adopted = self.adopt(incoming);
            root.insert(key, adopted);
        }
    }

    fn merge_value(&mut self, existing: &mut Value, incoming: Value) {
        match (existing, incoming) {
            (Value::Mapping(root_map), Value::Mapping(next_map)) => {
                self.merge_map(root_map, next_map);
            }
            (Value::Sequence(root_seq), Value::Sequence(next_seq)) => {
                self.merge_seq(root_seq, next_seq);
            }
            // Scalars, and any type mismatch: the incoming value wins.
            (slot, incoming) => {
                let adopted = self.adopt(incoming);
                *slot = adopted;
            }
        }
    }

    fn merge_seq(&mut self, root: &mut Sequence, mut next: Sequence) {
        let directive = self.extract_directive(&mut next);
        trace!(?directive, incoming = next.len(), existing = root.len(), "merging sequences");

        match directive {
            ArrayDirective::Append => {
                for incoming in next {
                    let adopted = self.adopt(incoming);
                    root.push(adopted);
                }
            }
            ArrayDirective::Prepend => {
                let mut combined = Sequence::with_capacity(next.len() + root.len());
                for incoming in next {
                    let adopted = self.adopt(incoming);
                    combined.push(adopted);
                }
                combined.extend(root.drain(..));
                *root = combined;
            }
            ArrayDirective::Replace => {
                *root = next.into_iter().map(|incoming| self.adopt(incoming)).collect();
            }
            ArrayDirective::Inline => {
                let existing_len = root.len();
                for (index, incoming) in next.into_iter().enumerate() {
                    if index < existing_len {
                        self.merge_value(&mut root[index], incoming);
                    } else {
                        let adopted = self.adopt(incoming);
                        root.push(adopted);
                    }
                }
            }
        }
    }

    /// Normalize a value that has no counterpart in the root before it is
    /// inserted.
    ///
    /// Directive markers must never reach the output tree, and against an
    /// empty baseline every directive degenerates to "take the elements
    /// as-is". Adoption therefore strips markers (still flagging misplaced
    /// ones) and recurses.
    fn adopt(&mut self, value: Value) -> Value {
        match value {
            Value::Mapping(map) => {
                let mut adopted = Mapping::new();
                for (key, child) in map {
                    let child = self.adopt(child);
                    adopted.insert(key, child);
                }
                Value::Mapping(adopted)
            }
            Value::Sequence(mut seq) => {
                self.extract_directive(&mut seq);
                Value::Sequence(seq.into_iter().map(|child| self.adopt(child)).collect())
            }
            scalar => scalar,
        }
    }

    /// Pull the directive marker off the incoming sequence, if present.
    ///
    /// Marker elements are removed wherever they appear; one past index 0
    /// records a deferred error, since it cannot govern a merge that is
    /// already underway.
    fn extract_directive(&mut self, next: &mut Sequence) -> ArrayDirective {
        let mut directive = ArrayDirective::Inline;
        let mut kept = Sequence::with_capacity(next.len());

        for (original_index, element) in next.drain(..).enumerate() {
            let marker = element.as_str().and_then(parse_call).and_then(|call| {
                if call.args.is_empty() {
                    directive_for(&call.name).map(|d| (d, call.name))
                } else {
                    None
                }
            });

            match marker {
                Some((found, _)) if original_index == 0 => directive = found,
                Some((_, name)) => {
                    if self.error.is_none() {
                        self.error = Some(GraftError::MisplacedDirective {
                            directive: name,
                            index: original_index,
                        });
                    }
                }
                None => kept.push(element),
            }
        }

        *next = kept;
        directive
    }
}
