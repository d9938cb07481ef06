//! Dotted-path addressing into a YAML document tree.
//!
//! A [`Path`] identifies at most one location inside a tree: a sequence of
//! segments, each either a mapping key or a sequence index. Paths are parsed
//! from dotted strings (`meta.jobs.0.name`), compared segment-by-segment,
//! and rendered back with dots.

use std::fmt;

/// One step of a [`Path`]: a mapping key or a sequence index.
///
/// A purely numeric token parses as [`Index`]; resolution against a mapping
/// falls back to the decimal string form, so `map.0.key` addresses both a
/// sequence element and a mapping key named `"0"`.
///
/// [`Index`]: PathSegment::Index
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PathSegment {
    /// A mapping key.
    Key(String),
    /// A zero-based sequence index.
    Index(usize),
}

impl PathSegment {
    fn parse(token: &str) -> Self {
        match token.parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Key(token.to_string()),
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// An ordered address into a document tree.
///
/// Two paths are equal iff their segment sequences are equal. The derived
/// ordering is lexicographic over segments, which gives prune sets and
/// error listings a stable, human-predictable order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// The empty path, addressing the tree root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dotted path string.
    ///
    /// Tokens are split on `.`; empty tokens (leading, trailing, or doubled
    /// dots) are skipped, so `"a..b."` parses the same as `"a.b"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use graft_cli::tree::path::{Path, PathSegment};
    ///
    /// let path = Path::parse("jobs.0.name");
    /// assert_eq!(path.segments().len(), 3);
    /// assert_eq!(path.segments()[1], PathSegment::Index(0));
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self {
            segments: s
                .split('.')
                .filter(|token| !token.is_empty())
                .map(PathSegment::parse)
                .collect(),
        }
    }

    /// Build a path from pre-parsed segments.
    #[must_use]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// The segments of this path, in order.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// True for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// This path extended by a mapping key.
    #[must_use]
    pub fn child_key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// This path extended by a sequence index.
    #[must_use]
    pub fn child_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// True when `self` addresses `other` or one of its ancestors.
    ///
    /// The root path is a prefix of every path.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        self.segments.len() <= other.segments.len()
            && self.segments.iter().zip(other.segments.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, ".")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_and_indices() {
        let path = Path::parse("meta.jobs.2.name");
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("meta".to_string()),
                PathSegment::Key("jobs".to_string()),
                PathSegment::Index(2),
                PathSegment::Key("name".to_string()),
            ]
        );
    }

    #[test]
    fn display_round_trips() {
        for s in ["key", "map.key.2.subkey", "a.b-c.d_e"] {
            assert_eq!(Path::parse(s).to_string(), s);
        }
    }

    #[test]
    fn empty_tokens_are_skipped() {
        assert_eq!(Path::parse("a..b."), Path::parse("a.b"));
        assert!(Path::parse("").is_empty());
    }

    #[test]
    fn equality_is_segment_equality() {
        assert_eq!(Path::parse("a.0"), Path::parse("a.0"));
        assert_ne!(Path::parse("a.0"), Path::parse("a.1"));
        // An index and a key with the same rendering are distinct segments.
        assert_ne!(
            Path::from_segments(vec![PathSegment::Key("0".to_string())]),
            Path::from_segments(vec![PathSegment::Index(0)])
        );
    }

    #[test]
    fn prefix_relation() {
        let parent = Path::parse("meta.jobs");
        let child = Path::parse("meta.jobs.0.name");
        assert!(parent.is_prefix_of(&child));
        assert!(!child.is_prefix_of(&parent));
        assert!(parent.is_prefix_of(&parent));
        assert!(Path::root().is_prefix_of(&child));
    }

    #[test]
    fn child_builders_extend() {
        let path = Path::parse("jobs").child_index(0).child_key("name");
        assert_eq!(path, Path::parse("jobs.0.name"));
    }
}
