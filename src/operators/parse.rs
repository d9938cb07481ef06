//! Recognition of `(( operator arg… ))` expressions in string scalars.
//!
//! Only whole-scalar expressions count: a `(( … ))` embedded inside a larger
//! string is not a call and is left untouched. Parsing is pure (no tree
//! access, no evaluation), so the merge engine can reuse it to recognize
//! array directive markers.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::tree::path::Path;

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\(\(\s*(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?:\s+(?P<args>\S.*?))?\s*\)\)\s*$")
        .expect("operator call pattern is valid")
});

static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*$").expect("path pattern is valid")
});

/// One raw argument of an operator call.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A reference to another location in the document tree.
    Reference(Path),
    /// A concrete scalar (quoted string, number, boolean, or null).
    Literal(Value),
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reference(path) => write!(f, "{path}"),
            Self::Literal(Value::String(s)) => write!(f, "\"{s}\""),
            Self::Literal(Value::Null) => write!(f, "nil"),
            Self::Literal(value) => {
                write!(f, "{}", serde_yaml::to_string(value).unwrap_or_default().trim_end())
            }
        }
    }
}

/// A parsed `(( name arg… ))` expression, not yet evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorCall {
    /// The operator name.
    pub name: String,
    /// The arguments, in call order. May be empty.
    pub args: Vec<Argument>,
}

/// Parse a scalar as an operator call.
///
/// Returns `None` for anything that is not a whole-scalar `(( … ))`
/// expression, including expressions with an unterminated quoted argument.
///
/// Unquoted tokens are classified in order: `nil`/`null`/`~`, booleans,
/// numbers, then dotted path references; a token fitting none of these is
/// taken as a bare string literal. Quoted tokens (single or double) are
/// always string literals and may contain spaces.
///
/// # Examples
///
/// ```
/// use graft_cli::operators::parse::{Argument, parse_call};
///
/// let call = parse_call("(( grab meta.greeting ))").unwrap();
/// assert_eq!(call.name, "grab");
/// assert!(matches!(call.args[0], Argument::Reference(_)));
///
/// assert!(parse_call("prefix (( grab meta ))").is_none());
/// ```
#[must_use]
pub fn parse_call(scalar: &str) -> Option<OperatorCall> {
    let captures = CALL_RE.captures(scalar)?;
    let name = captures["name"].to_string();
    let args = match captures.name("args") {
        Some(raw) => tokenize(raw.as_str())?.into_iter().map(classify).collect(),
        None => Vec::new(),
    };
    Some(OperatorCall { name, args })
}

enum RawToken {
    Quoted(String),
    Bare(String),
}

/// Split an argument list on whitespace, honoring quoted tokens.
/// Returns `None` when a quote is left unterminated.
fn tokenize(input: &str) -> Option<Vec<RawToken>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '"' || c == '\'' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            for inner in chars.by_ref() {
                if inner == c {
                    closed = true;
                    break;
                }
                text.push(inner);
            }
            if !closed {
                return None;
            }
            tokens.push(RawToken::Quoted(text));
        } else {
            let mut text = String::new();
            while let Some(&inner) = chars.peek() {
                if inner.is_whitespace() {
                    break;
                }
                text.push(inner);
                chars.next();
            }
            tokens.push(RawToken::Bare(text));
        }
    }

    Some(tokens)
}

fn classify(token: RawToken) -> Argument {
    let bare = match token {
        RawToken::Quoted(text) => return Argument::Literal(Value::String(text)),
        RawToken::Bare(text) => text,
    };

    match bare.as_str() {
        "nil" | "null" | "~" => return Argument::Literal(Value::Null),
        "true" => return Argument::Literal(Value::Bool(true)),
        "false" => return Argument::Literal(Value::Bool(false)),
        _ => {}
    }
    if let Ok(integer) = bare.parse::<i64>() {
        return Argument::Literal(Value::from(integer));
    }
    if let Ok(float) = bare.parse::<f64>() {
        return Argument::Literal(Value::from(float));
    }
    if PATH_RE.is_match(&bare) {
        return Argument::Reference(Path::parse(&bare));
    }
    Argument::Literal(Value::String(bare))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_reference_arguments() {
        let call = parse_call("(( grab meta.environment.name ))").unwrap();
        assert_eq!(call.name, "grab");
        assert_eq!(
            call.args,
            vec![Argument::Reference(Path::parse("meta.environment.name"))]
        );
    }

    #[test]
    fn surrounding_whitespace_is_insignificant() {
        assert!(parse_call("  ((  grab meta.key  ))  ").is_some());
        assert!(parse_call("((grab meta.key))").is_some());
    }

    #[test]
    fn zero_argument_calls_parse() {
        let call = parse_call("(( append ))").unwrap();
        assert_eq!(call.name, "append");
        assert!(call.args.is_empty());
    }

    #[test]
    fn quoted_tokens_are_string_literals() {
        let call = parse_call(r#"(( concat meta.env "-api" 'v 2' ))"#).unwrap();
        assert_eq!(call.args.len(), 3);
        assert_eq!(call.args[0], Argument::Reference(Path::parse("meta.env")));
        assert_eq!(call.args[1], Argument::Literal(Value::String("-api".to_string())));
        assert_eq!(call.args[2], Argument::Literal(Value::String("v 2".to_string())));
    }

    #[test]
    fn unquoted_scalars_classify_by_shape() {
        let call = parse_call("(( pick 42 3.5 true nil ))").unwrap();
        assert_eq!(call.args[0], Argument::Literal(Value::from(42)));
        assert_eq!(call.args[1], Argument::Literal(Value::from(3.5)));
        assert_eq!(call.args[2], Argument::Literal(Value::Bool(true)));
        assert_eq!(call.args[3], Argument::Literal(Value::Null));
    }

    #[test]
    fn non_expressions_do_not_parse() {
        assert!(parse_call("plain string").is_none());
        assert!(parse_call("prefix (( grab meta ))").is_none());
        assert!(parse_call("(( grab meta )) suffix").is_none());
        assert!(parse_call("(( ))").is_none());
        assert!(parse_call("((").is_none());
    }

    #[test]
    fn unterminated_quote_is_not_a_call() {
        assert!(parse_call(r#"(( concat "open ))"#).is_none());
    }
}
