//! `(( concat arg arg… ))`: join scalar arguments into one string.
//!
//! Each argument must resolve to a string, number, or boolean; its natural
//! rendering is appended in call order. Mappings, sequences, and nulls are
//! rejected with a message naming the offending argument as written.

use serde_yaml::Value;

use super::{EvalError, Operator, ResolvedArg};

/// The `concat` operator.
pub struct Concat;

impl Operator for Concat {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn evaluate(&self, _tree: &Value, args: &[ResolvedArg]) -> Result<Value, EvalError> {
        if args.len() < 2 {
            return Err(EvalError::new(format!(
                "concat expects at least two arguments, got {}",
                args.len()
            )));
        }

        let mut joined = String::new();
        for arg in args {
            match render_scalar(&arg.value) {
                Some(text) => joined.push_str(&text),
                None => {
                    return Err(EvalError::new(format!(
                        "concat argument {} is not a string-compatible scalar",
                        arg.origin
                    )));
                }
            }
        }
        Ok(Value::String(joined))
    }
}

fn render_scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::Argument;
    use crate::tree::path::Path;

    fn literal(value: Value) -> ResolvedArg {
        ResolvedArg { value: value.clone(), origin: Argument::Literal(value) }
    }

    fn reference(path: &str, value: Value) -> ResolvedArg {
        ResolvedArg { value, origin: Argument::Reference(Path::parse(path)) }
    }

    #[test]
    fn joins_strings_and_numbers() {
        let args = vec![
            reference("meta.env", Value::from("prod")),
            literal(Value::from("-api-")),
            literal(Value::from(3)),
        ];
        let result = Concat.evaluate(&Value::Null, &args).unwrap();
        assert_eq!(result, Value::from("prod-api-3"));
    }

    #[test]
    fn rejects_structured_arguments() {
        let subtree: Value = serde_yaml::from_str("{key: value}").unwrap();
        let args = vec![reference("meta", subtree), literal(Value::from("x"))];
        let err = Concat.evaluate(&Value::Null, &args).unwrap_err();
        assert!(err.to_string().contains("meta"));
    }

    #[test]
    fn rejects_null_arguments() {
        let args = vec![literal(Value::from("a")), reference("missing", Value::Null)];
        assert!(Concat.evaluate(&Value::Null, &args).is_err());
    }

    #[test]
    fn rejects_single_argument() {
        let args = vec![literal(Value::from("alone"))];
        let err = Concat.evaluate(&Value::Null, &args).unwrap_err();
        assert!(err.to_string().contains("at least two"));
    }
}
