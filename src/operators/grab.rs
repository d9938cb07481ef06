//! `(( grab path ))`: fetch the value at another location.
//!
//! The workhorse cross-reference operator: replaces the call site with a
//! copy of the referenced value, whatever its shape (scalar, mapping, or
//! sequence). A literal argument passes through unchanged, which makes
//! `grab` double as an identity wrapper.

use serde_yaml::Value;

use super::{EvalError, Operator, ResolvedArg};

/// The `grab` operator.
pub struct Grab;

impl Operator for Grab {
    fn name(&self) -> &'static str {
        "grab"
    }

    fn evaluate(&self, _tree: &Value, args: &[ResolvedArg]) -> Result<Value, EvalError> {
        match args {
            [arg] => Ok(arg.value.clone()),
            _ => Err(EvalError::new(format!(
                "grab expects exactly one argument, got {}",
                args.len()
            ))),
        }
    }
}
