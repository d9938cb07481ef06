//! `(( param "message" ))`: demand that an overlay override this value.
//!
//! A base document uses `param` to mark values every deployment must fill
//! in. Overlays that provide the value simply overwrite the scalar during
//! the merge; a `param` that survives to resolution means the merge was
//! incomplete, so evaluation always fails with the given message.

use serde_yaml::Value;

use super::{EvalError, Operator, ResolvedArg};

/// The `param` operator.
pub struct Param;

impl Operator for Param {
    fn name(&self) -> &'static str {
        "param"
    }

    fn evaluate(&self, _tree: &Value, args: &[ResolvedArg]) -> Result<Value, EvalError> {
        let message = match args {
            [arg] => match &arg.value {
                Value::String(text) => text.clone(),
                other => super::parse::Argument::Literal(other.clone()).to_string(),
            },
            _ => {
                return Err(EvalError::new(format!(
                    "param expects exactly one argument, got {}",
                    args.len()
                )));
            }
        };
        Err(EvalError::new(format!("parameter has not been overridden: {message}")))
    }
}
