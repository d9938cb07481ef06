//! Operator implementations and the registry that dispatches them.
//!
//! An operator is a named capability invoked from a document scalar of the
//! form `(( name arg… ))`. The resolution engine finds the calls, orders
//! them by dependency, resolves their arguments to concrete values, and
//! hands each one to the implementation registered under its name; the
//! returned value overwrites the call's location in the tree.
//!
//! The [`OperatorRegistry`] keeps the engine's control flow independent of
//! the catalogue: adding an operator means implementing [`Operator`] and
//! registering it, nothing more. Built-ins:
//!
//! - [`grab`](grab::Grab) - fetch the value at a referenced path
//! - [`concat`](concat::Concat) - join scalar arguments into one string
//! - [`param`](param::Param) - demand that an overlay override this value

pub mod concat;
pub mod grab;
pub mod param;
pub mod parse;

use std::collections::HashMap;

use serde_yaml::Value;
use thiserror::Error;

pub use parse::{Argument, OperatorCall};

/// A failure inside an operator implementation.
///
/// Carries the operator's own message; the evaluator wraps it with the
/// document path of the failing call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EvalError {
    message: String,
}

impl EvalError {
    /// Create an evaluation error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// An operator argument after resolution.
///
/// `value` is the concrete value handed to the implementation; `origin`
/// keeps the raw argument form so error messages can name what the user
/// actually wrote (a path, not the value it happened to hold).
#[derive(Debug, Clone)]
pub struct ResolvedArg {
    /// The concrete value of the argument.
    pub value: Value,
    /// The argument as written in the call.
    pub origin: Argument,
}

/// A named operator implementation.
///
/// Implementations are synchronous and must not mutate the tree; they see
/// the resolved tree read-only and return the value that replaces the call
/// site.
pub trait Operator {
    /// The name this operator is invoked by.
    fn name(&self) -> &'static str;

    /// Evaluate one call with fully resolved arguments.
    fn evaluate(&self, tree: &Value, args: &[ResolvedArg]) -> Result<Value, EvalError>;
}

/// Registry mapping operator names to their implementations.
pub struct OperatorRegistry {
    ops: HashMap<&'static str, Box<dyn Operator>>,
}

impl OperatorRegistry {
    /// An empty registry. Useful for hosts that want full control over the
    /// catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self { ops: HashMap::new() }
    }

    /// A registry pre-populated with the built-in operators.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(grab::Grab));
        registry.register(Box::new(concat::Concat));
        registry.register(Box::new(param::Param));
        registry
    }

    /// Register an operator under its own name, replacing any previous
    /// implementation of that name.
    pub fn register(&mut self, op: Box<dyn Operator>) {
        self.ops.insert(op.name(), op);
    }

    /// Look up an operator by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Operator> {
        self.ops.get(name).map(|op| op.as_ref())
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_registered() {
        let registry = OperatorRegistry::with_builtins();
        assert!(registry.get("grab").is_some());
        assert!(registry.get("concat").is_some());
        assert!(registry.get("param").is_some());
        assert!(registry.get("static_ips").is_none());
    }

    #[test]
    fn registration_replaces_by_name() {
        struct Stub;
        impl Operator for Stub {
            fn name(&self) -> &'static str {
                "grab"
            }
            fn evaluate(&self, _: &Value, _: &[ResolvedArg]) -> Result<Value, EvalError> {
                Ok(Value::Null)
            }
        }

        let mut registry = OperatorRegistry::with_builtins();
        registry.register(Box::new(Stub));
        let op = registry.get("grab").unwrap();
        assert_eq!(op.evaluate(&Value::Null, &[]).unwrap(), Value::Null);
    }
}
