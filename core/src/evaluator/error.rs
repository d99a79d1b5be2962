//! Fatal evaluation errors.
//!
//! These abort the current evaluation and reach the caller of
//! [`crate::evaluator::evaluate`] as `Err`. Recoverable failures are not
//! errors: calling a non-block yields [`crate::Value::ErrorSignal`] and an
//! unbound name yields [`crate::Value::Absent`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Integer division by zero. Float division follows IEEE 754 instead.
    #[error("Division by zero")]
    DivisionByZero,

    /// A block was called with fewer arguments than it declares parameters.
    #[error("Block `{block}` expects {expected} argument(s) but received {received}")]
    Arity {
        block: String,
        expected: usize,
        received: usize,
    },

    /// An operator was applied to operands it is not defined for.
    #[error("Unsupported operand types for `{op}`: {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    /// An error signal reached an operator that needs a number.
    #[error("Cannot apply `{op}` to an error signal: {message}")]
    ErrorSignalOperand { op: &'static str, message: String },

    /// Too many nested block calls.
    #[error("Evaluation stack overflow: call depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}

impl EvalError {
    /// Stable code for diagnostics, in the style of the parser's `P…` codes.
    pub fn code(&self) -> &'static str {
        match self {
            EvalError::DivisionByZero => "E001",
            EvalError::Arity { .. } => "E002",
            EvalError::TypeMismatch { .. } => "E003",
            EvalError::ErrorSignalOperand { .. } => "E004",
            EvalError::StackOverflow { .. } => "E005",
        }
    }
}
