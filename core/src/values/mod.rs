//! Runtime values produced by evaluation.
//!
//! [`Value`] is a closed sum type: numbers, booleans, first-class blocks,
//! the `nil` marker ([`Value::Absent`]) and value-level error signals.
//! Error signals are ordinary results; fatal failures never appear here and
//! are reported through [`crate::evaluator::EvalError`] instead.

use crate::{ast::BlockDefinition, scope::Scope};
use core::fmt;
use std::rc::Rc;


/// Message carried by the error signal produced when a call targets a name
/// that does not hold a block.
pub const NON_BLOCK_MESSAGE: &str = "Error! Attempting to use a non-block as a block.";

#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Block(BlockRef),
    /// No binding, or no branch taken.
    Absent,
    /// A user-facing diagnostic returned in place of a result.
    ErrorSignal(String),
}

impl Value {
    /// Falsy iff `false` or `nil`. Zero is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Absent)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn error_signal(message: impl Into<String>) -> Value {
        Value::ErrorSignal(message.into())
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&BlockRef> {
        match self {
            Value::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_error_signal(&self) -> Option<&str> {
        match self {
            Value::ErrorSignal(message) => Some(message),
            _ => None,
        }
    }

    /// Name of the value's kind, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::Block(_) => "block",
            Value::Absent => "nil",
            Value::ErrorSignal(_) => "error signal",
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

/// Structural equality: integers and floats are distinct kinds here, and
/// blocks are equal only when they share both definition and captured frame.
/// Language-level `==` (with numeric promotion) lives in the evaluator.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Block(a), Value::Block(b)) => a.same_block(b),
            (Value::Absent, Value::Absent) => true,
            (Value::ErrorSignal(a), Value::ErrorSignal(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "Integer({})", value),
            Value::Float(value) => write!(f, "Float({:?})", value),
            Value::Boolean(value) => write!(f, "Boolean({})", value),
            Value::Block(block) => write!(f, "Block({})", block),
            Value::Absent => write!(f, "Absent"),
            Value::ErrorSignal(message) => write!(f, "ErrorSignal({:?})", message),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            Value::Float(value) => format_float(f, *value),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Block(block) => write!(f, "{}", block),
            Value::Absent => write!(f, "nil"),
            Value::ErrorSignal(message) => write!(f, "{}", message),
        }
    }
}

fn format_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        write!(f, "nan")
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            write!(f, "inf")
        } else {
            write!(f, "-inf")
        }
    } else {
        let s = value.to_string();
        if s.contains('.') || s.contains('e') || s.contains('E') {
            write!(f, "{}", s)
        } else {
            write!(f, "{}.0", s)
        }
    }
}

/// A first-class block: its definition together with the frame it captured.
#[derive(Clone)]
pub struct BlockRef {
    definition: Rc<BlockDefinition>,
    scope: Scope,
}

impl BlockRef {
    pub fn new(definition: Rc<BlockDefinition>, scope: Scope) -> Self {
        Self { definition, scope }
    }

    pub fn definition(&self) -> &Rc<BlockDefinition> {
        &self.definition
    }

    /// The frame captured when this reference was produced.
    pub fn captured_scope(&self) -> &Scope {
        &self.scope
    }

    /// The frame a new call of this block starts from: the definition's most
    /// recent capture.
    pub fn call_scope(&self) -> Scope {
        self.definition
            .captured_scope()
            .unwrap_or_else(|| self.scope.clone())
    }

    pub fn parameters(&self) -> &[String] {
        &self.definition.parameters
    }

    pub fn same_block(&self, other: &BlockRef) -> bool {
        Rc::ptr_eq(&self.definition, &other.definition) && self.scope.ptr_eq(&other.scope)
    }
}

impl fmt::Display for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.definition.parameters.is_empty() {
            write!(f, "{{ … }}")
        } else {
            write!(f, "{{ |{}| … }}", self.definition.parameters.join(", "))
        }
    }
}

impl fmt::Debug for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockRef")
            .field("parameters", &self.definition.parameters)
            .finish_non_exhaustive()
    }
}
