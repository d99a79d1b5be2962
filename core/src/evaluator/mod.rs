//! Tree-walking evaluator for Paxl node graphs.
//!
//! [`evaluate`] runs one node against one scope and produces a [`Value`], or
//! a fatal [`EvalError`] that aborts the whole evaluation.
//!
//! ## Design Principles
//!
//! - **Never panic**: user programs reach the host only as values or errors
//! - **Stack-safe**: block-call depth is bounded by [`EvaluatorOptions::max_depth`],
//!   and node recursion grows the host stack on demand
//! - **Single-threaded**: scopes are `Rc`-shared; run one evaluator and one
//!   root scope per thread
//!
//! ## Example
//!
//! ```
//! use paxl_core::{evaluator::evaluate, parser, Scope, Value};
//!
//! let program = parser::parse("a = { |x, y| x * y }; a(6; 7)").unwrap();
//! let result = evaluate(&program, &Scope::new()).unwrap();
//! assert_eq!(result, Value::Integer(42));
//! ```

mod error;
mod eval;
mod operators;


pub use error::EvalError;
pub use eval::Evaluator;

use crate::{ast::Node, scope::Scope, values::Value};

/// Options controlling evaluation limits.
#[derive(Debug, Clone)]
pub struct EvaluatorOptions {
    /// Maximum number of simultaneously active block calls.
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// Evaluate `node` in `scope` with default limits.
pub fn evaluate(node: &Node, scope: &Scope) -> Result<Value, EvalError> {
    Evaluator::new(EvaluatorOptions::default()).evaluate(node, scope)
}
