//! Paxl - a small expression-oriented scripting language
//!
//! # Overview
//!
//! Paxl programs are `;`-separated statements over integers, floats and
//! booleans, with first-class blocks (closures) that can call themselves
//! through the implicit name `this`. Every statement is an expression; a
//! program evaluates to the value of its last statement.
//!
//! # Quick Start
//!
//! ```
//! use paxl::{Interpreter, Value};
//!
//! let mut interpreter = Interpreter::new();
//! let result = interpreter
//!     .run("factorial = { |x| if (x == 0) { 1 } else { x * (this(x - 1)) } }; factorial(5)")
//!     .unwrap();
//! assert_eq!(result, Value::Integer(120));
//! ```
//!
//! # Errors
//!
//! Calling something that is not a block is not an error: the call yields an
//! error-signal value that prints as a message. Parse failures and fatal
//! evaluation errors (integer division by zero, missing arguments, operator
//! misuse, runaway recursion) come back as [`Error`], which
//! [`render_error`] prints with source snippets.

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export public API from paxl_core
pub use paxl_core::api::{Diagnostic, Error, Interpreter, Severity};
pub use paxl_core::evaluator::{EvalError, EvaluatorOptions, evaluate};
pub use paxl_core::parser::{ParseError, ParseErrorKind, parse, parse_with_max_depth};
pub use paxl_core::values::{self, BlockRef, Value};
pub use paxl_core::{Node, Scope, ast};
