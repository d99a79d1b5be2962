//! Public API for the Paxl language.
//!
//! [`Interpreter`] owns a root scope and runs source text against it, so
//! bindings made by one program are visible to the next. Lower-level pieces
//! ([`crate::parser::parse`], [`crate::evaluator::evaluate`]) stay available
//! for hosts that build or cache node graphs themselves.
//!
//! # Example
//!
//! ```
//! use paxl_core::{Interpreter, Value};
//!
//! let mut interpreter = Interpreter::new();
//! interpreter.run("double = { |x| x * 2 }").unwrap();
//! assert_eq!(interpreter.run("double(21)").unwrap(), Value::Integer(42));
//! ```

pub mod error;
mod interpreter;

pub use error::{Diagnostic, Error, Severity};
pub use interpreter::Interpreter;
