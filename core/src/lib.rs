//! Core of the Paxl scripting language: values, scopes, the node graph and
//! the tree-walking evaluator, plus the grammar-driven parser that builds
//! node graphs from source text.

pub mod api;
pub mod ast;
pub mod evaluator;
pub mod parser;
pub mod scope;
mod stack;
pub mod values;

pub use api::{Error, Interpreter};
pub use ast::Node;
pub use evaluator::{EvalError, EvaluatorOptions, evaluate};
pub use scope::Scope;
pub use values::{BlockRef, Value};
