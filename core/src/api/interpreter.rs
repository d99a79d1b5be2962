use super::Error;
use crate::ast::Node;
use crate::evaluator::{Evaluator, EvaluatorOptions};
use crate::parser;
use crate::scope::Scope;
use crate::values::Value;
use tracing::debug;

/// A root scope plus the limits programs run under.
///
/// Every [`run`](Interpreter::run) evaluates against the same root scope.
/// Interpreters are single-threaded; give each thread its own.
#[derive(Debug, Default)]
pub struct Interpreter {
    scope: Scope,
    options: EvaluatorOptions,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvaluatorOptions) -> Self {
        Self {
            scope: Scope::new(),
            options,
        }
    }

    /// Parse `source` and evaluate it in the root scope.
    pub fn run(&mut self, source: &str) -> Result<Value, Error> {
        let program = parser::parse(source)?;
        debug!(bytes = source.len(), "program parsed");
        self.eval(&program)
    }

    /// Evaluate an already-built node graph in the root scope.
    pub fn eval(&mut self, node: &Node) -> Result<Value, Error> {
        Ok(Evaluator::new(self.options.clone()).evaluate(node, &self.scope)?)
    }

    /// The root scope, for binding host values before a run or reading
    /// results after one.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_persist_between_runs() {
        let mut interpreter = Interpreter::new();
        interpreter.run("a = 10").unwrap();
        assert_eq!(interpreter.run("a + 5").unwrap(), Value::Integer(15));
        assert_eq!(interpreter.scope().lookup("a"), Value::Integer(10));
    }

    #[test]
    fn test_host_bindings_are_visible() {
        let mut interpreter = Interpreter::new();
        interpreter.scope().bind("A", Value::Integer(3));
        assert_eq!(interpreter.run("A * A").unwrap(), Value::Integer(9));
    }

    #[test]
    fn test_errors_by_kind() {
        let mut interpreter = Interpreter::new();
        assert!(matches!(interpreter.run("1 +"), Err(Error::Parse(_))));
        assert!(matches!(interpreter.run("1 / 0"), Err(Error::Eval(_))));
    }

    #[test]
    fn test_max_depth_option() {
        let mut interpreter = Interpreter::with_options(EvaluatorOptions { max_depth: 3 });
        interpreter
            .run("f = { |n| if (n == 0) { 0 } else { this(n - 1) } }")
            .unwrap();
        assert_eq!(interpreter.run("f(2)").unwrap(), Value::Integer(0));
        assert!(matches!(
            interpreter.run("f(10)"),
            Err(Error::Eval(crate::EvalError::StackOverflow { max_depth: 3, .. }))
        ));
    }
}
