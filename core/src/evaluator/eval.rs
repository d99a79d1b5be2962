//! Core evaluation logic.

use crate::{
    ast::{ArithmeticOp, BlockDefinition, Node, StatementList},
    evaluator::{
        EvalError::{self, *},
        EvaluatorOptions,
        operators::{eval_arithmetic, eval_comparison, eval_logical},
    },
    scope::Scope,
    stack::ensure_sufficient_stack,
    values::{BlockRef, NON_BLOCK_MESSAGE, Value},
};
use std::rc::Rc;
use tracing::{debug, trace};

/// Name bound inside every captured block frame to the block itself.
pub const SELF_BINDING: &str = "this";

/// Evaluator for node graphs.
pub struct Evaluator {
    options: EvaluatorOptions,
    depth: usize,
}

impl Evaluator {
    /// Create a new evaluator with the given options.
    pub fn new(options: EvaluatorOptions) -> Self {
        Self { options, depth: 0 }
    }

    /// Evaluate `node` in `scope`.
    pub fn evaluate(&mut self, node: &Node, scope: &Scope) -> Result<Value, EvalError> {
        let result = self.eval_node(node, scope);
        if let Err(error) = &result {
            debug!(%error, node = node.kind(), "evaluation aborted");
        }
        result
    }

    /// Evaluate one node, growing the host stack when it runs low. Only
    /// block calls count toward `max_depth`.
    fn eval_node(&mut self, node: &Node, scope: &Scope) -> Result<Value, EvalError> {
        ensure_sufficient_stack(|| self.eval_node_inner(node, scope))
    }

    fn eval_node_inner(&mut self, node: &Node, scope: &Scope) -> Result<Value, EvalError> {
        match node {
            Node::StatementList(list) => self.eval_statements(list, scope),

            Node::ForLoop {
                init,
                test,
                increment,
                body,
            } => {
                // One frame for the whole loop so loop-carried bindings persist
                let frame = Scope::new_frame(scope);
                self.eval_node(init, &frame)?;

                let mut result = Value::Absent;
                let mut iterations = 0usize;
                while self.eval_node(test, &frame)?.is_truthy() {
                    result = self.eval_statements(body, &frame)?;
                    self.eval_node(increment, &frame)?;
                    iterations += 1;
                }
                trace!(iterations, "for loop finished");
                Ok(result)
            }

            Node::IfStatement {
                test,
                then_branch,
                else_branch,
            } => {
                if self.eval_node(test, scope)?.is_truthy() {
                    self.eval_statements(then_branch, scope)
                } else if let Some(else_branch) = else_branch {
                    self.eval_statements(else_branch, scope)
                } else {
                    Ok(Value::Absent)
                }
            }

            Node::BlockDefinition(definition) => Ok(self.eval_block_definition(definition, scope)),

            Node::BlockCall {
                identifier,
                arguments,
            } => self.eval_block_call(identifier, arguments, scope),

            Node::VariableAssignment { identifier, value } => {
                let value = self.eval_node(value, scope)?;
                scope.assign(identifier, value.clone());
                Ok(value)
            }

            Node::VariableReference(identifier) => Ok(scope.lookup(identifier)),

            Node::LogicalExpression { left, op, right } => {
                // No short-circuit: both operands run, in order
                let left_val = self.eval_node(left, scope)?;
                let right_val = self.eval_node(right, scope)?;
                Ok(Value::Boolean(eval_logical(*op, &left_val, &right_val)))
            }

            Node::Comparison { left, op, right } => {
                let left_val = self.eval_node(left, scope)?;
                let right_val = self.eval_node(right, scope)?;
                Ok(Value::Boolean(eval_comparison(*op, &left_val, &right_val)?))
            }

            Node::Multiplication { left, right } => {
                self.eval_arithmetic(ArithmeticOp::Mul, left, right, scope)
            }
            Node::Division { left, right } => {
                self.eval_arithmetic(ArithmeticOp::Div, left, right, scope)
            }
            Node::Addition { left, right } => {
                self.eval_arithmetic(ArithmeticOp::Add, left, right, scope)
            }
            Node::Subtraction { left, right } => {
                self.eval_arithmetic(ArithmeticOp::Sub, left, right, scope)
            }

            Node::Integer(value) => Ok(Value::Integer(*value)),
            Node::Float(value) => Ok(Value::Float(*value)),
            Node::Boolean(value) => Ok(Value::Boolean(*value)),
        }
    }

    fn eval_statements(&mut self, list: &StatementList, scope: &Scope) -> Result<Value, EvalError> {
        let mut result = Value::Absent;
        for statement in list.statements() {
            result = self.eval_node(statement, scope)?;
        }
        Ok(result)
    }

    fn eval_arithmetic(
        &mut self,
        op: ArithmeticOp,
        left: &Node,
        right: &Node,
        scope: &Scope,
    ) -> Result<Value, EvalError> {
        let left_val = self.eval_node(left, scope)?;
        let right_val = self.eval_node(right, scope)?;
        eval_arithmetic(op, &left_val, &right_val)
    }

    /// Capture `scope` and bind `this` in the capture so the block can
    /// call itself.
    ///
    /// The capture holds the block and the node holds the capture, so every
    /// evaluation leaves a reference cycle behind that is never freed. A
    /// definition inside a loop body leaks one captured frame per iteration.
    fn eval_block_definition(&mut self, definition: &Rc<BlockDefinition>, scope: &Scope) -> Value {
        let captured = scope.snapshot();
        let block = BlockRef::new(Rc::clone(definition), captured.clone());
        captured.bind(SELF_BINDING, Value::Block(block.clone()));
        definition.capture(captured);

        trace!(parameters = ?definition.parameters, "block captured");
        Value::Block(block)
    }

    fn eval_block_call(
        &mut self,
        identifier: &str,
        arguments: &[Node],
        scope: &Scope,
    ) -> Result<Value, EvalError> {
        let Value::Block(block) = scope.lookup(identifier) else {
            debug!(identifier, "call target is not a block");
            return Ok(Value::error_signal(NON_BLOCK_MESSAGE));
        };

        if self.depth >= self.options.max_depth {
            return Err(StackOverflow {
                depth: self.depth + 1,
                max_depth: self.options.max_depth,
            });
        }

        // Calls start from the definition's latest capture, so a block
        // definition evaluated again rebinds every reference to it.
        let call_frame = block.call_scope().snapshot();

        // Arguments bind left to right and run in the caller's scope.
        // Surplus arguments are never evaluated.
        let parameters = block.parameters();
        let mut sources = arguments.iter();
        for parameter in parameters {
            let Some(argument) = sources.next() else {
                return Err(Arity {
                    block: identifier.to_string(),
                    expected: parameters.len(),
                    received: arguments.len(),
                });
            };
            let value = self.eval_node(argument, scope)?;
            call_frame.bind(parameter, value);
        }

        debug!(
            identifier,
            depth = self.depth + 1,
            arguments = arguments.len(),
            "calling block"
        );
        self.depth += 1;
        let result = self.eval_statements(&block.definition().body, &call_frame);
        self.depth -= 1;

        result
    }
}
