//! The node graph evaluated by [`crate::evaluator`].
//!
//! Nodes are built by a producer (normally [`crate::parser::parse`]) and are
//! read-only during evaluation, except that a [`BlockDefinition`] records the
//! frame it captured on its most recent evaluation.

use crate::scope::Scope;
use core::{cell::RefCell, fmt, ops::Add};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    StatementList(StatementList),
    ForLoop {
        init: Box<Node>,
        test: Box<Node>,
        increment: Box<Node>,
        body: StatementList,
    },
    IfStatement {
        test: Box<Node>,
        then_branch: StatementList,
        else_branch: Option<StatementList>,
    },
    BlockDefinition(Rc<BlockDefinition>),
    BlockCall {
        identifier: String,
        arguments: Vec<Node>,
    },
    VariableAssignment {
        identifier: String,
        value: Box<Node>,
    },
    VariableReference(String),
    LogicalExpression {
        left: Box<Node>,
        op: LogicalOp,
        right: Box<Node>,
    },
    Comparison {
        left: Box<Node>,
        op: ComparisonOp,
        right: Box<Node>,
    },
    Multiplication {
        left: Box<Node>,
        right: Box<Node>,
    },
    Division {
        left: Box<Node>,
        right: Box<Node>,
    },
    Addition {
        left: Box<Node>,
        right: Box<Node>,
    },
    Subtraction {
        left: Box<Node>,
        right: Box<Node>,
    },
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Node {
    /// Boolean literal from a number: zero is `false`, anything else `true`.
    pub fn boolean_from_number(number: i64) -> Node {
        Node::Boolean(number != 0)
    }

    pub fn block_definition(parameters: Vec<String>, body: StatementList) -> Node {
        Node::BlockDefinition(Rc::new(BlockDefinition::new(parameters, body)))
    }

    /// Short name of the node kind, for tracing.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::StatementList(_) => "StatementList",
            Node::ForLoop { .. } => "ForLoop",
            Node::IfStatement { .. } => "IfStatement",
            Node::BlockDefinition(_) => "BlockDefinition",
            Node::BlockCall { .. } => "BlockCall",
            Node::VariableAssignment { .. } => "VariableAssignment",
            Node::VariableReference(_) => "VariableReference",
            Node::LogicalExpression { .. } => "LogicalExpression",
            Node::Comparison { .. } => "Comparison",
            Node::Multiplication { .. } => "Multiplication",
            Node::Division { .. } => "Division",
            Node::Addition { .. } => "Addition",
            Node::Subtraction { .. } => "Subtraction",
            Node::Integer(_) => "Integer",
            Node::Float(_) => "Float",
            Node::Boolean(_) => "Boolean",
        }
    }
}

/// A non-empty sequence of statements; evaluates to its last statement.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementList(Vec<Node>);

impl StatementList {
    /// Build a list from its statements.
    ///
    /// Producers must supply at least one statement.
    pub fn new(statements: Vec<Node>) -> Self {
        debug_assert!(!statements.is_empty(), "statement lists are never empty");
        StatementList(statements)
    }

    pub fn statements(&self) -> &[Node] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_statements(self) -> Vec<Node> {
        self.0
    }
}

impl From<Node> for StatementList {
    fn from(statement: Node) -> Self {
        StatementList(vec![statement])
    }
}

/// Concatenation: the left list's statements followed by the right's.
impl Add for StatementList {
    type Output = StatementList;

    fn add(mut self, rhs: StatementList) -> StatementList {
        self.0.extend(rhs.0);
        self
    }
}

/// A block literal: declared parameters and a body.
pub struct BlockDefinition {
    pub parameters: Vec<String>,
    pub body: StatementList,
    captured: RefCell<Option<Scope>>,
}

impl BlockDefinition {
    pub fn new(parameters: Vec<String>, body: StatementList) -> Self {
        Self {
            parameters,
            body,
            captured: RefCell::new(None),
        }
    }

    /// The frame captured by the most recent evaluation, if any.
    pub fn captured_scope(&self) -> Option<Scope> {
        self.captured.borrow().clone()
    }

    /// Replace the captured frame.
    pub(crate) fn capture(&self, scope: Scope) {
        *self.captured.borrow_mut() = Some(scope);
    }
}

impl Clone for BlockDefinition {
    fn clone(&self) -> Self {
        Self {
            parameters: self.parameters.clone(),
            body: self.body.clone(),
            captured: RefCell::new(self.captured_scope()),
        }
    }
}

// The captured frame is runtime state and takes no part in equality.
impl PartialEq for BlockDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters && self.body == other.body
    }
}

impl fmt::Debug for BlockDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockDefinition")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .field("captured", &self.captured.borrow().is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl LogicalOp {
    pub fn symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
            LogicalOp::Not => "not",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Le,
    Ge,
    Lt,
    Gt,
}

impl ComparisonOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ComparisonOp::Eq => "==",
            ComparisonOp::Neq => "!=",
            ComparisonOp::Le => "<=",
            ComparisonOp::Ge => ">=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Gt => ">",
        }
    }
}

/// Arithmetic operator behind the four arithmetic node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Sub => "-",
            ArithmeticOp::Mul => "*",
            ArithmeticOp::Div => "/",
        }
    }
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
