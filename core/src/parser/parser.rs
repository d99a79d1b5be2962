use crate::ast::{ComparisonOp, LogicalOp, Node, StatementList};
use crate::parser::{ParseError, ParseErrorKind, Span, error::convert_pest_error};
use lazy_static::lazy_static;
use pest::Parser;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest_derive::Parser;

lazy_static! {
    // Note: precedence is defined lowest to highest.
    static ref PRATT_PARSER: PrattParser<Rule> = PrattParser::new()
        // (lowest precedence)
        .op(Op::prefix(Rule::not))                       // `not` covers the rest of the expression

        // Additive, logical and comparison operators share one level.
        .op(
            Op::infix(Rule::add, Assoc::Left) |
            Op::infix(Rule::sub, Assoc::Left) |
            Op::infix(Rule::and, Assoc::Left) |
            Op::infix(Rule::or, Assoc::Left) |
            Op::infix(Rule::eq, Assoc::Left) |
            Op::infix(Rule::neq, Assoc::Left) |
            Op::infix(Rule::le, Assoc::Left) |
            Op::infix(Rule::ge, Assoc::Left) |
            Op::infix(Rule::lt, Assoc::Left) |
            Op::infix(Rule::gt, Assoc::Left)
        )                                               // `+ - and or == != <= >= < >`
        .op(
            Op::infix(Rule::mul, Assoc::Left) |
            Op::infix(Rule::div, Assoc::Left)
        )                                               // `*`, `/`
        // (highest precedence)
        ;
}

#[derive(Parser)]
#[grammar = "parser/paxl.pest"]
pub struct ProgramParser;

/// Nesting limit used by [`parse`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parse a complete program into its top-level statement list node.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    parse_with_max_depth(source, DEFAULT_MAX_DEPTH)
}

/// Parse a program, rejecting sources that nest deeper than `max_depth`.
pub fn parse_with_max_depth(source: &str, max_depth: usize) -> Result<Node, ParseError> {
    check_nesting(source, max_depth)?;

    let mut pairs =
        ProgramParser::parse(Rule::program, source).map_err(|e| convert_pest_error(e, source))?;
    let program = pairs
        .next()
        .ok_or_else(|| ParseError::other("empty parse result", source, Span(0..0)))?;
    let builder = Builder { source };
    let list = builder.statement_list(builder.first_inner(program, "statement list")?)?;
    Ok(Node::StatementList(list))
}

/// Reject `source` before pest recurses into it if it nests deeper than
/// `max_depth`. Brackets open a level. `not` and assignment open one that
/// lasts until the next `;` or the enclosing closing bracket.
fn check_nesting(source: &str, max_depth: usize) -> Result<(), ParseError> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut inline = 0usize;
    let mut enclosing = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        pos += 1;
        match bytes[start] {
            b'(' | b'{' => {
                enclosing.push(inline);
                inline = 0;
                depth += 1;
            }
            b')' | b'}' => {
                depth = depth.saturating_sub(inline + 1);
                inline = enclosing.pop().unwrap_or(0);
                continue;
            }
            b';' => {
                depth = depth.saturating_sub(inline);
                inline = 0;
                continue;
            }
            b'=' => {
                let before = start.checked_sub(1).map(|i| bytes[i]);
                // `==`, `!=`, `<=` and `>=` are operators
                if bytes.get(pos) == Some(&b'=')
                    || matches!(before, Some(b'=' | b'!' | b'<' | b'>'))
                {
                    continue;
                }
                inline += 1;
                depth += 1;
            }
            b if b.is_ascii_alphabetic() => {
                while bytes
                    .get(pos)
                    .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
                {
                    pos += 1;
                }
                if &source[start..pos] != "not" {
                    continue;
                }
                inline += 1;
                depth += 1;
            }
            _ => continue,
        }

        if depth > max_depth {
            return Err(ParseError::new(
                ParseErrorKind::MaxDepthExceeded { depth, max_depth },
                source.to_string(),
                Span(start..pos),
            ));
        }
    }
    Ok(())
}

/// Turns pest pairs into nodes, keeping the source for error reporting.
struct Builder<'s> {
    source: &'s str,
}

impl<'s> Builder<'s> {
    fn statement_list(&self, pair: Pair<'s, Rule>) -> Result<StatementList, ParseError> {
        let statements = pair
            .into_inner()
            .map(|statement| self.statement(statement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StatementList::new(statements))
    }

    fn statement(&self, pair: Pair<'s, Rule>) -> Result<Node, ParseError> {
        match pair.as_rule() {
            Rule::if_statement => self.if_statement(pair),
            Rule::for_loop => self.for_loop(pair),
            Rule::expression => self.expression(pair.into_inner()),
            rule => Err(self.unhandled(rule, &pair)),
        }
    }

    fn if_statement(&self, pair: Pair<'s, Rule>) -> Result<Node, ParseError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let test = inner
            .next()
            .ok_or_else(|| self.missing("if condition", &span))?;
        let then_branch = inner
            .next()
            .ok_or_else(|| self.missing("if body", &span))?;
        let else_branch = inner
            .next()
            .map(|branch| self.statement_list(branch))
            .transpose()?;

        Ok(Node::IfStatement {
            test: Box::new(Node::StatementList(self.statement_list(test)?)),
            then_branch: self.statement_list(then_branch)?,
            else_branch,
        })
    }

    fn for_loop(&self, pair: Pair<'s, Rule>) -> Result<Node, ParseError> {
        let span = span_of(&pair);
        let mut inner = pair.into_inner();
        let control = inner
            .next()
            .ok_or_else(|| self.missing("loop control", &span))?;
        let control_span = span_of(&control);
        let body = inner
            .next()
            .ok_or_else(|| self.missing("loop body", &span))?;

        let control = self.statement_list(control)?.into_statements();
        let found = control.len();
        let [init, test, increment]: [Node; 3] = control.try_into().map_err(|_| {
            ParseError::new(
                ParseErrorKind::MalformedForLoop { found },
                self.source.to_string(),
                control_span,
            )
        })?;

        Ok(Node::ForLoop {
            init: Box::new(init),
            test: Box::new(test),
            increment: Box::new(increment),
            body: self.statement_list(body)?,
        })
    }

    fn expression(&self, pairs: Pairs<'s, Rule>) -> Result<Node, ParseError> {
        PRATT_PARSER
            .map_primary(|primary| self.primary(primary))
            .map_prefix(|op, operand| match op.as_rule() {
                // `not` keeps the binary shape; its right operand is ignored
                Rule::not => Ok(logical(
                    Box::new(operand?),
                    LogicalOp::Not,
                    Box::new(Node::boolean_from_number(1)),
                )),
                rule => Err(self.unhandled(rule, &op)),
            })
            .map_infix(|lhs, op, rhs| {
                let (left, right) = (Box::new(lhs?), Box::new(rhs?));
                Ok(match op.as_rule() {
                    Rule::add => Node::Addition { left, right },
                    Rule::sub => Node::Subtraction { left, right },
                    Rule::mul => Node::Multiplication { left, right },
                    Rule::div => Node::Division { left, right },
                    Rule::and => logical(left, LogicalOp::And, right),
                    Rule::or => logical(left, LogicalOp::Or, right),
                    Rule::eq => comparison(left, ComparisonOp::Eq, right),
                    Rule::neq => comparison(left, ComparisonOp::Neq, right),
                    Rule::le => comparison(left, ComparisonOp::Le, right),
                    Rule::ge => comparison(left, ComparisonOp::Ge, right),
                    Rule::lt => comparison(left, ComparisonOp::Lt, right),
                    Rule::gt => comparison(left, ComparisonOp::Gt, right),
                    rule => return Err(self.unhandled(rule, &op)),
                })
            })
            .parse(pairs)
    }

    fn primary(&self, pair: Pair<'s, Rule>) -> Result<Node, ParseError> {
        match pair.as_rule() {
            Rule::expression => self.expression(pair.into_inner()),

            Rule::block_definition => {
                let mut parameters = Vec::new();
                let mut body = None;
                for part in pair.clone().into_inner() {
                    match part.as_rule() {
                        Rule::parameters => {
                            parameters = part.into_inner().map(|p| p.as_str().to_string()).collect()
                        }
                        _ => body = Some(self.statement_list(part)?),
                    }
                }
                let body = body.ok_or_else(|| self.missing("block body", &span_of(&pair)))?;
                Ok(Node::block_definition(parameters, body))
            }

            Rule::block_call => {
                let span = span_of(&pair);
                let mut inner = pair.into_inner();
                let identifier = inner
                    .next()
                    .ok_or_else(|| self.missing("block name", &span))?
                    .as_str()
                    .to_string();
                let arguments = match inner.next() {
                    Some(list) => self.statement_list(list)?.into_statements(),
                    None => Vec::new(),
                };
                Ok(Node::BlockCall {
                    identifier,
                    arguments,
                })
            }

            Rule::assignment => {
                let span = span_of(&pair);
                let mut inner = pair.into_inner();
                let identifier = inner
                    .next()
                    .ok_or_else(|| self.missing("variable name", &span))?
                    .as_str()
                    .to_string();
                let value = inner
                    .next()
                    .ok_or_else(|| self.missing("assigned value", &span))?;
                Ok(Node::VariableAssignment {
                    identifier,
                    value: Box::new(self.expression(value.into_inner())?),
                })
            }

            Rule::reference => Ok(Node::VariableReference(pair.as_str().trim().to_string())),

            Rule::boolean => Ok(Node::boolean_from_number(match pair.as_str() {
                "true" => 1,
                _ => 0,
            })),

            Rule::integer => pair
                .as_str()
                .parse()
                .map(Node::Integer)
                .map_err(|_| self.invalid_number(&pair)),

            Rule::float => pair
                .as_str()
                .parse()
                .map(Node::Float)
                .map_err(|_| self.invalid_number(&pair)),

            rule => Err(self.unhandled(rule, &pair)),
        }
    }

    fn first_inner(&self, pair: Pair<'s, Rule>, what: &str) -> Result<Pair<'s, Rule>, ParseError> {
        let span = span_of(&pair);
        pair.into_inner()
            .next()
            .ok_or_else(|| self.missing(what, &span))
    }

    fn missing(&self, what: &str, span: &Span) -> ParseError {
        ParseError::other(format!("missing {}", what), self.source, span.clone())
    }

    fn invalid_number(&self, pair: &Pair<'s, Rule>) -> ParseError {
        ParseError::new(
            ParseErrorKind::InvalidNumber {
                text: pair.as_str().to_string(),
            },
            self.source.to_string(),
            span_of(pair),
        )
    }

    fn unhandled(&self, rule: Rule, pair: &Pair<'s, Rule>) -> ParseError {
        ParseError::other(format!("Unhandled rule: {:?}", rule), self.source, span_of(pair))
    }
}

fn span_of(pair: &Pair<'_, Rule>) -> Span {
    let span = pair.as_span();
    Span(span.start()..span.end())
}

fn logical(left: Box<Node>, op: LogicalOp, right: Box<Node>) -> Node {
    Node::LogicalExpression { left, op, right }
}

fn comparison(left: Box<Node>, op: ComparisonOp, right: Box<Node>) -> Node {
    Node::Comparison { left, op, right }
}
