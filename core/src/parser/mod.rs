//! Grammar-driven parser producing [`crate::ast::Node`] graphs.
//!
//! The grammar lives in `paxl.pest`; operator precedence is resolved with a
//! Pratt parser. The evaluator never calls into this module.

pub mod error;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use parser::{DEFAULT_MAX_DEPTH, ProgramParser, Rule, parse, parse_with_max_depth};



/// Byte range into the parsed source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span(pub core::ops::Range<usize>);

impl Span {
    pub fn start(&self) -> usize {
        self.0.start
    }

    pub fn end(&self) -> usize {
        self.0.end
    }
}
