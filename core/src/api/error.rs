//! Public error types for the Paxl API.
//!
//! Parse failures and fatal evaluation errors both surface as [`Error`];
//! parse failures additionally convert to a [`Diagnostic`] with a source
//! location for rendering.

use crate::evaluator::EvalError;
use crate::parser::{ParseError, Span};
use core::fmt;

/// Public error type for all Paxl operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The source text is not a valid program.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation aborted with a fatal error.
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl Error {
    /// Diagnostic for errors that point into the source text.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        match self {
            Error::Parse(err) => Some(err.to_diagnostic()),
            Error::Eval(_) => None,
        }
    }

    /// Stable error code, `P…` for parse errors and `E…` for evaluation errors.
    pub fn code(&self) -> String {
        match self {
            Error::Parse(err) => err.to_diagnostic().code.unwrap_or_default(),
            Error::Eval(err) => err.code().to_string(),
        }
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "P001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}
