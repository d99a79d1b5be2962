use crate::api::{Diagnostic, Severity};
use crate::parser::{Rule, Span};
use core::fmt;

/// Parser error with the source it was raised for
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub src: String,
    pub span: Span,
}

/// Specific kinds of parse errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected token
    UnexpectedToken { expected: String, found: String },
    /// Invalid number literal
    InvalidNumber { text: String },
    /// A `for` header without exactly three statements
    MalformedForLoop { found: usize },
    /// Maximum nesting depth exceeded
    MaxDepthExceeded { depth: usize, max_depth: usize },
    /// Other parse errors (catch-all for Pest errors we don't specifically handle)
    Other { message: String },
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, src: String, span: Span) -> Self {
        Self { kind, src, span }
    }

    pub(crate) fn other(message: impl Into<String>, source: &str, span: Span) -> Self {
        Self::new(
            ParseErrorKind::Other {
                message: message.into(),
            },
            source.to_string(),
            span,
        )
    }

    /// Convert to a Diagnostic for rendering
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (message, code, help) = match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, found } => (
                format!("Expected {}, found {}", expected, found),
                "P001",
                None,
            ),
            ParseErrorKind::InvalidNumber { text } => (
                format!("Invalid number literal '{}'", text),
                "P002",
                Some("Integer literals must fit in 64 bits".to_string()),
            ),
            ParseErrorKind::MalformedForLoop { found } => (
                format!(
                    "A for loop header needs 3 statements (init; test; increment), found {}",
                    found
                ),
                "P003",
                Some("Write the header as `for (i = 0; i < n; i = i + 1)`".to_string()),
            ),
            ParseErrorKind::MaxDepthExceeded { max_depth, .. } => (
                format!(
                    "Expression nesting depth exceeds maximum of {} levels",
                    max_depth
                ),
                "P004",
                Some("Move inner parts into named blocks".to_string()),
            ),
            ParseErrorKind::Other { message } => (message.clone(), "P999", None),
        };

        Diagnostic {
            severity: Severity::Error,
            message,
            span: self.span.clone(),
            help,
            code: Some(code.to_string()),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostic = self.to_diagnostic();
        write!(f, "{}: {}", diagnostic.severity, diagnostic.message)?;

        if let Some(ref code) = diagnostic.code {
            write!(f, " [{}]", code)?;
        }

        if let Some(ref help) = diagnostic.help {
            write!(f, "\nhelp: {}", help)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Convert Pest error to human-readable ParseError
pub fn convert_pest_error(err: pest::error::Error<Rule>, source: &str) -> ParseError {
    use pest::error::ErrorVariant;

    let span = match err.location {
        pest::error::InputLocation::Pos(pos) => Span(pos..pos),
        pest::error::InputLocation::Span((start, end)) => Span(start..end),
    };

    let kind = match err.variant {
        ErrorVariant::ParsingError { positives, .. } => ParseErrorKind::UnexpectedToken {
            expected: format_expected_rules(&positives),
            found: describe_found(source, span.0.start),
        },
        ErrorVariant::CustomError { message } => ParseErrorKind::Other { message },
    };

    ParseError::new(kind, source.to_string(), span)
}

/// Format expected rules in a human-readable way
fn format_expected_rules(rules: &[Rule]) -> String {
    if rules.is_empty() {
        return "something else".to_string();
    }

    // Group related rules into higher-level concepts
    let mut concepts = Vec::new();

    for rule in rules {
        let concept = match rule {
            Rule::integer | Rule::float | Rule::boolean => "literal",
            Rule::identifier | Rule::reference => "identifier",
            Rule::add
            | Rule::sub
            | Rule::mul
            | Rule::div
            | Rule::and
            | Rule::or
            | Rule::eq
            | Rule::neq
            | Rule::le
            | Rule::ge
            | Rule::lt
            | Rule::gt => "operator",
            Rule::EOI => "end of input",
            _ => "expression",
        };
        if !concepts.contains(&concept) {
            concepts.push(concept);
        }
    }

    match concepts.split_last() {
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} or {}", rest.join(", "), last),
        None => "something else".to_string(),
    }
}

/// Describe what sits in the source at `pos`
fn describe_found(source: &str, pos: usize) -> String {
    match source.get(pos..).and_then(|rest| rest.chars().next()) {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_to_diagnostic() {
        let error = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: "expression".to_string(),
                found: "')'".to_string(),
            },
            "test source".to_string(),
            Span(10..20),
        );

        let diagnostic = error.to_diagnostic();
        assert_eq!(diagnostic.severity, Severity::Error);
        assert!(diagnostic.message.contains("Expected expression"));
        assert!(diagnostic.message.contains("found ')'"));
        assert_eq!(diagnostic.code, Some("P001".to_string()));
    }

    #[test]
    fn test_format_expected_rules() {
        let rules = vec![Rule::integer, Rule::float];
        assert_eq!(format_expected_rules(&rules), "literal");

        let rules = vec![Rule::integer, Rule::identifier, Rule::EOI];
        assert_eq!(
            format_expected_rules(&rules),
            "literal, identifier or end of input"
        );
    }

    #[test]
    fn test_describe_found() {
        assert_eq!(describe_found("1 +", 3), "end of input");
        assert_eq!(describe_found("1 + )", 4), "')'");
    }

    #[test]
    fn test_display_includes_code_and_help() {
        let error = ParseError::new(
            ParseErrorKind::MalformedForLoop { found: 2 },
            "for (i = 0; i < 3) { i }".to_string(),
            Span(5..17),
        );
        let text = error.to_string();
        assert!(text.starts_with("error: A for loop header needs 3 statements"));
        assert!(text.contains("[P003]"));
        assert!(text.contains("help:"));
    }
}
