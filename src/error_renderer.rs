//! Error rendering using ariadne
//!
//! Parse errors are rendered with a snippet of the offending source.
//! Evaluation errors carry no location and render as a single line.

use crate::{Diagnostic, Error, Severity};
use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use std::io::Write;

/// Render an error with formatting to stderr
///
/// # Example
/// ```no_run
/// use paxl::{Interpreter, render_error};
///
/// let mut interpreter = Interpreter::new();
/// if let Err(e) = interpreter.run("1 + + 2") {
///     render_error(&e);
/// }
/// ```
pub fn render_error(error: &Error) {
    render_error_to_writer(error, &mut std::io::stderr(), true).ok();
}

/// Render an error to a specific writer
pub fn render_error_to(error: &Error, writer: &mut dyn Write) -> std::io::Result<()> {
    render_error_to_writer(error, writer, true)
}

/// Render an error to a String (useful for logs and batch output)
pub fn render_error_to_string(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render an error to a String without color codes (useful for tests)
pub fn render_error_to_string_no_color(error: &Error) -> String {
    let mut buf = Vec::new();
    render_error_to_writer(error, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_error_to_writer(
    error: &Error,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    match error {
        Error::Parse(err) => render_diagnostic(&err.src, &err.to_diagnostic(), writer, use_color),
        Error::Eval(err) => writeln!(writer, "Error[{}]: {}", err.code(), err),
    }
}

fn render_diagnostic(
    source: &str,
    diag: &Diagnostic,
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    let mut colors = ColorGenerator::new();
    colors.next(); // Skip the first color.

    let kind = match diag.severity {
        Severity::Error => ReportKind::Error,
        Severity::Warning => ReportKind::Warning,
    };

    let mut report = Report::build(kind, ("<input>", diag.span.0.clone()))
        .with_message(&diag.message)
        .with_config(ariadne::Config::default().with_color(use_color));

    if let Some(code) = &diag.code {
        report = report.with_code(code);
    }

    report = report.with_label(
        Label::new(("<input>", diag.span.0.clone()))
            .with_message(&diag.message)
            .with_color(colors.next()),
    );

    if let Some(help) = &diag.help {
        report = report.with_help(help);
    }

    report
        .finish()
        .write(("<input>", Source::from(source)), &mut *writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interpreter;

    #[test]
    fn test_render_parse_error() {
        let source = "1 + + 2";
        let err = Interpreter::new().run(source).unwrap_err();
        let output = render_error_to_string_no_color(&err);

        assert!(output.contains("Error"));
        assert!(output.contains("P001"));
        assert!(output.contains("1 + + 2"));
    }

    #[test]
    fn test_render_malformed_for_loop_includes_help() {
        let err = Interpreter::new()
            .run("for (i = 0; i < 3) { i }")
            .unwrap_err();
        let output = render_error_to_string_no_color(&err);

        assert!(output.contains("P003"));
        assert!(output.contains("Help"));
    }

    #[test]
    fn test_render_eval_error_is_one_line() {
        let err = Interpreter::new().run("1 / 0").unwrap_err();
        let output = render_error_to_string_no_color(&err);

        assert_eq!(output, "Error[E001]: Division by zero\n");
    }

    #[test]
    fn test_render_to_string_is_multiline_for_parse_errors() {
        let err = Interpreter::new().run("a = { 1").unwrap_err();
        let output = render_error_to_string_no_color(&err);

        assert!(!output.is_empty());
        assert!(output.lines().count() > 1);
    }
}
