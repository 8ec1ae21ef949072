//! Syntax diagnostic adapter
//!
//! Runs a [`SyntaxParser`] over a document and converts its error events to
//! diagnostics, dropping the ones the classifier knows to be false
//! positives. A missing parser yields a single informational diagnostic
//! instead of an error.

pub mod classifier;
pub mod delimiters;

use tracing::debug;

use crate::error::ParserError;
use crate::infra::scanner;
use crate::models::config::ParserBackend;
use crate::models::diagnostic::{Diagnostic, DiagnosticSeverity, PARSER_SOURCE};
use crate::models::lsp::{Position, Range};

pub use classifier::{SuppressReason, Verdict, classify};
pub use delimiters::DelimiterParser;

/// One parser-reported syntax error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorEvent {
    /// 1-indexed
    pub line: u32,
    /// 0-indexed
    pub column: u32,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub errors: Vec<SyntaxErrorEvent>,
    /// Set when the parse stopped early on an internal failure
    pub abort: Option<String>,
}

pub trait SyntaxParser: Send + Sync {
    fn name(&self) -> &str;
    fn parse(&self, text: &str) -> Result<ParseReport, ParserError>;
}

/// Placeholder for a grammar that has not been generated
pub struct UnavailableParser;

impl SyntaxParser for UnavailableParser {
    fn name(&self) -> &str {
        "none"
    }

    fn parse(&self, _text: &str) -> Result<ParseReport, ParserError> {
        Err(ParserError::Unavailable {
            hint: "Set [parser] backend in .helium/config.toml.".to_string(),
        })
    }
}

pub fn parser_for(backend: ParserBackend) -> Box<dyn SyntaxParser> {
    match backend {
        ParserBackend::None => Box::new(UnavailableParser),
        ParserBackend::Delimiters => Box::new(DelimiterParser),
    }
}

pub struct SyntaxDiagnosticAdapter {
    parser: Box<dyn SyntaxParser>,
}

impl SyntaxDiagnosticAdapter {
    pub fn new(parser: Box<dyn SyntaxParser>) -> Self {
        Self { parser }
    }

    pub fn parser_name(&self) -> &str {
        self.parser.name()
    }

    pub fn check(&self, text: &str) -> Vec<Diagnostic> {
        let report = match self.parser.parse(text) {
            Ok(report) => report,
            Err(err) => {
                return vec![Diagnostic::new(
                    Range::on_line(0, 0, 1),
                    DiagnosticSeverity::Info,
                    err.to_string(),
                    PARSER_SOURCE,
                )];
            }
        };

        let lines = scanner::lines(text);
        let mut diagnostics = Vec::new();

        for event in report.errors {
            let line = event.line.saturating_sub(1);
            let line_text = lines.get(line as usize).copied().unwrap_or("");
            match classify(&event.message, line_text, event.column as usize) {
                Verdict::Genuine => diagnostics.push(Diagnostic::new(
                    Range::on_line(line, event.column, 1),
                    DiagnosticSeverity::Warning,
                    event.message,
                    PARSER_SOURCE,
                )),
                Verdict::Suppressed(reason) => {
                    debug!(
                        "Suppressed {}:{} {:?}: {}",
                        event.line, event.column, reason, event.message
                    );
                }
            }
        }

        if let Some(message) = report.abort {
            if classify(&message, "", 0).is_genuine() {
                diagnostics.push(Diagnostic::new(
                    Range::point(Position::new(0, 0)),
                    DiagnosticSeverity::Warning,
                    message,
                    PARSER_SOURCE,
                ));
            } else {
                debug!("Suppressed parser abort: {}", message);
            }
        }

        diagnostics
    }
}
