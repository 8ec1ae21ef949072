//! Diagnostic model

use serde::{Deserialize, Serialize};

use super::lsp::Range;

/// Source tag for diagnostics produced by the syntax adapter
pub const PARSER_SOURCE: &str = "helium-dsl-parser";

/// Source tag for diagnostics produced by the rule engine
pub const LINTER_SOURCE: &str = "helium-dsl-linter";

/// A single finding reported back to the editor
///
/// Produced fresh on every validation pass; a new set for a URI always
/// replaces the previous one in full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn new(
        range: Range,
        severity: DiagnosticSeverity,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            range,
            severity,
            message: message.into(),
            source: source.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn display_line(&self) -> u32 {
        self.range.start.line + 1
    }

    pub fn display_column(&self) -> u32 {
        self.range.start.character + 1
    }

    pub fn display_end_line(&self) -> u32 {
        self.range.end.line + 1
    }

    pub fn display_end_column(&self) -> u32 {
        self.range.end.character + 1
    }
}

/// Severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error = 1,
    Warning = 2,
    #[serde(alias = "information")]
    Info = 3,
}

impl std::fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

impl std::str::FromStr for DiagnosticSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" | "e" => Ok(Self::Error),
            "warning" | "warn" | "w" => Ok(Self::Warning),
            "info" | "information" | "i" => Ok(Self::Info),
            _ => Err(format!(
                "Unknown severity: '{}'. Valid: error, warning, info",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lsp::Range;

    #[test]
    fn test_severity_parse() {
        assert_eq!("warn".parse::<DiagnosticSeverity>(), Ok(DiagnosticSeverity::Warning));
        assert_eq!("INFO".parse::<DiagnosticSeverity>(), Ok(DiagnosticSeverity::Info));
        assert!("hint".parse::<DiagnosticSeverity>().is_err());
    }

    #[test]
    fn test_severity_serde() {
        let json = serde_json::to_string(&DiagnosticSeverity::Info).unwrap();
        assert_eq!(json, "\"info\"");
        let parsed: DiagnosticSeverity = serde_json::from_str("\"information\"").unwrap();
        assert_eq!(parsed, DiagnosticSeverity::Info);
    }

    #[test]
    fn test_display_positions_are_one_based() {
        let diag = Diagnostic::new(
            Range::on_line(4, 2, 3),
            DiagnosticSeverity::Warning,
            "msg",
            LINTER_SOURCE,
        )
        .with_code("dot-notation-limit");
        assert_eq!(diag.display_line(), 5);
        assert_eq!(diag.display_column(), 3);
        assert_eq!(diag.display_end_column(), 6);
        assert_eq!(diag.code.as_deref(), Some("dot-notation-limit"));
    }
}
