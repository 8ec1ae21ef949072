//! Response types for CLI output
//!
//! Lines and columns are 1-indexed in everything printed.

use serde::Serialize;

use crate::cli::OutputContext;
use crate::models::completion::{CompletionItem, CompletionItemKind};
use crate::models::diagnostic::Diagnostic;
use crate::models::lsp::Location;
use crate::models::symbol::{ObjectDefinition, Symbol};

/// Location in a file (relative path by default)
#[derive(Debug, Clone, Serialize)]
pub struct LocationOutput {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl LocationOutput {
    pub fn from_location(location: &Location, ctx: &OutputContext) -> Self {
        let (line, column) = location.range.start.to_display();
        Self {
            file: ctx.display_uri(&location.uri),
            line,
            column,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DiagnosticOutput {
    pub severity: String,
    pub message: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub source: String,
}

impl From<&Diagnostic> for DiagnosticOutput {
    fn from(d: &Diagnostic) -> Self {
        Self {
            severity: d.severity.to_string(),
            message: d.message.clone(),
            line: d.display_line(),
            column: d.display_column(),
            end_line: d.display_end_line(),
            end_column: d.display_end_column(),
            code: d.code.clone(),
            source: d.source.clone(),
        }
    }
}

/// Response for validate, and one entry per file in check
#[derive(Debug, Serialize)]
pub struct DiagnosticsResponse {
    pub file: String,
    pub count: usize,
    pub diagnostics: Vec<DiagnosticOutput>,
}

impl DiagnosticsResponse {
    pub fn new(file: String, diagnostics: &[Diagnostic]) -> Self {
        Self {
            file,
            count: diagnostics.len(),
            diagnostics: diagnostics.iter().map(DiagnosticOutput::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SymbolOutput {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl From<&Symbol> for SymbolOutput {
    fn from(symbol: &Symbol) -> Self {
        let display = symbol.location.map(|p| p.to_display());
        Self {
            name: symbol.name.clone(),
            kind: symbol.kind.to_string(),
            line: display.map(|(line, _)| line),
            column: display.map(|(_, column)| column),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SymbolsResponse {
    pub file: String,
    pub count: usize,
    pub symbols: Vec<SymbolOutput>,
}

#[derive(Debug, Serialize)]
pub struct CompletionOutput {
    pub label: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

fn kind_name(kind: CompletionItemKind) -> &'static str {
    match kind {
        CompletionItemKind::Function => "function",
        CompletionItemKind::Variable => "variable",
        CompletionItemKind::Class => "class",
        CompletionItemKind::Module => "module",
        CompletionItemKind::Field => "field",
        CompletionItemKind::Enum => "enum",
        CompletionItemKind::Keyword => "keyword",
    }
}

impl From<&CompletionItem> for CompletionOutput {
    fn from(item: &CompletionItem) -> Self {
        Self {
            label: item.label.clone(),
            kind: kind_name(item.kind),
            detail: item.detail.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub file: String,
    pub count: usize,
    pub items: Vec<CompletionOutput>,
}

#[derive(Debug, Serialize)]
pub struct DefinitionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<LocationOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ObjectOutput {
    pub name: String,
    pub persistent: bool,
    pub location: LocationOutput,
}

impl ObjectOutput {
    pub fn new(definition: &ObjectDefinition, ctx: &OutputContext) -> Self {
        Self {
            name: definition.name.clone(),
            persistent: definition.is_persistent,
            location: LocationOutput::from_location(&definition.location(), ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diagnostic::{DiagnosticSeverity, LINTER_SOURCE};
    use crate::models::lsp::Range;
    use crate::models::symbol::SymbolKind;
    use std::path::PathBuf;

    #[test]
    fn test_diagnostic_output_is_one_based() {
        let d = Diagnostic::new(
            Range::on_line(2, 4, 3),
            DiagnosticSeverity::Warning,
            "Forbidden operator usage.",
            LINTER_SOURCE,
        )
        .with_code("forbidden-operators");
        let out = DiagnosticOutput::from(&d);
        assert_eq!((out.line, out.column, out.end_column), (3, 5, 8));
        assert_eq!(out.severity, "warning");
        assert_eq!(out.code.as_deref(), Some("forbidden-operators"));
    }

    #[test]
    fn test_location_output_relative() {
        let ctx = OutputContext::new(PathBuf::from("/project"));
        let location = Location::new("file:///project/model/Car.mez", Range::on_line(0, 7, 3));
        let out = LocationOutput::from_location(&location, &ctx);
        assert_eq!(out.file, "model/Car.mez");
        assert_eq!((out.line, out.column), (1, 8));
    }

    #[test]
    fn test_symbol_without_location() {
        let out = SymbolOutput::from(&Symbol::new("Car", SymbolKind::Object));
        assert!(out.line.is_none());
        let json = serde_json::to_value(&out).unwrap();
        assert!(json.get("line").is_none());
        assert_eq!(json["kind"], "object");
    }
}
