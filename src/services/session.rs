//! Editor session
//!
//! Owns every stateful piece of the pipeline. Document events go through
//! here: open and change validate the buffer and reindex it, save rescans
//! the file from disk, delete drops its index entries.

use std::path::PathBuf;

use tracing::debug;

use crate::models::completion::{BifCatalog, CompletionItem};
use crate::models::diagnostic::Diagnostic;
use crate::models::lsp::{Location, Position};
use crate::models::rule::RuleSet;
use crate::models::symbol::Symbol;
use crate::services::completion::CompletionAssembler;
use crate::services::lint::LintEngine;
use crate::services::navigation;
use crate::services::symbols::build_symbol_table;
use crate::services::syntax::{SyntaxDiagnosticAdapter, SyntaxParser};
use crate::services::workspace::{IndexReport, IndexSettings, ScanOutcome, WorkspaceIndex};

pub struct Session {
    lint: LintEngine,
    syntax: SyntaxDiagnosticAdapter,
    completion: CompletionAssembler,
    index: WorkspaceIndex,
}

impl Session {
    pub fn new(
        rules: RuleSet,
        catalog: &BifCatalog,
        parser: Box<dyn SyntaxParser>,
        settings: IndexSettings,
    ) -> Self {
        Self {
            lint: LintEngine::new(rules),
            syntax: SyntaxDiagnosticAdapter::new(parser),
            completion: CompletionAssembler::new(catalog),
            index: WorkspaceIndex::new(settings),
        }
    }

    pub fn initialize(&mut self, roots: &[PathBuf]) -> IndexReport {
        self.index.initialize(roots)
    }

    /// Syntax diagnostics followed by lint diagnostics
    pub fn validate(&self, uri: &str, text: &str) -> Vec<Diagnostic> {
        let mut diagnostics = self.syntax.check(text);
        let syntax_count = diagnostics.len();
        diagnostics.extend(self.lint.run(text));
        debug!(
            "Validated {}: {} syntax, {} lint",
            uri,
            syntax_count,
            diagnostics.len() - syntax_count
        );
        diagnostics
    }

    pub fn did_open(&mut self, uri: &str, text: &str) -> Vec<Diagnostic> {
        self.did_change(uri, text)
    }

    pub fn did_change(&mut self, uri: &str, text: &str) -> Vec<Diagnostic> {
        let diagnostics = self.validate(uri, text);
        self.index.update_text(uri, text);
        diagnostics
    }

    pub fn did_save(&mut self, uri: &str) -> ScanOutcome {
        self.index.update_file(uri)
    }

    pub fn did_delete(&mut self, uri: &str) -> usize {
        self.index.remove_file(uri)
    }

    pub fn symbols(&self, text: &str) -> Vec<Symbol> {
        build_symbol_table(text)
    }

    pub fn complete(&self, text: &str) -> Vec<CompletionItem> {
        self.completion.complete(&build_symbol_table(text))
    }

    pub fn resolve_definition(&self, text: &str, position: Position) -> Option<Location> {
        navigation::resolve_definition(&self.index, text, position)
    }

    pub fn resolve_type_definition(&self, text: &str, position: Position) -> Option<Location> {
        navigation::resolve_type_definition(&self.index, text, position)
    }

    pub fn index(&self) -> &WorkspaceIndex {
        &self.index
    }

    pub fn rules(&self) -> &RuleSet {
        self.lint.rules()
    }

    pub fn active_rule_ids(&self) -> Vec<&'static str> {
        self.lint.active_rule_ids()
    }

    pub fn parser_name(&self) -> &str {
        self.syntax.parser_name()
    }

    pub fn builtin_count(&self) -> usize {
        self.completion.builtin_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::uri::path_to_uri;
    use crate::models::completion::CompletionItemKind;
    use crate::models::config::ParserBackend;
    use crate::models::diagnostic::{DiagnosticSeverity, LINTER_SOURCE, PARSER_SOURCE};
    use crate::services::syntax::parser_for;
    use tempfile::TempDir;

    fn session(backend: ParserBackend) -> Session {
        Session::new(
            RuleSet::defaults(),
            &BifCatalog::default(),
            parser_for(backend),
            IndexSettings::default(),
        )
    }

    #[test]
    fn test_validate_orders_syntax_before_lint() {
        let session = session(ParserBackend::None);
        let diagnostics = session.validate("file:///w/a.mez", "int x = 0;\nx += 1;");

        assert!(diagnostics.len() >= 2);
        assert_eq!(diagnostics[0].source, PARSER_SOURCE);
        assert!(diagnostics[1..].iter().all(|d| d.source == LINTER_SOURCE));
        assert!(
            diagnostics
                .iter()
                .any(|d| d.code.as_deref() == Some("forbidden-operators"))
        );
    }

    #[test]
    fn test_empty_document_gets_only_parser_notice() {
        let session = session(ParserBackend::None);
        let diagnostics = session.validate("file:///w/a.mez", "");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Info);
        assert_eq!(diagnostics[0].source, PARSER_SOURCE);
        assert!(diagnostics.iter().all(|d| d.source != LINTER_SOURCE));
    }

    #[test]
    fn test_change_reindexes_buffer() {
        let mut session = session(ParserBackend::Delimiters);
        let uri = "file:///w/model/Fleet.mez";

        let diagnostics = session.did_open(uri, "persistent object Fleet {\n}");
        assert!(diagnostics.is_empty());
        assert!(session.index().lookup("Fleet").is_some());

        session.did_change(uri, "persistent object Garage {\n}");
        assert!(session.index().lookup("Fleet").is_none());
        assert!(session.index().lookup("Garage").is_some());

        assert_eq!(session.did_delete(uri), 1);
        assert!(session.index().is_empty());
    }

    #[test]
    fn test_save_rescans_from_disk() {
        let dir = TempDir::new().unwrap();
        let model = dir.path().join("model");
        std::fs::create_dir(&model).unwrap();
        let file = model.join("Car.mez");
        std::fs::write(&file, "object Car {\n}").unwrap();

        let mut session = session(ParserBackend::None);
        let report = session.initialize(&[dir.path().to_path_buf()]);
        assert_eq!(report.indexed_files(), 1);

        std::fs::write(&file, "persistent object Truck {\n}").unwrap();
        let uri = path_to_uri(&file).unwrap();
        assert!(session.did_save(&uri).is_indexed());
        assert!(session.index().lookup("Car").is_none());
        assert!(session.index().lookup("Truck").unwrap().is_persistent);
    }

    #[test]
    fn test_completion_and_navigation() {
        let mut session = session(ParserBackend::None);
        session.did_open("file:///w/model/Car.mez", "object Car {\n}");

        let text = "Car myCar = new Car();\nmyCar.start();";
        let items = session.complete(text);
        assert!(
            items
                .iter()
                .any(|i| i.label == "myCar" && i.kind == CompletionItemKind::Variable)
        );

        let location = session.resolve_definition(text, Position::new(0, 1)).unwrap();
        assert_eq!(location.uri, "file:///w/model/Car.mez");
        assert!(
            session
                .resolve_type_definition(text, Position::new(1, 2))
                .is_some()
        );
    }
}
