//! Rule engine
//!
//! Each rule inspects a [`LintDocument`] and returns [`Finding`]s. The engine
//! runs only the rules present in the configured [`RuleSet`] and turns
//! findings into diagnostics with the configured severity.

pub mod rules;

use tracing::debug;

use crate::infra::lexer::{self, Token};
use crate::infra::scanner;
use crate::models::diagnostic::{Diagnostic, LINTER_SOURCE};
use crate::models::lsp::Range;
use crate::models::rule::RuleSet;

/// A rule hit before severity and source are attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line: u32,
    pub column: u32,
    pub length: u32,
    /// Overrides the configured rule message
    pub message: Option<String>,
}

impl Finding {
    pub fn new(line: u32, column: u32, length: u32) -> Self {
        Self {
            line,
            column,
            length,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Text of one document prepared for the rules
pub struct LintDocument<'a> {
    pub text: &'a str,
    pub lines: Vec<&'a str>,
    /// Tokens without comments
    pub tokens: Vec<Token<'a>>,
}

impl<'a> LintDocument<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: scanner::lines(text),
            tokens: lexer::significant(text),
        }
    }
}

pub trait LintRule: Send + Sync {
    fn id(&self) -> &'static str;
    fn check(&self, doc: &LintDocument<'_>) -> Vec<Finding>;
}

pub struct LintEngine {
    rules: RuleSet,
    registry: Vec<Box<dyn LintRule>>,
}

impl LintEngine {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            registry: rules::builtin(),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Ids of the rules that will run
    pub fn active_rule_ids(&self) -> Vec<&'static str> {
        self.registry
            .iter()
            .map(|rule| rule.id())
            .filter(|id| self.rules.is_enabled(id))
            .collect()
    }

    pub fn run(&self, text: &str) -> Vec<Diagnostic> {
        let doc = LintDocument::new(text);
        let mut diagnostics = Vec::new();

        for rule in &self.registry {
            if !self.rules.is_enabled(rule.id()) {
                continue;
            }
            let findings = rule.check(&doc);
            debug!("{}: {} findings", rule.id(), findings.len());
            diagnostics.extend(
                findings
                    .into_iter()
                    .filter_map(|finding| self.to_diagnostic(rule.id(), finding)),
            );
        }

        diagnostics
    }

    /// Shared finding-to-diagnostic constructor
    fn to_diagnostic(&self, rule_id: &str, finding: Finding) -> Option<Diagnostic> {
        let rule = self.rules.get(rule_id)?;
        let message = finding
            .message
            .filter(|m| !m.is_empty())
            .or_else(|| (!rule.message.is_empty()).then(|| rule.message.clone()))
            .unwrap_or_else(|| rule_id.to_string());

        Some(
            Diagnostic::new(
                Range::on_line(finding.line, finding.column, finding.length),
                rule.severity,
                message,
                LINTER_SOURCE,
            )
            .with_code(rule_id),
        )
    }
}
