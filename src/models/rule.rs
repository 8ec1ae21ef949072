//! Lint rule configuration
//!
//! A [`RuleSet`] is built once at startup and never changes afterwards.
//! A rule id missing from the set means the rule is disabled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::diagnostic::DiagnosticSeverity;

pub const NO_VAR_IN_ELSE: &str = "no-var-in-else";
pub const DOT_NOTATION_LIMIT: &str = "dot-notation-limit";
pub const NAMING_CONVENTIONS: &str = "naming-conventions";
pub const FORBIDDEN_OPERATORS: &str = "forbidden-operators";

/// One configured lint rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    pub severity: DiagnosticSeverity,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub category: String,
}

impl Rule {
    pub fn new(id: &str, severity: DiagnosticSeverity, message: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            severity,
            message: message.to_string(),
            category: category.to_string(),
        }
    }
}

/// Active rules keyed by id
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RuleSet {
    rules: BTreeMap<String, Rule>,
}

/// Accepted artifact layouts: `{"rules": {...}}` or the bare id map
#[derive(Deserialize)]
#[serde(untagged)]
enum RulesArtifact {
    Wrapped { rules: BTreeMap<String, Rule> },
    Bare(BTreeMap<String, Rule>),
}

impl RuleSet {
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            rules: rules.into_iter().map(|r| (r.id.clone(), r)).collect(),
        }
    }

    /// Built-in rule set used when no usable artifact exists
    pub fn defaults() -> Self {
        Self::new([
            Rule::new(
                NO_VAR_IN_ELSE,
                DiagnosticSeverity::Error,
                "Variables cannot be declared in else blocks. Declare before if statement.",
                "variables",
            ),
            Rule::new(
                DOT_NOTATION_LIMIT,
                DiagnosticSeverity::Warning,
                "Dot notation can only be used once per statement",
                "style",
            ),
            Rule::new(
                NAMING_CONVENTIONS,
                DiagnosticSeverity::Warning,
                "Identifiers must follow Helium DSL naming conventions.",
                "style",
            ),
            Rule::new(
                FORBIDDEN_OPERATORS,
                DiagnosticSeverity::Warning,
                "Forbidden operator usage.",
                "style",
            ),
        ])
    }

    /// Parse a rules artifact. Returns `Ok(None)` when it holds no rules.
    pub fn from_json(content: &str) -> Result<Option<Self>, serde_json::Error> {
        let rules = match serde_json::from_str::<RulesArtifact>(content)? {
            RulesArtifact::Wrapped { rules } | RulesArtifact::Bare(rules) => rules,
        };
        if rules.is_empty() {
            return Ok(None);
        }
        let rules = rules
            .into_iter()
            .map(|(id, mut rule)| {
                // The map key is authoritative for the id
                rule.id = id.clone();
                (id, rule)
            })
            .collect();
        Ok(Some(Self { rules }))
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.get(id)
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    pub fn severity_of(&self, id: &str) -> Option<DiagnosticSeverity> {
        self.rules.get(id).map(|r| r.severity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Drop the given rule ids
    pub fn without(mut self, ids: &[String]) -> Self {
        for id in ids {
            self.rules.remove(id);
        }
        self
    }

    /// Replace severities for rules that exist in the set
    pub fn with_severities(mut self, overrides: &BTreeMap<String, DiagnosticSeverity>) -> Self {
        for (id, severity) in overrides {
            if let Some(rule) = self.rules.get_mut(id) {
                rule.severity = *severity;
            }
        }
        self
    }
}
