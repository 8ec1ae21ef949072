//! `naming-conventions`: casing of declared names
//!
//! Units are PascalCase, enums UPPERCASE, object attributes snake_case and
//! all other variables camelCase. Each line is judged by the first shape it
//! contains, in that order of precedence.

use crate::infra::decl::{DeclTerminator, keyword_decl_at, object_body_flags, typed_decl_at};
use crate::infra::lexer::{Token, line_spans};
use crate::models::rule::NAMING_CONVENTIONS;
use crate::services::lint::{Finding, LintDocument, LintRule};

pub struct NamingConventions;

pub const VARIABLE_MESSAGE: &str = "Variables should be camelCase.";
pub const UNIT_MESSAGE: &str = "Units should be PascalCase.";
pub const ENUM_MESSAGE: &str = "Enums should be UPPERCASE.";
pub const ATTRIBUTE_MESSAGE: &str = "Attributes should be snake_case.";

fn is_pascal_case(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_upper_case(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

fn is_snake_case(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Lowercase first letter; underscores are tolerated after it
fn is_camel_case(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn name_finding(name: &Token<'_>, message: &str) -> Finding {
    Finding::new(name.line, name.column, name.len()).with_message(message)
}

impl LintRule for NamingConventions {
    fn id(&self) -> &'static str {
        NAMING_CONVENTIONS
    }

    fn check(&self, doc: &LintDocument<'_>) -> Vec<Finding> {
        let tokens = &doc.tokens;
        let in_object_body = object_body_flags(tokens);
        let mut findings = Vec::new();

        for (_, start, end) in line_spans(tokens) {
            let find_keyword = |keyword: &str| {
                (start..end).find_map(|i| keyword_decl_at(tokens, i, keyword))
            };

            if let Some(name) = find_keyword("unit") {
                if !is_pascal_case(name.text) {
                    findings.push(name_finding(&name, UNIT_MESSAGE));
                }
                continue;
            }

            if let Some(name) = find_keyword("enum") {
                if !is_upper_case(name.text) {
                    findings.push(name_finding(&name, ENUM_MESSAGE));
                }
                continue;
            }

            let decl = (start..end).find_map(|i| {
                typed_decl_at(tokens, i)
                    .filter(|d| d.terminator_kind != DeclTerminator::Paren)
                    .map(|d| (i, d))
            });
            if let Some((i, decl)) = decl {
                let name = decl.name_tok;
                if in_object_body[i] {
                    if !is_snake_case(name.text) {
                        findings.push(name_finding(&name, ATTRIBUTE_MESSAGE));
                    }
                } else if !is_camel_case(name.text) {
                    findings.push(name_finding(&name, VARIABLE_MESSAGE));
                }
            }
        }

        findings
    }
}
