//! `no-var-in-else`: variables must be declared before the `if`

use crate::infra::decl::{DeclTerminator, typed_decl_at};
use crate::models::rule::NO_VAR_IN_ELSE;
use crate::services::lint::{Finding, LintDocument, LintRule};

pub struct NoVarInElse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElseState {
    Outside,
    /// Saw `else`, its `{` is next
    AwaitingBody,
    /// Inside a braced else body, at this brace depth relative to it
    Block(u32),
    /// Inside a braceless else, until the next `;`
    Statement,
}

impl ElseState {
    fn active(self) -> bool {
        matches!(self, Self::Block(_) | Self::Statement)
    }
}

/// Variable names start lowercase or with `_`
fn is_variable_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_lowercase() || c == '_')
}

impl LintRule for NoVarInElse {
    fn id(&self) -> &'static str {
        NO_VAR_IN_ELSE
    }

    fn check(&self, doc: &LintDocument<'_>) -> Vec<Finding> {
        let tokens = &doc.tokens;
        let mut findings = Vec::new();
        let mut state = ElseState::Outside;

        for (i, tok) in tokens.iter().enumerate() {
            if tok.is_ident("else") {
                let next = tokens.get(i + 1);
                if next.is_some_and(|t| t.is_ident("if")) {
                    state = ElseState::Outside;
                } else if !state.active() {
                    state = if next.is_some_and(|t| t.is_punct("{")) {
                        ElseState::AwaitingBody
                    } else {
                        ElseState::Statement
                    };
                }
                continue;
            }

            // Comments are already stripped and string tokens keep their
            // quotes, so these texts only ever match punctuation.
            match (state, tok.text) {
                (ElseState::AwaitingBody, "{") | (ElseState::Statement, "{") => {
                    state = ElseState::Block(1)
                }
                (ElseState::Block(depth), "{") => state = ElseState::Block(depth + 1),
                (ElseState::Block(depth), "}") => {
                    state = if depth <= 1 {
                        ElseState::Outside
                    } else {
                        ElseState::Block(depth - 1)
                    };
                }
                (ElseState::Statement, ";") => state = ElseState::Outside,
                _ => {}
            }

            if !state.active() {
                continue;
            }
            if let Some(decl) = typed_decl_at(tokens, i)
                && decl.terminator_kind != DeclTerminator::Paren
                && is_variable_name(decl.name_tok.text)
            {
                findings.push(Finding::new(
                    decl.type_tok.line,
                    decl.type_tok.column,
                    decl.head_len(),
                ));
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> Vec<Finding> {
        NoVarInElse.check(&LintDocument::new(text))
    }

    #[test]
    fn test_declaration_in_else_block() {
        let findings = check("if (x == true) { int a = 1; } else { int b = 2; }");
        assert_eq!(findings, vec![Finding::new(0, 37, 7)]);
    }

    #[test]
    fn test_return_in_else_is_fine() {
        assert!(check("if (x > 0) { int y = 5; } else { return false; }").is_empty());
    }

    #[test]
    fn test_nested_if_inside_else() {
        let text = "if (a) {\n} else {\n  if (cond) {\n    int z = 1;\n  }\n}\nint after = 2;";
        let findings = check(text);
        assert_eq!(findings, vec![Finding::new(3, 4, 7)]);
    }

    #[test]
    fn test_else_if_resets() {
        let text = "if (a) {\n} else if (b) {\n  int c = 1;\n}";
        assert!(check(text).is_empty());
    }

    #[test]
    fn test_else_block_across_lines() {
        let text = "if (a) {\n  x = 1;\n}\nelse\n{\n  Customer c;\n  string s = \"}\";\n}\nint ok = 1;";
        let findings = check(text);
        assert_eq!(findings.len(), 2);
        assert_eq!((findings[0].line, findings[0].column), (5, 2));
        assert_eq!((findings[1].line, findings[1].column), (6, 2));
    }

    #[test]
    fn test_braceless_else() {
        let findings = check("if (a) x = 1;\nelse int y = 2;\nint z = 3;");
        assert_eq!(findings, vec![Finding::new(1, 5, 7)]);
    }

    #[test]
    fn test_capitalized_name_is_not_a_variable() {
        assert!(check("if (a) { } else { Foo Bar = x; }").is_empty());
        let findings = check("if (a) { } else { Foo _bar = x; }");
        assert_eq!(findings, vec![Finding::new(0, 18, 10)]);
    }

    #[test]
    fn test_assignment_and_calls_are_fine() {
        assert!(check("if (a) { } else { total = 2; log(total); }").is_empty());
    }
}
