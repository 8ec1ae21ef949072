//! `dot-notation-limit`: one member access per statement

use crate::infra::lexer::{Token, TokenKind, line_spans};
use crate::infra::scanner;
use crate::models::rule::DOT_NOTATION_LIMIT;
use crate::services::lint::{Finding, LintDocument, LintRule};

pub struct DotNotationLimit;

/// Chains with at least this many segments are reported
const MIN_SEGMENTS: usize = 3;

fn adjacent(a: &Token<'_>, b: &Token<'_>) -> bool {
    a.end_line == b.line && a.end_column == b.column
}

/// Index one past the end of the `a.b.c` chain starting at `start`
fn chain_end(tokens: &[Token<'_>], start: usize, limit: usize) -> usize {
    let mut end = start + 1;
    while end + 1 < limit
        && tokens[end].is_punct(".")
        && tokens[end + 1].kind == TokenKind::Ident
        && adjacent(&tokens[end - 1], &tokens[end])
        && adjacent(&tokens[end], &tokens[end + 1])
    {
        end += 2;
    }
    end
}

/// Assignment, comparison, call or end of statement
fn ends_statement_part(tok: Option<&Token<'_>>) -> bool {
    tok.is_some_and(|t| ["=", "==", "(", ";"].iter().any(|p| t.is_punct(p)))
}

impl LintRule for DotNotationLimit {
    fn id(&self) -> &'static str {
        DOT_NOTATION_LIMIT
    }

    fn check(&self, doc: &LintDocument<'_>) -> Vec<Finding> {
        let tokens = &doc.tokens;
        let mut findings = Vec::new();

        for (line, start, end) in line_spans(tokens) {
            let text = doc.lines.get(line as usize).copied().unwrap_or("");
            if scanner::is_comment_line(text)
                || scanner::has_block_markers(text)
                || scanner::has_regex_like_delimiters(text)
            {
                continue;
            }

            let mut i = start;
            while i < end {
                let tok = &tokens[i];
                let continues_chain = i > start && tokens[i - 1].is_punct(".");
                if tok.kind != TokenKind::Ident || continues_chain {
                    i += 1;
                    continue;
                }

                let chain = chain_end(tokens, i, end);
                let segments = (chain - i).div_ceil(2);
                if segments >= MIN_SEGMENTS && chain < end && ends_statement_part(tokens.get(chain)) {
                    let last = &tokens[chain - 1];
                    findings.push(Finding::new(line, tok.column, last.end_column - tok.column));
                    break;
                }
                i = chain;
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(text: &str) -> Vec<Finding> {
        DotNotationLimit.check(&LintDocument::new(text))
    }

    #[test]
    fn test_chain_before_call() {
        let findings = check("  order.customer.address(x);");
        assert_eq!(findings, vec![Finding::new(0, 2, 22)]);
    }

    #[test]
    fn test_full_chain_is_reported() {
        let findings = check("a.b.c.d = 1;");
        assert_eq!(findings, vec![Finding::new(0, 0, 7)]);
    }

    #[test]
    fn test_two_segments_allowed() {
        assert!(check("customer.name = x;\nname = customer.name;").is_empty());
    }

    #[test]
    fn test_chain_before_comparison() {
        let findings = check("if (rental.dvd_title.available_copies == 0) {\n}");
        assert_eq!(findings, vec![Finding::new(0, 4, 33)]);
        assert!(check("if (a.b.c > 1) {").is_empty());
    }

    #[test]
    fn test_one_finding_per_line() {
        let findings = check("a.b.c(); x.y.z();");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].column, 0);
    }

    #[test]
    fn test_skipped_lines() {
        let text = "// a.b.c();\nq = /% select t.a.b; %/;\np = \"/x/\" + a.b.c;\ns = \"a.b.c;\";";
        assert!(check(text).is_empty());
    }

    #[test]
    fn test_spaced_dots_do_not_chain() {
        assert!(check("a . b . c;").is_empty());
    }
}
