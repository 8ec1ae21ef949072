//! Built-in delimiter balance parser
//!
//! A lightweight stand-in for the generated grammar. It reports unbalanced
//! `()`, `[]` and `{}` and unterminated literals using the same message
//! forms the generated parser produces, so the adapter and classifier treat
//! both alike.

use super::{ParseReport, SyntaxErrorEvent, SyntaxParser};
use crate::error::ParserError;
use crate::infra::lexer::{Token, TokenKind, tokenize};

pub struct DelimiterParser;

fn closer_for(open: &str) -> Option<&'static str> {
    match open {
        "(" => Some(")"),
        "[" => Some("]"),
        "{" => Some("}"),
        _ => None,
    }
}

fn is_closer(text: &str) -> bool {
    matches!(text, ")" | "]" | "}")
}

fn event(tok: &Token<'_>, message: String) -> SyntaxErrorEvent {
    SyntaxErrorEvent {
        line: tok.line + 1,
        column: tok.column,
        message,
    }
}

/// First few characters of an unterminated literal, for the message
fn literal_head(text: &str) -> String {
    text.lines().next().unwrap_or("").chars().take(20).collect()
}

impl SyntaxParser for DelimiterParser {
    fn name(&self) -> &str {
        "delimiters"
    }

    fn parse(&self, text: &str) -> Result<ParseReport, ParserError> {
        let mut errors = Vec::new();
        let mut open: Vec<Token<'_>> = Vec::new();

        for tok in tokenize(text) {
            match tok.kind {
                TokenKind::Str | TokenKind::BlockLiteral | TokenKind::Comment if !tok.terminated => {
                    errors.push(event(
                        &tok,
                        format!("token recognition error at: '{}'", literal_head(tok.text)),
                    ));
                }
                TokenKind::Punct if closer_for(tok.text).is_some() => open.push(tok),
                TokenKind::Punct if is_closer(tok.text) => {
                    let matching = open
                        .iter()
                        .rposition(|o| closer_for(o.text) == Some(tok.text));
                    match matching {
                        Some(index) if index + 1 == open.len() => {
                            open.pop();
                        }
                        Some(index) => {
                            let expected = open
                                .last()
                                .and_then(|o| closer_for(o.text))
                                .unwrap_or(tok.text);
                            errors.push(event(
                                &tok,
                                format!("mismatched input '{}' expecting '{}'", tok.text, expected),
                            ));
                            open.truncate(index);
                        }
                        None => {
                            let expecting = open
                                .last()
                                .and_then(|o| closer_for(o.text))
                                .map_or_else(|| "<EOF>".to_string(), |c| format!("'{}'", c));
                            errors.push(event(
                                &tok,
                                format!("extraneous input '{}' expecting {}", tok.text, expecting),
                            ));
                        }
                    }
                }
                _ => {}
            }
        }

        for unclosed in open.iter().rev() {
            let closer = closer_for(unclosed.text).unwrap_or("?");
            errors.push(event(unclosed, format!("missing '{}' at '<EOF>'", closer)));
        }

        errors.sort_by_key(|e| (e.line, e.column));
        Ok(ParseReport {
            errors,
            abort: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(text: &str) -> Vec<(u32, u32, String)> {
        DelimiterParser
            .parse(text)
            .unwrap()
            .errors
            .into_iter()
            .map(|e| (e.line, e.column, e.message))
            .collect()
    }

    #[test]
    fn test_balanced() {
        assert!(messages("unit A;\nif (a[0] == 1) {\n  f(\"(\");\n}\n").is_empty());
    }

    #[test]
    fn test_missing_closer() {
        assert_eq!(
            messages("if (a) {\n  x = 1;\n"),
            vec![(1, 7, "missing '}' at '<EOF>'".to_string())]
        );
    }

    #[test]
    fn test_extraneous_closer() {
        assert_eq!(
            messages("x = 1);"),
            vec![(1, 5, "extraneous input ')' expecting <EOF>".to_string())]
        );
    }

    #[test]
    fn test_mismatched_closer() {
        assert_eq!(
            messages("f(a, {b)"),
            vec![(1, 7, "mismatched input ')' expecting '}'".to_string())]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let errors = messages("s = \"open;\n");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, 1);
        assert_eq!(errors[0].1, 4);
        assert!(errors[0].2.starts_with("token recognition error at: '\"open"));
    }
}
