//! `forbidden-operators`: compound assignment, ternaries and `!x`
//!
//! Line-oriented. Compound assignments are reported wherever they appear;
//! ternaries and negations only outside string and block literals.

use crate::infra::scanner;
use crate::models::rule::FORBIDDEN_OPERATORS;
use crate::services::lint::{Finding, LintDocument, LintRule};

pub struct ForbiddenOperators;

pub const COMPOUND_MESSAGE: &str = "Compound assignment is not allowed. Use explicit assignment.";
pub const TERNARY_MESSAGE: &str = "Ternary operator is not allowed. Use if/else.";
pub const NEGATION_MESSAGE: &str = "Use '== false' instead of '!var'.";

const COMPOUND_OPERATORS: &[char] = &['+', '-', '*', '/', '%'];

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn compound_assignments(chars: &[char], line: u32, out: &mut Vec<Finding>) {
    let mut i = 0;
    while i + 1 < chars.len() {
        if COMPOUND_OPERATORS.contains(&chars[i]) && chars[i + 1] == '=' {
            out.push(Finding::new(line, i as u32, 2).with_message(COMPOUND_MESSAGE));
            i += 2;
        } else {
            i += 1;
        }
    }
}

/// `word ? ... :` where the word starts with a letter or underscore
fn ternaries(text: &str, chars: &[char], line: u32, out: &mut Vec<Finding>) {
    let mut resume = 0;
    for q in 0..chars.len() {
        if chars[q] != '?' || q < resume {
            continue;
        }

        let mut word_end = q;
        while word_end > resume && chars[word_end - 1].is_whitespace() {
            word_end -= 1;
        }
        let mut word_start = word_end;
        while word_start > resume && is_word_char(chars[word_start - 1]) {
            word_start -= 1;
        }
        if word_start == word_end || !is_word_start(chars[word_start]) {
            continue;
        }

        let Some(colon) = chars[q + 1..].iter().position(|&c| c == ':').map(|p| q + 1 + p)
        else {
            continue;
        };
        if scanner::in_literal(text, word_start) {
            continue;
        }

        out.push(
            Finding::new(line, word_start as u32, (colon + 1 - word_start) as u32)
                .with_message(TERNARY_MESSAGE),
        );
        resume = colon + 1;
    }
}

/// `!word`, optionally with whitespace after the bang
fn negations(text: &str, chars: &[char], line: u32, out: &mut Vec<Finding>) {
    for bang in 0..chars.len() {
        if chars[bang] != '!' {
            continue;
        }
        let mut start = bang + 1;
        while start < chars.len() && chars[start].is_whitespace() {
            start += 1;
        }
        if start >= chars.len() || !is_word_start(chars[start]) {
            continue;
        }
        let mut end = start;
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }
        if scanner::in_literal(text, bang) {
            continue;
        }
        out.push(
            Finding::new(line, bang as u32, (end - bang) as u32).with_message(NEGATION_MESSAGE),
        );
    }
}

impl LintRule for ForbiddenOperators {
    fn id(&self) -> &'static str {
        FORBIDDEN_OPERATORS
    }

    fn check(&self, doc: &LintDocument<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        for (index, text) in doc.lines.iter().enumerate() {
            if scanner::is_comment_line(text) || scanner::has_block_markers(text) {
                continue;
            }
            let line = index as u32;
            let chars: Vec<char> = text.chars().collect();

            compound_assignments(&chars, line, &mut findings);
            ternaries(text, &chars, line, &mut findings);
            negations(text, &chars, line, &mut findings);
        }

        findings
    }
}
