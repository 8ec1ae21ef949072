//! Known false positives of the generated grammar
//!
//! The grammar rejects a handful of valid constructs, mostly around
//! built-in method calls and namespaced calls inside argument lists. Each
//! event is parsed into an [`ErrorShape`], the offending line is summarized
//! in an [`ErrorContext`], and a rule table decides whether to keep it.

use crate::infra::lexer::{Token, TokenKind, significant};
use crate::infra::scanner;

/// Built-in methods the grammar does not model as calls
pub const BUILTIN_METHODS: &[&str] = &[
    "jsonPut",
    "jsonGet",
    "jsonRemove",
    "jsonContains",
    "jsonKeys",
    "length",
    "concat",
    "translateMessageGoogle",
    "getLanguageChatGpt",
    "startsWith",
    "replaceAll",
    "substring",
];

const RECURSION_MARKERS: &[&str] = &[
    "Maximum call stack size exceeded",
    "stack overflow",
    "recursion limit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorShape<'m> {
    /// `mismatched input 'X' expecting Y`
    Mismatched { found: &'m str, expecting: &'m str },
    /// `extraneous input 'X' expecting Y`
    Extraneous { found: &'m str, expecting: &'m str },
    RecursionLimit,
    Other,
}

impl<'m> ErrorShape<'m> {
    pub fn parse(message: &'m str) -> Self {
        if RECURSION_MARKERS.iter().any(|m| message.contains(m)) {
            return Self::RecursionLimit;
        }
        if let Some((found, expecting)) = split_input(message, "mismatched input '") {
            return Self::Mismatched { found, expecting };
        }
        if let Some((found, expecting)) = split_input(message, "extraneous input '") {
            return Self::Extraneous { found, expecting };
        }
        Self::Other
    }
}

fn split_input<'m>(message: &'m str, prefix: &str) -> Option<(&'m str, &'m str)> {
    let rest = message.strip_prefix(prefix)?;
    let (found, expecting) = rest.split_once("' expecting ")?;
    Some((found, expecting.trim()))
}

/// What the line looks like around the reported column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Parentheses still open before the column, outside literals
    pub open_parens: usize,
    /// A `.builtin(` call opens before the column
    pub after_builtin_call: bool,
    /// A `Namespace:function(` call opens before the column
    pub after_namespaced_call: bool,
    /// Text from the column to the end of the line
    pub rest: String,
    /// Last non-whitespace character before the column
    pub prev_char: Option<char>,
}

impl ErrorContext {
    pub fn new(line: &str, column: usize) -> Self {
        let chars: Vec<char> = line.chars().collect();
        let column = column.min(chars.len());
        let before: String = chars[..column].iter().collect();
        let tokens = significant(&before);

        Self {
            open_parens: scanner::unclosed_parens(line, column),
            after_builtin_call: has_builtin_call(&tokens),
            after_namespaced_call: has_namespaced_call(&tokens),
            rest: chars[column..].iter().collect(),
            prev_char: chars[..column].iter().rev().find(|c| !c.is_whitespace()).copied(),
        }
    }

    fn after_call(&self) -> bool {
        self.after_builtin_call || self.after_namespaced_call
    }

    fn next_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn prev_is_operand_end(&self) -> bool {
        self.prev_char
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == ']' || c == ')')
    }
}

fn has_builtin_call(tokens: &[Token<'_>]) -> bool {
    tokens.windows(3).any(|w| {
        w[0].is_punct(".")
            && w[1].kind == TokenKind::Ident
            && BUILTIN_METHODS.contains(&w[1].text)
            && w[2].is_punct("(")
    })
}

fn has_namespaced_call(tokens: &[Token<'_>]) -> bool {
    tokens.windows(4).any(|w| {
        w[0].kind == TokenKind::Ident
            && w[0].is_capitalized()
            && w[1].is_punct(":")
            && w[2].kind == TokenKind::Ident
            && w[3].is_punct("(")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuppressReason {
    RecursionLimit,
    CallArgumentClose,
    CallArgument,
    NestedCall,
    StatementBoundary,
    Comparison,
    StatementTerminator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Genuine,
    Suppressed(SuppressReason),
}

impl Verdict {
    pub fn is_genuine(&self) -> bool {
        matches!(self, Self::Genuine)
    }
}

fn suppress_if(condition: bool, reason: SuppressReason) -> Verdict {
    if condition {
        Verdict::Suppressed(reason)
    } else {
        Verdict::Genuine
    }
}

/// Literal-or-word operand right after `==`
fn comparison_follows(rest: &str) -> bool {
    rest.trim_start()
        .strip_prefix("==")
        .and_then(|after| after.trim_start().chars().next())
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '"' || c == '\'')
}

fn starts_with_return(rest: &str) -> bool {
    rest.strip_prefix("return")
        .and_then(|after| after.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Decide whether an event reported at `column` of `line` is genuine
pub fn classify(message: &str, line: &str, column: usize) -> Verdict {
    use SuppressReason::*;

    let shape = ErrorShape::parse(message);
    if shape == ErrorShape::RecursionLimit {
        return Verdict::Suppressed(RecursionLimit);
    }
    if shape == ErrorShape::Other {
        return Verdict::Genuine;
    }

    let ctx = ErrorContext::new(line, column);
    match shape {
        ErrorShape::Mismatched {
            found: ")",
            expecting,
        } if expecting.starts_with('{') && expecting.contains("'=='") => suppress_if(
            ctx.after_call() || matches!(ctx.next_char(), Some(',' | ';' | ')')),
            CallArgumentClose,
        ),
        ErrorShape::Mismatched {
            found: ")",
            expecting: "','",
        } => suppress_if(ctx.open_parens > 0 || ctx.after_call(), CallArgument),
        ErrorShape::Extraneous {
            found: ")",
            expecting: "','" | "';'",
        } => suppress_if(ctx.open_parens >= 2 || ctx.after_call(), NestedCall),
        ErrorShape::Extraneous {
            found: "return", ..
        } => suppress_if(
            ctx.open_parens == 0 && starts_with_return(&ctx.rest),
            StatementBoundary,
        ),
        ErrorShape::Mismatched { found: "==", .. } => suppress_if(
            comparison_follows(&ctx.rest)
                || ctx.prev_is_operand_end()
                || ctx.prev_char == Some('.'),
            Comparison,
        ),
        ErrorShape::Mismatched { found: ";", .. } => suppress_if(
            ctx.next_char() == Some(';') && ctx.prev_is_operand_end(),
            StatementTerminator,
        ),
        _ => Verdict::Genuine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPERATOR_SET: &str =
        "mismatched input ')' expecting {',', '==', '!=', '<', '>', '<=', '>=', '+', '-', '*', '/', '&&', '||'}";

    #[test]
    fn test_parse_shapes() {
        assert_eq!(
            ErrorShape::parse("mismatched input ')' expecting ','"),
            ErrorShape::Mismatched {
                found: ")",
                expecting: "','"
            }
        );
        assert_eq!(
            ErrorShape::parse("extraneous input 'return' expecting {<EOF>, 'unit'}"),
            ErrorShape::Extraneous {
                found: "return",
                expecting: "{<EOF>, 'unit'}"
            }
        );
        assert_eq!(
            ErrorShape::parse("RangeError: Maximum call stack size exceeded"),
            ErrorShape::RecursionLimit
        );
        assert_eq!(ErrorShape::parse("missing ';' at '}'"), ErrorShape::Other);
    }

    #[test]
    fn test_recursion_limit_suppressed() {
        assert_eq!(
            classify("Maximum call stack size exceeded", "", 0),
            Verdict::Suppressed(SuppressReason::RecursionLimit)
        );
    }

    #[test]
    fn test_builtin_call_argument_close() {
        let line = "x = data.jsonGet(\"key\");";
        let column = line.find(')').unwrap();
        assert_eq!(
            classify(OPERATOR_SET, line, column),
            Verdict::Suppressed(SuppressReason::CallArgumentClose)
        );
    }

    #[test]
    fn test_namespaced_call_argument() {
        let line = "y = Strings: join(a, b)";
        let column = line.find(')').unwrap();
        assert_eq!(
            classify("mismatched input ')' expecting ','", line, column),
            Verdict::Suppressed(SuppressReason::CallArgument)
        );
    }

    #[test]
    fn test_unbalanced_close_is_genuine() {
        let line = "x = a + b);";
        let column = line.find(')').unwrap();
        assert!(classify("mismatched input ')' expecting ','", line, column).is_genuine());
    }

    #[test]
    fn test_nested_extraneous_close() {
        let line = "f(g(h(x)))";
        assert_eq!(
            classify("extraneous input ')' expecting ';'", line, 7),
            Verdict::Suppressed(SuppressReason::NestedCall)
        );
        assert!(classify("extraneous input ')' expecting ';'", "x = 1);", 5).is_genuine());
    }

    #[test]
    fn test_return_boundary() {
        let line = "    return total;";
        assert_eq!(
            classify("extraneous input 'return' expecting {<EOF>, 'unit'}", line, 4),
            Verdict::Suppressed(SuppressReason::StatementBoundary)
        );
        assert!(classify("extraneous input 'return' expecting '}'", "f(return x", 2).is_genuine());
    }

    #[test]
    fn test_comparison() {
        let line = "if (status == \"done\") {";
        let column = line.find("==").unwrap();
        assert_eq!(
            classify("mismatched input '==' expecting ')'", line, column),
            Verdict::Suppressed(SuppressReason::Comparison)
        );
        assert!(classify("mismatched input '==' expecting ')'", "if (== ) {", 4).is_genuine());
    }

    #[test]
    fn test_statement_terminator() {
        let line = "total = items[0];";
        let column = line.find(';').unwrap();
        assert_eq!(
            classify("mismatched input ';' expecting ')'", line, column),
            Verdict::Suppressed(SuppressReason::StatementTerminator)
        );
        assert!(classify("mismatched input ';' expecting ')'", "x = (;", 5).is_genuine());
    }

    #[test]
    fn test_other_messages_are_genuine() {
        assert!(classify("missing '}' at '<EOF>'", "", 0).is_genuine());
        assert!(classify("token recognition error at: '\"abc'", "s = \"abc", 4).is_genuine());
    }
}
