//! Per-line literal state scanning
//!
//! Line-oriented lint checks need to know whether a column sits inside a
//! quoted string or a `/% ... %/` block on that line. The scan is local to
//! one line; multi-line context is the lexer's job.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiteralState {
    pub in_double: bool,
    pub in_single: bool,
    pub in_block: bool,
}

impl LiteralState {
    pub fn inside(&self) -> bool {
        self.in_double || self.in_single || self.in_block
    }

    fn quoted(&self) -> bool {
        self.in_double || self.in_single
    }
}

/// Walk `chars[..offset]`, calling `visit` with each character index and
/// the literal state in effect before that character.
///
/// Escaped characters are skipped and never visited. Block markers are
/// recognized only outside quotes; quotes only outside blocks.
fn walk(chars: &[char], offset: usize, mut visit: impl FnMut(usize, char, LiteralState)) -> LiteralState {
    let mut state = LiteralState::default();
    let mut escape_next = false;
    let end = offset.min(chars.len());
    let mut i = 0;

    while i < end {
        let c = chars[i];
        if escape_next {
            escape_next = false;
            i += 1;
            continue;
        }
        if c == '\\' {
            escape_next = true;
            i += 1;
            continue;
        }

        visit(i, c, state);

        if !state.quoted() {
            let next = chars.get(i + 1).copied();
            if c == '/' && next == Some('%') {
                state.in_block = true;
                i += 2;
                continue;
            }
            if c == '%' && next == Some('/') {
                state.in_block = false;
                i += 2;
                continue;
            }
        }

        if !state.in_block {
            if c == '"' && !state.in_single {
                state.in_double = !state.in_double;
            } else if c == '\'' && !state.in_double {
                state.in_single = !state.in_single;
            }
        }
        i += 1;
    }

    state
}

/// Literal state at a character offset of `line`
pub fn literal_state_at(line: &str, offset: usize) -> LiteralState {
    let chars: Vec<char> = line.chars().collect();
    walk(&chars, offset, |_, _, _| {})
}

pub fn in_literal(line: &str, offset: usize) -> bool {
    literal_state_at(line, offset).inside()
}

/// Parentheses opened before `offset` and not yet closed, ignoring any
/// inside literals
pub fn unclosed_parens(line: &str, offset: usize) -> usize {
    let chars: Vec<char> = line.chars().collect();
    let mut depth: usize = 0;
    walk(&chars, offset, |_, c, state| {
        if state.inside() {
            return;
        }
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    });
    depth
}

/// Lines that are (or continue) a comment
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with("*/")
}

pub fn has_block_markers(line: &str) -> bool {
    line.contains("/%") || line.contains("%/")
}

/// Two or more `/` on the line suggest a regex or path literal
pub fn has_regex_like_delimiters(line: &str) -> bool {
    line.matches('/').count() >= 2
}

/// Split text into lines the same way the lexer counts them
pub fn lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quotes() {
        let line = r#"x = "a ? b : c";"#;
        assert!(!in_literal(line, 0));
        assert!(in_literal(line, 7));
        assert!(!in_literal(line, line.len()));
    }

    #[test]
    fn test_escaped_quote_stays_inside() {
        let line = r#"s = "say \"x\" ? y";"#;
        let q = line.find('?').unwrap();
        assert!(literal_state_at(line, q).in_double);
    }

    #[test]
    fn test_single_inside_double_is_not_a_quote() {
        let line = r#"s = "it's" + !done;"#;
        let bang = line.find('!').unwrap();
        assert!(!in_literal(line, bang));
    }

    #[test]
    fn test_block_markers() {
        let line = "q = /% a ? b : c %/ + x ? y : z;";
        assert!(literal_state_at(line, 9).in_block);
        let after = line.find("x ?").unwrap();
        assert!(!in_literal(line, after));
    }

    #[test]
    fn test_block_marker_inside_quotes_ignored() {
        let line = r#"s = "/%" + a;"#;
        let a = line.find('a').unwrap();
        assert!(!in_literal(line, a));
    }

    #[test]
    fn test_unclosed_parens() {
        let line = "foo(bar(\")\", x";
        assert_eq!(unclosed_parens(line, line.chars().count()), 2);
        assert_eq!(unclosed_parens("a(b) + c(", 9), 1);
        assert_eq!(unclosed_parens("a)", 2), 0);
    }

    #[test]
    fn test_line_classification() {
        assert!(is_comment_line("   // note"));
        assert!(is_comment_line("/* start"));
        assert!(is_comment_line("  */"));
        assert!(!is_comment_line("x = 1; // trailing"));
        assert!(has_block_markers("q = /% select"));
        assert!(has_regex_like_delimiters("p = \"/a/b\";"));
        assert!(!has_regex_like_delimiters("a / b"));
    }

    #[test]
    fn test_lines_strip_carriage_returns() {
        assert_eq!(lines("a\r\nb\n"), vec!["a", "b", ""]);
    }
}
