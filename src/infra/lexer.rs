//! Logos-based token lexer for Helium DSL source
//!
//! Produces a flat token stream covering identifiers, numbers, quoted
//! strings, `/% ... %/` block literals, comments and punctuation. Whitespace
//! is dropped. Lines and columns are 0-indexed; columns count characters.
//!
//! The lexer never fails: unterminated literals and comments are emitted
//! with `terminated == false` and run to the end of the line (strings) or
//! the end of input (block literals, block comments). Any other character
//! comes out as single-character punctuation.

use logos::Logos;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Number,
    /// Double- or single-quoted string
    Str,
    /// `/% ... %/` embedded block (SQL and similar)
    BlockLiteral,
    /// `// ...` or `/* ... */`
    Comment,
    Punct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    /// Exclusive
    pub end_column: u32,
    pub terminated: bool,
}

impl<'a> Token<'a> {
    pub fn is_ident(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == name
    }

    pub fn is_punct(&self, punct: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == punct
    }

    pub fn is_comment(&self) -> bool {
        self.kind == TokenKind::Comment
    }

    /// Length in characters of the part on the starting line
    pub fn len(&self) -> u32 {
        if self.end_line == self.line {
            self.end_column - self.column
        } else {
            self.text.split('\n').next().map_or(0, |s| s.chars().count() as u32)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the token text starts with an uppercase letter
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    Lexer::new(text).collect()
}

/// Tokens with comments removed
pub fn significant(text: &str) -> Vec<Token<'_>> {
    tokenize(text)
        .into_iter()
        .filter(|t| !t.is_comment())
        .collect()
}

/// Group token indices by starting line, preserving order
///
/// Returns `(line, start, end)` triples where `tokens[start..end]` all
/// begin on `line`.
pub fn line_spans(tokens: &[Token<'_>]) -> Vec<(u32, usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    while start < tokens.len() {
        let line = tokens[start].line;
        let mut end = start + 1;
        while end < tokens.len() && tokens[end].line == line {
            end += 1;
        }
        spans.push((line, start, end));
        start = end;
    }
    spans
}

/// Lexer wrapping the logos-generated tokenizer
///
/// Logos reports byte spans; the wrapper turns them into character based
/// line and column positions.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, RawToken>,
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: RawToken::lexer(input),
            cursor: Cursor::new(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.inner.next()?;
        let text = self.inner.slice();
        let span = self.inner.span();

        let (kind, terminated) = match raw {
            Ok(RawToken::Ident) => (TokenKind::Ident, true),
            Ok(RawToken::Number) => (TokenKind::Number, true),
            Ok(RawToken::Str(closed)) => (TokenKind::Str, closed),
            Ok(RawToken::BlockLiteral(closed)) => (TokenKind::BlockLiteral, closed),
            Ok(RawToken::LineComment) => (TokenKind::Comment, true),
            Ok(RawToken::BlockComment(closed)) => (TokenKind::Comment, closed),
            Ok(RawToken::Punct) | Err(()) => (TokenKind::Punct, true),
        };

        let (line, column) = self.cursor.advance_to(span.start);
        let (end_line, end_column) = self.cursor.advance_to(span.end);

        Some(Token {
            kind,
            text,
            line,
            column,
            end_line,
            end_column,
            terminated,
        })
    }
}

/// Forward-only byte offset to (line, character column) mapping
struct Cursor<'a> {
    src: &'a str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    fn advance_to(&mut self, offset: usize) -> (u32, u32) {
        if let Some(skipped) = self.src.get(self.offset..offset) {
            for c in skipped.chars() {
                if c == '\n' {
                    self.line += 1;
                    self.column = 0;
                } else {
                    self.column += 1;
                }
            }
            self.offset = offset;
        }
        (self.line, self.column)
    }
}

/// Consume the rest of a quoted string after its opening `quote`
///
/// Backslash escapes the next character unless it is a newline. The string
/// ends at the closing quote or, unterminated, just before the newline.
fn quoted(lex: &mut logos::Lexer<'_, RawToken>, quote: char) -> bool {
    let rest = lex.remainder();
    let mut chars = rest.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == '\n' {
            lex.bump(i);
            return false;
        }
        if c == '\\' {
            chars.next_if(|&(_, n)| n != '\n');
        } else if c == quote {
            lex.bump(i + c.len_utf8());
            return true;
        }
    }
    lex.bump(rest.len());
    false
}

/// Consume up to and including `close`, or to the end of input
fn delimited(lex: &mut logos::Lexer<'_, RawToken>, close: &str) -> bool {
    let rest = lex.remainder();
    match rest.find(close) {
        Some(i) => {
            lex.bump(i + close.len());
            true
        }
        None => {
            lex.bump(rest.len());
            false
        }
    }
}

/// Logos token enum; the bool payloads carry `terminated`
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"\s+")]
enum RawToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", |lex| delimited(lex, "*/"))]
    BlockComment(bool),

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[token("/%", |lex| delimited(lex, "%/"))]
    BlockLiteral(bool),

    #[token("\"", |lex| quoted(lex, '"'), priority = 3)]
    #[token("'", |lex| quoted(lex, '\''), priority = 3)]
    Str(bool),

    #[regex(r"[\p{Alphabetic}_][\p{Alphabetic}\p{Nd}_]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,

    // =========================================================================
    // PUNCTUATION (compound operators are single tokens)
    // =========================================================================
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token("%=")]
    #[token("==")]
    #[token("!=")]
    #[token("<=")]
    #[token(">=")]
    #[token("&&")]
    #[token("||")]
    #[token("++")]
    #[token("--")]
    #[token("->")]
    #[token("::")]
    #[regex(r"[!-/:-@\[-^`{-~]")]
    #[regex(r"[^\x00-\x7F\s]", priority = 0)]
    Punct,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_text(text: &str) -> Vec<(TokenKind, &str)> {
        tokenize(text).iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn test_declaration_tokens() {
        let tokens = kinds_and_text("int count = 10;");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Ident, "int"),
                (TokenKind::Ident, "count"),
                (TokenKind::Punct, "="),
                (TokenKind::Number, "10"),
                (TokenKind::Punct, ";"),
            ]
        );
    }

    #[test]
    fn test_compound_operators_are_single_tokens() {
        let tokens = kinds_and_text("a += 1; b == c; d != e");
        let puncts: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k == TokenKind::Punct)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(puncts, vec!["+=", ";", "==", ";", "!="]);
    }

    #[test]
    fn test_strings_with_escapes() {
        let tokens = tokenize(r#"s = "say \"hi\" {"; t = 'it''"#);
        let strings: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Str).collect();
        assert_eq!(strings.len(), 3);
        assert_eq!(strings[0].text, r#""say \"hi\" {""#);
        assert!(strings[0].terminated);
        assert_eq!(strings[1].text, "'it'");
        assert!(!strings[2].terminated);
    }

    #[test]
    fn test_unterminated_string_stops_at_line_end() {
        let tokens = tokenize("x = \"open\ny = 1;");
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert!(!tokens[2].terminated);
        assert_eq!(tokens[3].text, "y");
        assert_eq!(tokens[3].line, 1);
    }

    #[test]
    fn test_block_literal_spans_lines() {
        let text = "q = /% SELECT a.b.c\n FROM t; %/;\nint x = 1;";
        let tokens = tokenize(text);
        let block = tokens
            .iter()
            .find(|t| t.kind == TokenKind::BlockLiteral)
            .unwrap();
        assert_eq!(block.line, 0);
        assert_eq!(block.end_line, 1);
        assert!(block.terminated);
        let int = tokens.iter().find(|t| t.is_ident("int")).unwrap();
        assert_eq!((int.line, int.column), (2, 0));
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("a; // trailing { \n/* block\n } */ b");
        let comments: Vec<_> = tokens.iter().filter(|t| t.is_comment()).collect();
        assert_eq!(comments.len(), 2);
        assert_eq!(significant("a; // x\n/* y */ b").len(), 3);
    }

    #[test]
    fn test_positions_count_characters() {
        let tokens = tokenize("s = \"héllo\"; x");
        let x = tokens.last().unwrap();
        assert_eq!(x.text, "x");
        assert_eq!(x.column, 13);
        assert_eq!(tokens[2].len(), 7);
    }

    #[test]
    fn test_line_spans() {
        let tokens = significant("a b\n\nc\nd e f");
        let spans = line_spans(&tokens);
        assert_eq!(spans, vec![(0, 0, 2), (2, 2, 3), (3, 3, 6)]);
    }

    #[test]
    fn test_decimal_number() {
        let tokens = kinds_and_text("x = 3.14; y = a.b");
        assert!(tokens.contains(&(TokenKind::Number, "3.14")));
        assert!(tokens.contains(&(TokenKind::Punct, ".")));
    }

    #[test]
    fn test_unterminated_block_runs_to_end() {
        let tokens = tokenize("a = 1;\n/* open\nb = 2;");
        let last = tokens.last().unwrap();
        assert!(last.is_comment());
        assert!(!last.terminated);
        assert_eq!((last.line, last.end_line), (1, 2));

        let tokens = tokenize("q = /% select %");
        assert_eq!(tokens[2].kind, TokenKind::BlockLiteral);
        assert!(!tokens[2].terminated);
    }

    #[test]
    fn test_unmatched_characters_are_punctuation() {
        let tokens = kinds_and_text("prix = 5€;\u{a0}größe");
        assert_eq!(tokens[3], (TokenKind::Punct, "€"));
        assert_eq!(tokens.last(), Some(&(TokenKind::Ident, "größe")));
    }
}
