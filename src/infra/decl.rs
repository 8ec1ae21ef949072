//! Declaration shapes over the token stream
//!
//! Shared by the lint rules, the symbol table builder and the workspace
//! index so they agree on what a declaration looks like.

use crate::infra::lexer::{Token, TokenKind, line_spans};
use crate::models::symbol::is_primitive_type;

/// Reserved words that are never declaration names or user types
pub const KEYWORDS: &[&str] = &[
    "unit",
    "object",
    "persistent",
    "enum",
    "validator",
    "if",
    "else",
    "while",
    "for",
    "foreach",
    "in",
    "return",
    "break",
    "continue",
    "new",
    "true",
    "false",
    "null",
    "import",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// What closes a typed declaration head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclTerminator {
    /// `Type name = ...`
    Assign,
    /// `Type name;`
    Semicolon,
    /// `Type name(` (function)
    Paren,
}

#[derive(Debug, Clone, Copy)]
pub struct TypedDecl<'a> {
    pub type_tok: Token<'a>,
    pub name_tok: Token<'a>,
    pub terminator: Token<'a>,
    pub terminator_kind: DeclTerminator,
}

impl<'a> TypedDecl<'a> {
    pub fn is_function(&self) -> bool {
        self.terminator_kind == DeclTerminator::Paren
    }

    /// Character length from the type through the terminator, or the type
    /// and name when they span lines
    pub fn head_len(&self) -> u32 {
        if self.terminator.line == self.type_tok.line {
            self.terminator.end_column - self.type_tok.column
        } else if self.name_tok.line == self.type_tok.line {
            self.name_tok.end_column - self.type_tok.column
        } else {
            self.type_tok.len()
        }
    }
}

/// Type position: a primitive or a capitalized identifier
pub fn is_type_token(tok: &Token<'_>) -> bool {
    tok.kind == TokenKind::Ident
        && !is_keyword(tok.text)
        && (is_primitive_type(tok.text) || tok.is_capitalized())
}

/// Name position: any identifier that is not reserved
///
/// Case is not checked here; naming rules report badly cased names.
pub fn is_name_token(tok: &Token<'_>) -> bool {
    tok.kind == TokenKind::Ident && !is_keyword(tok.text)
}

/// True when `tokens[i]` can begin a statement
///
/// The previous token must be absent, a block or statement boundary, a
/// paren, `else`, or an annotation name (`@Required string x;`).
pub fn starts_statement(tokens: &[Token<'_>], i: usize) -> bool {
    let Some(prev) = i.checked_sub(1).and_then(|p| tokens.get(p)) else {
        return true;
    };
    match prev.kind {
        TokenKind::Punct => matches!(prev.text, "{" | "}" | ";" | "(" | ")"),
        TokenKind::Ident if prev.text == "else" => true,
        TokenKind::Ident => i >= 2 && tokens[i - 2].is_punct("@"),
        _ => false,
    }
}

/// Match `Type name =`, `Type name;`, `Type name(` or `Type[] name ...`
/// starting at `tokens[i]`
pub fn typed_decl_at<'a>(tokens: &[Token<'a>], i: usize) -> Option<TypedDecl<'a>> {
    let type_tok = *tokens.get(i)?;
    if !is_type_token(&type_tok) || !starts_statement(tokens, i) {
        return None;
    }

    let mut next = i + 1;
    if tokens.get(next).is_some_and(|t| t.is_punct("["))
        && tokens.get(next + 1).is_some_and(|t| t.is_punct("]"))
    {
        next += 2;
    }

    let name_tok = *tokens.get(next)?;
    if !is_name_token(&name_tok) {
        return None;
    }

    let terminator = *tokens.get(next + 1)?;
    let terminator_kind = match terminator.text {
        "=" if terminator.kind == TokenKind::Punct => DeclTerminator::Assign,
        ";" if terminator.kind == TokenKind::Punct => DeclTerminator::Semicolon,
        "(" if terminator.kind == TokenKind::Punct => DeclTerminator::Paren,
        _ => return None,
    };

    Some(TypedDecl {
        type_tok,
        name_tok,
        terminator,
        terminator_kind,
    })
}

/// `keyword Name` header such as `unit Billing` or `enum Status`
pub fn keyword_decl_at<'a>(tokens: &[Token<'a>], i: usize, keyword: &str) -> Option<Token<'a>> {
    let head = tokens.get(i)?;
    if !head.is_ident(keyword) {
        return None;
    }
    let name = *tokens.get(i + 1)?;
    (name.kind == TokenKind::Ident && !is_keyword(name.text)).then_some(name)
}

/// An `object Name` or `persistent object Name` header
#[derive(Debug, Clone, Copy)]
pub struct ObjectDecl<'a> {
    pub name_tok: Token<'a>,
    pub line: u32,
    /// Column of `persistent` when present, else of `object`
    pub start_column: u32,
    pub is_persistent: bool,
}

pub fn object_decl_at<'a>(tokens: &[Token<'a>], i: usize) -> Option<ObjectDecl<'a>> {
    let head = tokens.get(i)?;
    let name_tok = keyword_decl_at(tokens, i, "object")?;
    if !name_tok.is_capitalized() {
        return None;
    }
    let persistent = i
        .checked_sub(1)
        .and_then(|p| tokens.get(p))
        .filter(|t| t.is_ident("persistent") && t.line == head.line);

    Some(ObjectDecl {
        name_tok,
        line: head.line,
        start_column: persistent.map_or(head.column, |p| p.column),
        is_persistent: persistent.is_some(),
    })
}

/// Object declarations in `tokens`, at most one per line
///
/// A persistent declaration wins over a plain one on the same line.
pub fn object_decls<'a>(tokens: &[Token<'a>]) -> Vec<ObjectDecl<'a>> {
    let mut found = Vec::new();
    for (_, start, end) in line_spans(tokens) {
        let on_line: Vec<ObjectDecl<'a>> = (start..end)
            .filter_map(|i| object_decl_at(tokens, i))
            .collect();
        let chosen = on_line
            .iter()
            .find(|d| d.is_persistent)
            .or_else(|| on_line.first());
        if let Some(decl) = chosen {
            found.push(*decl);
        }
    }
    found
}

/// For each token, whether it sits directly inside an object body
///
/// Tracks `object Name {` headers and the brace depth they open; tokens in
/// nested blocks within the body do not count.
pub fn object_body_flags(tokens: &[Token<'_>]) -> Vec<bool> {
    let mut flags = Vec::with_capacity(tokens.len());
    let mut depth: i32 = 0;
    let mut bodies: Vec<i32> = Vec::new();
    let mut pending_object = false;

    for tok in tokens {
        flags.push(bodies.last() == Some(&depth));

        if tok.is_ident("object") {
            pending_object = true;
        } else if tok.is_punct("{") {
            depth += 1;
            if pending_object {
                bodies.push(depth);
                pending_object = false;
            }
        } else if tok.is_punct("}") {
            if bodies.last() == Some(&depth) {
                bodies.pop();
            }
            depth -= 1;
        } else if tok.is_punct(";") {
            pending_object = false;
        }
    }

    flags
}

/// Declared type of the variable `name`, searching the whole document
pub fn declared_type_of<'a>(tokens: &[Token<'a>], name: &str) -> Option<Token<'a>> {
    (0..tokens.len())
        .filter_map(|i| typed_decl_at(tokens, i))
        .find(|decl| !decl.is_function() && decl.name_tok.text == name)
        .map(|decl| decl.type_tok)
}
