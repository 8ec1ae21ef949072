//! Symbol table builder
//!
//! Collects a flat list of document symbols for completion. Each line
//! contributes at most one unit, one object, one enum, one function and one
//! variable, in that order.

use crate::infra::decl::{
    DeclTerminator, keyword_decl_at, object_body_flags, object_decls, typed_decl_at,
};
use crate::infra::lexer::{line_spans, significant};
use crate::models::symbol::{Symbol, SymbolKind};

pub fn build_symbol_table(text: &str) -> Vec<Symbol> {
    let tokens = significant(text);
    let in_object_body = object_body_flags(&tokens);
    let objects = object_decls(&tokens);
    let mut symbols = Vec::new();

    for (line, start, end) in line_spans(&tokens) {
        let keyword = |word: &str| {
            (start..end).find_map(|i| {
                keyword_decl_at(&tokens, i, word).map(|name| (tokens[i].column, name))
            })
        };

        if let Some((column, name)) = keyword("unit") {
            symbols.push(Symbol::new(name.text, SymbolKind::Unit).at(line, column));
        }

        if let Some(object) = objects.iter().find(|o| o.line == line) {
            symbols.push(
                Symbol::new(object.name_tok.text, SymbolKind::Object)
                    .at(line, object.start_column),
            );
        }

        if let Some((column, name)) = keyword("enum") {
            symbols.push(Symbol::new(name.text, SymbolKind::Enum).at(line, column));
        }

        let decls: Vec<_> = (start..end)
            .filter_map(|i| typed_decl_at(&tokens, i).map(|d| (i, d)))
            .collect();

        if let Some((_, function)) = decls.iter().find(|(_, d)| d.is_function()) {
            symbols.push(
                Symbol::new(function.name_tok.text, SymbolKind::Function)
                    .at(line, function.type_tok.column),
            );
        }

        if let Some((i, variable)) = decls
            .iter()
            .find(|(_, d)| d.terminator_kind != DeclTerminator::Paren)
        {
            let kind = if in_object_body[*i] {
                SymbolKind::Attribute
            } else {
                SymbolKind::Variable
            };
            symbols.push(Symbol::new(variable.name_tok.text, kind).at(line, variable.type_tok.column));
        }
    }

    symbols
}
