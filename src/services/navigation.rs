//! Go-to-definition for user-defined object types

use crate::infra::decl::declared_type_of;
use crate::infra::lexer::significant;
use crate::infra::scanner;
use crate::models::lsp::{Location, Position, Range};
use crate::services::workspace::WorkspaceIndex;

/// An identifier and the range it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAt {
    pub text: String,
    pub range: Range,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The whole identifier touching `position`
///
/// A cursor just past the last character still counts as touching it.
pub fn identifier_at(text: &str, position: Position) -> Option<WordAt> {
    let lines = scanner::lines(text);
    let line = lines.get(position.line as usize)?;
    let chars: Vec<char> = line.chars().collect();
    let cursor = (position.character as usize).min(chars.len());

    let mut start = cursor;
    while start > 0 && is_word_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = cursor;
    while end < chars.len() && is_word_char(chars[end]) {
        end += 1;
    }
    if start == end {
        return None;
    }

    Some(WordAt {
        text: chars[start..end].iter().collect(),
        range: Range::on_line(position.line, start as u32, (end - start) as u32),
    })
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Definition of the capitalized user-defined type under the cursor
pub fn resolve_definition(
    index: &WorkspaceIndex,
    text: &str,
    position: Position,
) -> Option<Location> {
    let word = identifier_at(text, position)?;
    if !starts_uppercase(&word.text) || !index.is_user_defined_type(&word.text) {
        return None;
    }
    index.location(&word.text)
}

/// Like [`resolve_definition`], but a lowercase variable resolves through
/// its declared type in the same document
pub fn resolve_type_definition(
    index: &WorkspaceIndex,
    text: &str,
    position: Position,
) -> Option<Location> {
    let word = identifier_at(text, position)?;
    let type_name = if starts_uppercase(&word.text) {
        word.text
    } else {
        let tokens = significant(text);
        declared_type_of(&tokens, &word.text)?.text.to_string()
    };

    if !index.is_user_defined_type(&type_name) {
        return None;
    }
    index.location(&type_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::workspace::IndexSettings;

    const DEFS_URI: &str = "file:///work/model/Defs.mez";

    fn index() -> WorkspaceIndex {
        let mut index = WorkspaceIndex::new(IndexSettings::default());
        index.update_text(DEFS_URI, "persistent object Rental {\n}\nobject Car {\n}");
        index
    }

    #[test]
    fn test_identifier_at_touching_end() {
        let text = "Rental r = x;";
        let word = identifier_at(text, Position::new(0, 6)).unwrap();
        assert_eq!(word.text, "Rental");
        assert_eq!(word.range, Range::on_line(0, 0, 6));
        assert_eq!(identifier_at(text, Position::new(0, 3)).unwrap().text, "Rental");
        assert!(identifier_at("a = b;", Position::new(0, 2)).is_none());
        assert!(identifier_at("x", Position::new(4, 0)).is_none());
    }

    #[test]
    fn test_resolve_definition() {
        let index = index();
        let text = "void f() {\n  Rental r = new Rental();\n  string s;\n}";

        let location = resolve_definition(&index, text, Position::new(1, 4)).unwrap();
        assert_eq!(location.uri, DEFS_URI);
        assert_eq!(location.range, Range::on_line(0, 18, 6));

        assert!(resolve_definition(&index, text, Position::new(2, 3)).is_none());
        assert!(resolve_definition(&index, text, Position::new(1, 10)).is_none());
    }

    #[test]
    fn test_unknown_type_has_no_definition() {
        let index = index();
        assert!(resolve_definition(&index, "Truck t;", Position::new(0, 1)).is_none());
    }

    #[test]
    fn test_type_definition_through_variable() {
        let index = index();
        let text = "Car myCar = new Car();\nmyCar.start();\nint n = 0;\nn = 1;";

        let location = resolve_type_definition(&index, text, Position::new(1, 2)).unwrap();
        assert_eq!(location.range, Range::on_line(2, 7, 3));
        assert!(resolve_type_definition(&index, text, Position::new(3, 0)).is_none());
        assert!(resolve_type_definition(&index, text, Position::new(0, 1)).is_some());
    }
}
