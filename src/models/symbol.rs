//! Symbol model definitions
//!
//! Flat, document-scoped symbols used for completion, and the object
//! definitions kept by the workspace index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::lsp::{Location, Position, Range};

/// Built-in scalar and JSON types. Never user-defined, compared case-insensitively.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "int", "decimal", "bigint", "uuid", "blob", "bool", "string", "void", "date", "datetime",
    "json", "jsonarray",
];

pub fn is_primitive_type(name: &str) -> bool {
    PRIMITIVE_TYPES
        .iter()
        .any(|primitive| primitive.eq_ignore_ascii_case(name))
}

/// A named entity found in a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Position>,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            name: name.into(),
            kind,
            location: None,
        }
    }

    pub fn at(mut self, line: u32, character: u32) -> Self {
        self.location = Some(Position::new(line, character));
        self
    }
}

/// Symbol classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Unit,
    Function,
    Variable,
    Object,
    Enum,
    Attribute,
}

impl SymbolKind {
    pub fn all_kind_names() -> &'static [&'static str] {
        &["unit", "function", "variable", "object", "enum", "attribute"]
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unit => "unit",
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Object => "object",
            Self::Enum => "enum",
            Self::Attribute => "attribute",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SymbolKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unit" => Ok(Self::Unit),
            "function" | "fn" => Ok(Self::Function),
            "variable" | "var" => Ok(Self::Variable),
            "object" => Ok(Self::Object),
            "enum" => Ok(Self::Enum),
            "attribute" | "attr" => Ok(Self::Attribute),
            _ => Err(format!(
                "Unknown symbol kind: '{}'. Valid: {}",
                s,
                Self::all_kind_names().join(", ")
            )),
        }
    }
}

/// Workspace index entry for a declared object type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    pub name: String,
    pub uri: String,
    /// 0-indexed line of the declaration
    pub line: u32,
    /// 0-indexed column of the type name
    pub character: u32,
    pub is_persistent: bool,
}

impl ObjectDefinition {
    /// Location spanning the declared name
    pub fn location(&self) -> Location {
        let length = self.name.chars().count() as u32;
        Location::new(
            self.uri.clone(),
            Range::on_line(self.line, self.character, length),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_types_case_insensitive() {
        assert!(is_primitive_type("int"));
        assert!(is_primitive_type("JSONArray"));
        assert!(is_primitive_type("DateTime"));
        assert!(!is_primitive_type("Rental"));
        assert!(!is_primitive_type("integer"));
    }

    #[test]
    fn test_symbol_kind_round_trip_names() {
        for name in SymbolKind::all_kind_names() {
            let kind: SymbolKind = name.parse().unwrap();
            assert_eq!(kind.to_string(), *name);
        }
        assert!("class".parse::<SymbolKind>().is_err());
    }

    #[test]
    fn test_object_definition_location() {
        let def = ObjectDefinition {
            name: "Rental".to_string(),
            uri: "file:///ws/model/rental.mez".to_string(),
            line: 2,
            character: 18,
            is_persistent: true,
        };
        let loc = def.location();
        assert_eq!(loc.range.start, Position::new(2, 18));
        assert_eq!(loc.range.end, Position::new(2, 24));
    }
}
