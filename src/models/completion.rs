//! Completion model and built-in function metadata

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

use super::symbol::SymbolKind;

/// Completion item kinds, serialized with the numeric values editors expect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum CompletionItemKind {
    Function = 3,
    Field = 5,
    Variable = 6,
    Class = 7,
    Module = 9,
    Enum = 13,
    Keyword = 14,
}

impl From<SymbolKind> for CompletionItemKind {
    fn from(kind: SymbolKind) -> Self {
        match kind {
            SymbolKind::Unit => Self::Module,
            SymbolKind::Function => Self::Function,
            SymbolKind::Variable => Self::Variable,
            SymbolKind::Object => Self::Class,
            SymbolKind::Enum => Self::Enum,
            SymbolKind::Attribute => Self::Field,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionItemKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// One built-in function as described by the generated metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BifEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

/// Built-in functions grouped by namespace
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BifCatalog {
    #[serde(default)]
    pub namespaces: BTreeMap<String, Vec<BifEntry>>,
}

impl BifCatalog {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn len(&self) -> usize {
        self.namespaces.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(namespace, entry)` pairs in namespace order, entries in artifact order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &BifEntry)> {
        self.namespaces
            .iter()
            .flat_map(|(ns, entries)| entries.iter().map(move |e| (ns.as_str(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_as_number() {
        let item = CompletionItem::new("if", CompletionItemKind::Keyword);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], 14);
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "version": "0.1.0",
            "namespaces": {
                "String": [{"name": "length", "signature": "String:length"}],
                "Math": [{"name": "abs"}, {"name": "round", "deprecated": true}]
            }
        }"#;
        let catalog = BifCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);
        let names: Vec<_> = catalog
            .entries()
            .map(|(ns, e)| format!("{}:{}", ns, e.name))
            .collect();
        assert_eq!(names, vec!["Math:abs", "Math:round", "String:length"]);
    }

    #[test]
    fn test_symbol_kind_mapping() {
        assert_eq!(CompletionItemKind::from(SymbolKind::Object), CompletionItemKind::Class);
        assert_eq!(CompletionItemKind::from(SymbolKind::Attribute), CompletionItemKind::Field);
    }
}
