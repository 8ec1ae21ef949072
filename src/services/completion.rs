//! Completion assembler
//!
//! Candidates are the language keywords, every built-in function from the
//! metadata catalog, and the symbols of the current document. No prefix
//! filtering happens here; the editor filters.

use crate::infra::decl::KEYWORDS;
use crate::models::completion::{BifCatalog, BifEntry, CompletionItem, CompletionItemKind};
use crate::models::symbol::{PRIMITIVE_TYPES, Symbol};

pub struct CompletionAssembler {
    keywords: Vec<CompletionItem>,
    builtins: Vec<CompletionItem>,
}

fn builtin_item(namespace: &str, entry: &BifEntry) -> CompletionItem {
    let label = format!("{}:{}", namespace, entry.name);
    let mut detail = entry.signature.clone().unwrap_or_else(|| label.clone());
    if entry.deprecated {
        detail.push_str(" (deprecated)");
    }
    CompletionItem::new(label, CompletionItemKind::Function).with_detail(detail)
}

impl CompletionAssembler {
    pub fn new(catalog: &BifCatalog) -> Self {
        let keywords = KEYWORDS
            .iter()
            .chain(PRIMITIVE_TYPES)
            .map(|word| CompletionItem::new(*word, CompletionItemKind::Keyword))
            .collect();
        let builtins = catalog
            .entries()
            .map(|(namespace, entry)| builtin_item(namespace, entry))
            .collect();

        Self { keywords, builtins }
    }

    pub fn builtin_count(&self) -> usize {
        self.builtins.len()
    }

    /// Keywords, then built-ins, then document symbols
    pub fn complete(&self, symbols: &[Symbol]) -> Vec<CompletionItem> {
        let mut items = Vec::with_capacity(self.keywords.len() + self.builtins.len() + symbols.len());
        items.extend(self.keywords.iter().cloned());
        items.extend(self.builtins.iter().cloned());
        items.extend(
            symbols
                .iter()
                .map(|s| CompletionItem::new(s.name.clone(), s.kind.into())),
        );
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::symbol::SymbolKind;

    fn catalog() -> BifCatalog {
        BifCatalog::from_json(
            r#"{"namespaces": {
                "Json": [{"name": "parse", "signature": "parse(text: string): json"}],
                "Mail": [{"name": "send"}, {"name": "sendLegacy", "deprecated": true}]
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_builtins_use_namespaced_labels() {
        let assembler = CompletionAssembler::new(&catalog());
        assert_eq!(assembler.builtin_count(), 3);

        let items = assembler.complete(&[]);
        let find = |label: &str| items.iter().find(|i| i.label == label).unwrap();
        assert_eq!(
            find("Json:parse").detail.as_deref(),
            Some("parse(text: string): json")
        );
        assert_eq!(find("Mail:send").detail.as_deref(), Some("Mail:send"));
        assert_eq!(
            find("Mail:sendLegacy").detail.as_deref(),
            Some("Mail:sendLegacy (deprecated)")
        );
        assert_eq!(find("Mail:send").kind, CompletionItemKind::Function);
    }

    #[test]
    fn test_keywords_and_symbols() {
        let assembler = CompletionAssembler::new(&BifCatalog::default());
        let items = assembler.complete(&[
            Symbol::new("Rental", SymbolKind::Object),
            Symbol::new("total", SymbolKind::Variable),
        ]);

        assert!(
            items
                .iter()
                .any(|i| i.label == "foreach" && i.kind == CompletionItemKind::Keyword)
        );
        assert!(items.iter().any(|i| i.label == "jsonarray"));
        let last_two: Vec<_> = items.iter().rev().take(2).collect();
        assert_eq!(last_two[0].label, "total");
        assert_eq!(last_two[0].kind, CompletionItemKind::Variable);
        assert_eq!(last_two[1].kind, CompletionItemKind::Class);
    }

    #[test]
    fn test_empty_catalog_still_offers_keywords() {
        let items = CompletionAssembler::new(&BifCatalog::default()).complete(&[]);
        assert!(!items.is_empty());
        assert!(items.iter().all(|i| i.kind == CompletionItemKind::Keyword));
    }
}
