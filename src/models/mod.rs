//! Data models for Helium
//!
//! Contains core type definitions used throughout the application.

pub mod completion;
pub mod config;
pub mod diagnostic;
pub mod lsp;
pub mod rule;
pub mod symbol;

// Re-export commonly used types
pub use completion::{BifCatalog, BifEntry, CompletionItem, CompletionItemKind};
pub use config::HeliumConfig;
pub use diagnostic::{Diagnostic, DiagnosticSeverity};
pub use lsp::{Location, Position, Range};
pub use rule::{Rule, RuleSet};
pub use symbol::{ObjectDefinition, Symbol, SymbolKind};
