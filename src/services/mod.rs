//! Service layer for Helium

pub mod artifacts;
pub mod completion;
pub mod config;
pub mod lint;
pub mod navigation;
pub mod session;
pub mod symbols;
pub mod syntax;
pub mod workspace;

pub use artifacts::{ArtifactLoader, ArtifactOrigin, Loaded};
pub use completion::CompletionAssembler;
pub use config::{ConfigService, DefaultConfigService};
pub use lint::LintEngine;
pub use session::Session;
pub use symbols::build_symbol_table;
pub use syntax::{SyntaxDiagnosticAdapter, SyntaxParser, parser_for};
pub use workspace::{IndexReport, IndexSettings, ScanOutcome, WorkspaceIndex};
