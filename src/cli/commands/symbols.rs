//! Symbols command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::SourceDocument;
use crate::app::App;
use crate::cli::response::{SymbolOutput, SymbolsResponse};
use crate::models::symbol::SymbolKind;

#[derive(Args, Debug)]
pub struct SymbolsArgs {
    /// File to read symbols from
    pub file: PathBuf,

    /// Only these kinds (unit, object, enum, function, variable, attribute)
    #[arg(long, short = 'k', value_delimiter = ',')]
    pub kind: Option<Vec<SymbolKind>>,
}

pub async fn execute(args: SymbolsArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let doc = SourceDocument::read(app.root(), &args.file).await?;

    let symbols: Vec<SymbolOutput> = app
        .session
        .symbols(&doc.text)
        .iter()
        .filter(|s| args.kind.as_ref().is_none_or(|kinds| kinds.contains(&s.kind)))
        .map(SymbolOutput::from)
        .collect();

    ctx.print_success_flat(SymbolsResponse {
        file: ctx.relative_path(&doc.path),
        count: symbols.len(),
        symbols,
    });
    Ok(())
}
