//! Complete command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::SourceDocument;
use crate::app::App;
use crate::cli::response::{CompletionOutput, CompletionResponse};

#[derive(Args, Debug)]
pub struct CompleteArgs {
    /// File whose symbols join the candidates
    pub file: PathBuf,

    /// Keep only labels starting with this prefix (case-insensitive)
    #[arg(long, short = 'p')]
    pub prefix: Option<String>,
}

fn matches_prefix(label: &str, prefix: Option<&str>) -> bool {
    prefix.is_none_or(|p| label.to_lowercase().starts_with(&p.to_lowercase()))
}

pub async fn execute(args: CompleteArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let doc = SourceDocument::read(app.root(), &args.file).await?;

    let items: Vec<CompletionOutput> = app
        .session
        .complete(&doc.text)
        .iter()
        .filter(|item| matches_prefix(&item.label, args.prefix.as_deref()))
        .map(CompletionOutput::from)
        .collect();

    ctx.print_success_flat(CompletionResponse {
        file: ctx.relative_path(&doc.path),
        count: items.len(),
        items,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_filter() {
        assert!(matches_prefix("Json:parse", Some("json")));
        assert!(matches_prefix("foreach", None));
        assert!(!matches_prefix("foreach", Some("while")));
    }
}
