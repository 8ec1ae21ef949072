//! Validate command implementation

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::SourceDocument;
use crate::app::App;
use crate::cli::response::DiagnosticsResponse;
use crate::models::diagnostic::{Diagnostic, DiagnosticSeverity};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to validate
    pub file: PathBuf,

    /// Filter by severity (error, warning, info)
    #[arg(long, short = 's', value_delimiter = ',')]
    pub severity: Option<Vec<String>>,

    /// Filter by source (helium-dsl-parser, helium-dsl-linter)
    #[arg(long)]
    pub source: Option<String>,
}

fn keep(d: &Diagnostic, severities: Option<&[DiagnosticSeverity]>, source: Option<&str>) -> bool {
    if let Some(severities) = severities
        && !severities.contains(&d.severity)
    {
        return false;
    }
    source.is_none_or(|s| d.source == s)
}

pub async fn execute(args: ValidateArgs, app: &App) -> Result<()> {
    let ctx = &app.output;

    let severities = args
        .severity
        .as_ref()
        .map(|values| {
            values
                .iter()
                .map(|s| s.parse::<DiagnosticSeverity>())
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;

    let doc = SourceDocument::read(app.root(), &args.file).await?;
    let diagnostics: Vec<_> = app
        .session
        .validate(&doc.uri, &doc.text)
        .into_iter()
        .filter(|d| keep(d, severities.as_deref(), args.source.as_deref()))
        .collect();

    ctx.print_success_flat(DiagnosticsResponse::new(
        ctx.relative_path(&doc.path),
        &diagnostics,
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::diagnostic::{LINTER_SOURCE, PARSER_SOURCE};
    use crate::models::lsp::Range;

    #[test]
    fn test_filters() {
        let lint = Diagnostic::new(
            Range::on_line(0, 0, 1),
            DiagnosticSeverity::Warning,
            "x",
            LINTER_SOURCE,
        );
        let parser = Diagnostic::new(
            Range::on_line(0, 0, 1),
            DiagnosticSeverity::Info,
            "y",
            PARSER_SOURCE,
        );

        assert!(keep(&lint, None, None));
        assert!(keep(&lint, Some(&[DiagnosticSeverity::Warning]), None));
        assert!(!keep(&parser, Some(&[DiagnosticSeverity::Warning]), None));
        assert!(keep(&parser, None, Some(PARSER_SOURCE)));
        assert!(!keep(&lint, None, Some(PARSER_SOURCE)));
    }
}
