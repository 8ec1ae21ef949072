//! Check command implementation
//!
//! Validates every DSL file under the given paths.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::SourceDocument;
use crate::app::App;
use crate::cli::response::DiagnosticsResponse;
use crate::infra::file_filter::{SourceFilter, SourceFilterConfig};
use crate::models::config::HeliumConfig;
use crate::models::diagnostic::DiagnosticSeverity;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files or directories to check (defaults to the project root)
    pub paths: Vec<PathBuf>,

    /// Include files ignored by .gitignore
    #[arg(long)]
    pub no_gitignore: bool,
}

#[derive(Serialize)]
struct CheckResponse {
    files_checked: usize,
    files_with_findings: usize,
    errors: usize,
    warnings: usize,
    results: Vec<DiagnosticsResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    skipped: Vec<String>,
}

fn collect_files(config: &HeliumConfig, target: &Path, respect_gitignore: bool) -> Vec<PathBuf> {
    if target.is_file() {
        return vec![target.to_path_buf()];
    }
    SourceFilter::new(SourceFilterConfig {
        root: target.to_path_buf(),
        extension: config.workspace.extension.clone(),
        ignored_paths: config.workspace.ignored_paths.clone(),
        respect_gitignore,
    })
    .discover_files()
}

pub async fn execute(args: CheckArgs, app: &App) -> Result<()> {
    let ctx = &app.output;
    let targets = if args.paths.is_empty() {
        vec![app.root().to_path_buf()]
    } else {
        args.paths
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { app.root().join(p) })
            .collect()
    };

    let mut files: Vec<PathBuf> = targets
        .iter()
        .flat_map(|t| collect_files(app.config(), t, !args.no_gitignore))
        .collect();
    files.sort();
    files.dedup();

    let limit = crate::config::max_file_size_bytes();
    let mut response = CheckResponse {
        files_checked: 0,
        files_with_findings: 0,
        errors: 0,
        warnings: 0,
        results: Vec::new(),
        skipped: Vec::new(),
    };

    for file in &files {
        let too_large = tokio::fs::metadata(file)
            .await
            .is_ok_and(|meta| meta.len() > limit);
        if too_large {
            response.skipped.push(ctx.relative_path(file));
            continue;
        }
        let doc = match SourceDocument::read(app.root(), file).await {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("{:#}", e);
                response.skipped.push(ctx.relative_path(file));
                continue;
            }
        };

        response.files_checked += 1;
        let diagnostics = app.session.validate(&doc.uri, &doc.text);
        if diagnostics.is_empty() {
            continue;
        }
        for d in &diagnostics {
            match d.severity {
                DiagnosticSeverity::Error => response.errors += 1,
                DiagnosticSeverity::Warning => response.warnings += 1,
                DiagnosticSeverity::Info => {}
            }
        }
        response.files_with_findings += 1;
        response
            .results
            .push(DiagnosticsResponse::new(ctx.relative_path(&doc.path), &diagnostics));
    }

    ctx.print_success_flat(response);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_collect_files_single_and_tree() {
        let dir = TempDir::new().unwrap();
        let model = dir.path().join("model");
        std::fs::create_dir_all(model.join("node_modules")).unwrap();
        std::fs::write(model.join("A.mez"), "unit A;").unwrap();
        std::fs::write(model.join("notes.txt"), "").unwrap();
        std::fs::write(model.join("node_modules").join("B.mez"), "").unwrap();

        let config = HeliumConfig::default();
        let files = collect_files(&config, dir.path(), true);
        assert_eq!(files, vec![model.join("A.mez")]);

        let single = collect_files(&config, &model.join("notes.txt"), true);
        assert_eq!(single, vec![model.join("notes.txt")]);
    }
}
