//! Index command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::App;
use crate::cli::response::ObjectOutput;

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Show only this object type
    #[arg(long, short = 'l')]
    pub lookup: Option<String>,
}

#[derive(Serialize)]
struct IndexResponse {
    roots: Vec<String>,
    files_indexed: usize,
    object_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    failures: Vec<String>,
    objects: Vec<ObjectOutput>,
}

#[derive(Serialize)]
struct LookupResponse {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    object: Option<ObjectOutput>,
}

pub async fn execute(args: IndexArgs, app: &mut App) -> Result<()> {
    let report = app.index_workspace();
    let ctx = &app.output;
    let index = app.session.index();

    if let Some(name) = args.lookup {
        let object = index.lookup(&name).map(|def| ObjectOutput::new(def, ctx));
        ctx.print_success_flat(LookupResponse { name, object });
        return Ok(());
    }

    let summary = index.summary();
    let response = IndexResponse {
        roots: summary.roots.iter().map(|r| r.display().to_string()).collect(),
        files_indexed: report.indexed_files(),
        object_count: summary.object_count,
        failures: report
            .failures()
            .map(|(path, err)| format!("{}: {}", ctx.relative_path(path), err))
            .collect(),
        objects: index
            .definitions()
            .into_iter()
            .map(|def| ObjectOutput::new(def, ctx))
            .collect(),
    };
    ctx.print_success_flat(response);
    Ok(())
}
