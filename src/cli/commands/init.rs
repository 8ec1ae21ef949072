//! Init command implementation
//!
//! Initialize a Helium project.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::App;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing project config
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Serialize)]
struct InitResponse {
    status: &'static str,
    path: String,
    config_path: String,
    model_dir: String,
    extension: String,
}

pub async fn execute(args: InitArgs, app: &App) -> Result<()> {
    let ctx = &app.output;

    match app.config_service.init(false, args.force).await {
        Ok(config_path) => {
            let response = InitResponse {
                status: "initialized",
                path: app.root().display().to_string(),
                config_path: ctx.relative_path(&config_path),
                model_dir: app.config().workspace.model_dir.clone(),
                extension: app.config().workspace.extension.clone(),
            };
            ctx.print_success_flat(response);
        }
        Err(e) => ctx.print_error(&e.to_string()),
    }

    Ok(())
}
