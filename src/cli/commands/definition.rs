//! Definition command implementation
//!
//! Indexes the workspace, then resolves the object type at a position.

use anyhow::Result;
use clap::Args;

use super::SourceDocument;
use crate::app::App;
use crate::cli::ParsedLocation;
use crate::cli::response::{DefinitionResponse, LocationOutput};

#[derive(Args, Debug)]
pub struct DefinitionArgs {
    /// Position as file:line[:column] (1-indexed)
    pub location: String,

    /// Resolve a variable to the definition of its declared type
    #[arg(long = "type")]
    pub type_definition: bool,
}

pub async fn execute(args: DefinitionArgs, app: &mut App) -> Result<()> {
    let location = ParsedLocation::parse(&args.location)?.resolve(app.root())?;
    let doc = SourceDocument::read(app.root(), &location.file).await?;
    location.validate_in(&doc.text)?;

    app.index_workspace();

    let position = location.position();
    let found = if args.type_definition {
        app.session.resolve_type_definition(&doc.text, position)
    } else {
        app.session.resolve_definition(&doc.text, position)
    };

    let ctx = &app.output;
    let response = match found {
        Some(found) => DefinitionResponse {
            definition: Some(LocationOutput::from_location(&found, ctx)),
            message: None,
        },
        None => DefinitionResponse {
            definition: None,
            message: Some(format!("No object definition at {}", args.location)),
        },
    };
    ctx.print_success_flat(response);
    Ok(())
}
