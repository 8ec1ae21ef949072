//! Helium - diagnostics, symbols and navigation for the Helium DSL
//!
//! Runs the editor validation pipeline from the command line and prints
//! JSON results.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use helium::app::App;
use helium::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays pure JSON.
    // RUST_LOG overrides; --verbose raises the default to debug.
    let default_filter = if cli.verbose { "helium=debug" } else { "helium=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!(
                r#"{{"success":false,"error":"Failed to create runtime: {}"}}"#,
                e
            );
            std::process::exit(1);
        }
    };
    let result = runtime.block_on(async_main(cli));

    if let Err(e) = result {
        let response = serde_json::json!({
            "success": false,
            "error": format!("{:#}", e)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .unwrap_or_else(|_| format!(r#"{{"success":false,"error":"{}"}}"#, e))
        );
        std::process::exit(2);
    }
}

async fn async_main(cli: Cli) -> anyhow::Result<()> {
    let mut app = App::new(cli.format.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize: {}", e))?;

    execute_command(cli.command, &mut app).await
}

async fn execute_command(command: Commands, app: &mut App) -> anyhow::Result<()> {
    use helium::cli::commands;

    match command {
        // Project management
        Commands::Init(args) => commands::init::execute(args, app).await,
        Commands::Config(args) => commands::config::execute(args, app).await,
        Commands::Rules(args) => commands::rules::execute(args, app).await,

        // Document pipeline
        Commands::Validate(args) => commands::validate::execute(args, app).await,
        Commands::Check(args) => commands::check::execute(args, app).await,
        Commands::Symbols(args) => commands::symbols::execute(args, app).await,
        Commands::Complete(args) => commands::complete::execute(args, app).await,

        // Workspace index
        Commands::Definition(args) => commands::definition::execute(args, app).await,
        Commands::Index(args) => commands::index::execute(args, app).await,
    }
}
