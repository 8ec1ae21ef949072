//! CLI module for Helium
//!
//! Provides command-line interface using clap derive macros.

pub mod commands;
pub mod location;
pub mod output;
pub mod response;

pub use location::ParsedLocation;
pub use output::OutputContext;

use clap::{Parser, Subcommand};

use commands::{
    check::CheckArgs, complete::CompleteArgs, config::ConfigArgs, definition::DefinitionArgs,
    index::IndexArgs, init::InitArgs, rules::RulesArgs, symbols::SymbolsArgs,
    validate::ValidateArgs,
};

const LONG_ABOUT: &str = r#"
Helium - diagnostics, symbols and navigation for Helium DSL sources

Runs the same validation pipeline an editor session uses: syntax checks,
style rules, document symbols, completions and object definitions.

QUICK START:
  1. Initialize a project:    helium init
  2. Validate a file:         helium validate model/Rental.mez
  3. Check the workspace:     helium check
  4. Jump to a type:          helium definition app/Checkout.mez:12:9

MORE EXAMPLES:
  helium symbols model/Rental.mez --kind object
  helium complete app/Checkout.mez
  helium definition app/Checkout.mez:14:5 --type
  helium index --lookup Rental
  helium rules

Logging goes to stderr; set RUST_LOG=helium=debug or pass --verbose.
"#;

/// Helium - diagnostics, symbols and navigation for Helium DSL sources
#[derive(Parser, Debug)]
#[command(name = "helium")]
#[command(author, version, about, long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
#[command(after_help = "Use 'helium <COMMAND> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, compact); defaults to the configured format
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a Helium project (.helium/config.toml)
    Init(InitArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Syntax and lint diagnostics for one file
    Validate(ValidateArgs),

    /// Lint every DSL file in the workspace
    Check(CheckArgs),

    /// Document symbols of a file
    Symbols(SymbolsArgs),

    /// Completion candidates for a file
    Complete(CompleteArgs),

    /// Go to the definition of an object type
    Definition(DefinitionArgs),

    /// Build the workspace index and show its contents
    Index(IndexArgs),

    /// List the active lint rules
    Rules(RulesArgs),
}
