//! Rules command implementation
//!
//! Shows the configured rules and where the generated artifacts came from.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::app::{App, ArtifactStatus};

#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Filter by category (variables, style, ...)
    #[arg(long, short = 'c')]
    pub category: Option<String>,
}

#[derive(Serialize)]
struct RuleOutput {
    id: String,
    severity: String,
    category: String,
    message: String,
    /// A checker exists for this id
    implemented: bool,
}

#[derive(Serialize)]
struct RulesResponse<'a> {
    parser: &'a str,
    builtin_functions: usize,
    artifacts: &'a ArtifactStatus,
    count: usize,
    rules: Vec<RuleOutput>,
}

pub async fn execute(args: RulesArgs, app: &App) -> Result<()> {
    let session = &app.session;
    let active = session.active_rule_ids();

    let rules: Vec<RuleOutput> = session
        .rules()
        .iter()
        .filter(|r| {
            args.category
                .as_deref()
                .is_none_or(|c| r.category.eq_ignore_ascii_case(c))
        })
        .map(|r| RuleOutput {
            id: r.id.clone(),
            severity: r.severity.to_string(),
            category: r.category.clone(),
            message: r.message.clone(),
            implemented: active.iter().any(|id| *id == r.id),
        })
        .collect();

    app.output.print_success_flat(RulesResponse {
        parser: session.parser_name(),
        builtin_functions: session.builtin_count(),
        artifacts: &app.artifacts,
        count: rules.len(),
        rules,
    });
    Ok(())
}
