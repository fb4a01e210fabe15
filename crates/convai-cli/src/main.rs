//! convai CLI
//!
//! Pull, push and delete conversational agents, tools and tests, and run an
//! agent's attached tests, against the platform's management API. Agents
//! can also be exported as an embeddable HTML widget.

mod cli;
mod commands;
mod error;
mod http;
mod interactive;
mod logging;

use std::path::Path;

use clap::Parser;
use colored::Colorize;
use convai_core::{ConfigContext, PollConfig, ResourceKind};

use cli::{AgentAction, Cli, Commands, ResourceAction};
use error::Result;
use http::HttpRemote;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let Some(command) = cli.command.clone() else {
        println!("{} conversational agent config sync", "convai".green().bold());
        println!();
        println!("Run {} for available commands.", "convai --help".cyan());
        return Ok(());
    };

    let cwd = std::env::current_dir()?;
    match command {
        Commands::Init { path, overwrite } => commands::run_init(&cwd.join(path), overwrite),
        Commands::Agents { action } => match action {
            AgentAction::Common(action) => {
                run_resource(context(&cli, &cwd)?, ResourceKind::Agent, action).await
            }
            AgentAction::Test { agent_id } => {
                let ctx = context(&cli, &cwd)?;
                let remote = HttpRemote::new(&ctx);
                commands::run_agent_test(ctx, &remote, &agent_id, PollConfig::default()).await
            }
            AgentAction::Widget { agent_id } => {
                let ctx = context(&cli, &cwd)?;
                let remote = HttpRemote::new(&ctx);
                commands::run_widget(ctx, &remote, &agent_id)
            }
        },
        Commands::Tools { action } => {
            run_resource(context(&cli, &cwd)?, ResourceKind::Tool, action).await
        }
        Commands::Tests { action } => {
            run_resource(context(&cli, &cwd)?, ResourceKind::Test, action).await
        }
    }
}

/// Project settings layered with environment variables and flags.
fn context(cli: &Cli, cwd: &Path) -> Result<ConfigContext> {
    let ctx = ConfigContext::load(cwd)?
        .with_environment(cli.environment.clone())
        .with_residency(cli.residency.clone())
        .with_api_key(cli.api_key.clone());
    tracing::debug!(
        root = %ctx.root,
        environment = %ctx.environment,
        residency = %ctx.residency,
        "resolved configuration"
    );
    Ok(ctx)
}

async fn run_resource(ctx: ConfigContext, kind: ResourceKind, action: ResourceAction) -> Result<()> {
    let remote = HttpRemote::new(&ctx);
    match action {
        ResourceAction::Pull(args) => commands::run_pull(ctx, &remote, kind, &args).await,
        ResourceAction::Push(args) => commands::run_push(ctx, &remote, kind, &args).await,
        ResourceAction::Delete(args) => commands::run_delete(ctx, &remote, kind, &args).await,
        ResourceAction::Status { json } | ResourceAction::List { json } => {
            commands::run_status(ctx, &remote, kind, json)
        }
    }
}
