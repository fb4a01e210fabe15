//! Agent widget command implementation

use colored::Colorize;
use convai_core::{ConfigContext, RemoteApi, SyncExecutor};

use crate::error::Result;

/// Print the embed snippet for a tracked agent. Nothing remote is contacted.
pub fn run_widget(ctx: ConfigContext, remote: &dyn RemoteApi, agent_id: &str) -> Result<()> {
    let executor = SyncExecutor::new(ctx, remote);
    let widget = executor.widget(agent_id)?;

    println!(
        "{}",
        format!(
            "HTML Widget for agent '{}' (residency: {}):",
            widget.name, widget.residency
        )
        .bold()
    );
    println!("{}", "=".repeat(60));
    println!("{}", widget.snippet);
    println!("{}", "=".repeat(60));
    println!("{}: {}", "Agent ID".dimmed(), widget.agent_id.cyan());
    Ok(())
}
