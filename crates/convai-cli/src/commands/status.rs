//! Status and list command implementation

use colored::Colorize;
use convai_core::{ConfigContext, RemoteApi, ResourceKind, ResourceState, StatusRow, SyncExecutor};

use crate::error::Result;

/// Run the status (or list) command. Nothing remote is contacted.
pub fn run_status(
    ctx: ConfigContext,
    remote: &dyn RemoteApi,
    kind: ResourceKind,
    json: bool,
) -> Result<()> {
    let executor = SyncExecutor::new(ctx, remote);
    let rows = executor.status(kind)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", format!("{} ({})", kind, kind.index_file()).bold());
    println!();
    if rows.is_empty() {
        println!(
            "  {} (use {} to fetch existing ones)",
            "None".dimmed(),
            format!("convai {kind} pull").cyan()
        );
        return Ok(());
    }
    for row in &rows {
        print_row(row);
    }
    Ok(())
}

fn print_row(row: &StatusRow) {
    let state = match &row.state {
        ResourceState::Created => row.state.describe().green(),
        ResourceState::NotPushed => row.state.describe().yellow(),
        ResourceState::ConfigMissing | ResourceState::ConfigError(_) => row.state.describe().red(),
    };
    println!("  {} {}", "+".green(), row.name.cyan());
    println!("      {}: {}", "Config".dimmed(), row.config);
    println!(
        "      {}: {}",
        "ID".dimmed(),
        row.id.as_deref().unwrap_or("Not created yet")
    );
    if let Some(env) = &row.env {
        println!("      {}: {}", "Env".dimmed(), env);
    }
    println!("      {}: {}", "Status".dimmed(), state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use convai_test_utils::{MockRemote, TestProject};

    #[test]
    fn status_without_index_errors() {
        let project = TestProject::new();
        let err = run_status(project.context(), &MockRemote::new(), ResourceKind::Agent, false).unwrap_err();
        assert!(err.to_string().contains("convai init"));
    }

    #[test]
    fn status_on_empty_project() {
        let project = TestProject::new().initialized();
        run_status(project.context(), &MockRemote::new(), ResourceKind::Tool, true).unwrap();
    }
}
