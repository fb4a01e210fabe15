//! Agent test command implementation

use colored::Colorize;
use convai_core::{ConfigContext, PollConfig, RemoteApi, RunStatus, SyncExecutor};

use crate::error::{CliError, Result};

/// Run an agent's attached tests; fails when any test failed.
pub async fn run_agent_test(
    ctx: ConfigContext,
    remote: &dyn RemoteApi,
    agent_id: &str,
    poll: PollConfig,
) -> Result<()> {
    let executor = SyncExecutor::new(ctx, remote);

    println!("{} Running tests for agent {}...", "=>".blue().bold(), agent_id.cyan());
    println!("Waiting for tests to complete...");
    let report = executor.run_agent_tests(agent_id, poll).await?;

    println!();
    println!("{}", format!("Test Results ({})", report.invocation_id).bold());
    println!("{}", "=".repeat(50));
    for run in &report.runs {
        match run.status {
            RunStatus::Passed => println!("  {} {}: passed", "ok".green().bold(), run.name),
            RunStatus::Failed => println!("  {} {}: failed", "FAIL".red().bold(), run.name),
        }
    }
    for warning in &report.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    println!("{}", "=".repeat(50));
    println!(
        "Total: {} | Passed: {} | Failed: {}",
        report.runs.len(),
        report.passed(),
        report.failed()
    );

    if report.all_passed() {
        Ok(())
    } else {
        Err(CliError::user(format!("{} test(s) failed", report.failed())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use convai_core::ResourceKind;
    use convai_test_utils::{MockRemote, TestProject};
    use serde_json::json;

    #[tokio::test]
    async fn failing_run_is_an_error() {
        let project = TestProject::new().initialized();
        project.add_resource(
            ResourceKind::Agent,
            "agent_configs/a.json",
            Some("ag_1"),
            &json!({"name": "A", "platform_settings": {"testing": {"attached_tests": [{"test_id": "t1"}]}}}),
        );
        let remote = MockRemote::new()
            .with_invocation_states(vec![json!({"testRuns": [{"testId": "t1", "status": "failed"}]})]);

        let err = run_agent_test(project.context(), &remote, "ag_1", PollConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "1 test(s) failed");
    }
}
