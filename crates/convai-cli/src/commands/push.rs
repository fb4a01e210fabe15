//! Push command implementation

use colored::Colorize;
use convai_core::{ConfigContext, PushOptions, RemoteApi, ResourceKind, SyncExecutor};

use crate::cli::PushArgs;
use crate::error::Result;

use super::finish;

/// Run the push command
pub async fn run_push(
    ctx: ConfigContext,
    remote: &dyn RemoteApi,
    kind: ResourceKind,
    args: &PushArgs,
) -> Result<()> {
    let opts = PushOptions {
        resource_id: args.id.clone(),
        dry_run: args.dry_run,
        version_description: args.version_description.clone(),
    };
    let executor = SyncExecutor::new(ctx, remote);

    println!("{} Pushing {} to the platform...", "=>".blue().bold(), kind);
    let report = executor.push(kind, &opts).await?;
    if report.is_empty() {
        println!("No {} to push.", kind);
        return Ok(());
    }
    finish(&report, "Push")
}

#[cfg(test)]
mod tests {
    use super::*;
    use convai_test_utils::{MockOp, MockRemote, TestProject};
    use serde_json::json;

    #[tokio::test]
    async fn dry_run_leaves_remote_alone() {
        let project = TestProject::new().initialized();
        project.add_resource(ResourceKind::Tool, "tool_configs/t.json", None, &json!({"name": "t"}));
        let remote = MockRemote::new();
        let args = PushArgs {
            id: None,
            dry_run: true,
            version_description: None,
        };

        run_push(project.context(), &remote, ResourceKind::Tool, &args)
            .await
            .unwrap();

        assert!(remote.calls_of(MockOp::Create).is_empty());
    }

    #[tokio::test]
    async fn failures_turn_into_an_error() {
        let project = TestProject::new().initialized();
        project.add_resource(ResourceKind::Agent, "agent_configs/a.json", None, &json!({"name": "A"}));
        let remote = MockRemote::new().fail_on(MockOp::Create, "A");
        let args = PushArgs {
            id: None,
            dry_run: false,
            version_description: None,
        };

        let err = run_push(project.context(), &remote, ResourceKind::Agent, &args)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Push finished with 1 failure(s)");
    }
}
