//! Delete command implementation

use colored::Colorize;
use convai_core::{ConfigContext, DeleteOptions, DeleteTarget, RemoteApi, ResourceKind, SyncExecutor};

use crate::cli::DeleteArgs;
use crate::error::{CliError, Result};
use crate::interactive;

use super::finish;

/// Run the delete command
///
/// `--all` removes every entry tagged with the current environment (or
/// untagged) and asks first unless `--yes` or `--dry-run` is given.
pub async fn run_delete(
    ctx: ConfigContext,
    remote: &dyn RemoteApi,
    kind: ResourceKind,
    args: &DeleteArgs,
) -> Result<()> {
    let target = match (&args.id, args.all) {
        (Some(id), false) => DeleteTarget::One(id.clone()),
        (None, true) => DeleteTarget::All { environment: None },
        _ => return Err(CliError::user("Pass either a resource ID or --all")),
    };

    if let DeleteTarget::All { .. } = target
        && !args.dry_run
        && !args.yes
    {
        let prompt = format!(
            "Delete ALL {} in environment '{}' locally and on the platform?",
            kind, ctx.environment
        );
        if !interactive::confirm(&prompt)? {
            println!("Delete cancelled.");
            return Ok(());
        }
    }

    let executor = SyncExecutor::new(ctx, remote);
    println!("{} Deleting {}...", "=>".blue().bold(), kind);
    let report = executor
        .delete(kind, &target, &DeleteOptions { dry_run: args.dry_run })
        .await?;
    if report.is_empty() {
        println!("No {} matched.", kind);
        return Ok(());
    }
    finish(&report, "Delete")
}

#[cfg(test)]
mod tests {
    use super::*;
    use convai_test_utils::{MockRemote, TestProject};
    use serde_json::json;

    #[tokio::test]
    async fn delete_one_by_id() {
        let project = TestProject::new().initialized();
        project.add_resource(ResourceKind::Test, "test_configs/t.json", Some("t1"), &json!({"name": "T"}));
        let remote = MockRemote::new().with_resource(ResourceKind::Test, "t1", json!({}));
        let args = DeleteArgs {
            id: Some("t1".into()),
            all: false,
            dry_run: false,
            yes: false,
        };

        run_delete(project.context(), &remote, ResourceKind::Test, &args)
            .await
            .unwrap();

        assert!(project.index_entries(ResourceKind::Test).is_empty());
        project.assert_file_not_exists("test_configs/t.json");
    }
}
