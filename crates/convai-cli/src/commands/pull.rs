//! Pull command implementation

use colored::Colorize;
use convai_core::{
    ConfigContext, PlanAction, PullFlags, PullOptions, PullPlan, RemoteApi, ResourceKind,
    SyncExecutor,
};

use crate::cli::PullArgs;
use crate::error::Result;
use crate::interactive;

use super::finish;

fn options(args: &PullArgs) -> PullOptions {
    PullOptions {
        resource_id: args.id.clone(),
        output_dir: args.output_dir.clone(),
        flags: PullFlags {
            update: args.update,
            all: args.all,
        },
        dry_run: args.dry_run,
    }
}

/// Run the pull command
///
/// Plans first, shows the plan, asks before writing unless `--yes` or
/// `--dry-run` is given.
pub async fn run_pull(
    ctx: ConfigContext,
    remote: &dyn RemoteApi,
    kind: ResourceKind,
    args: &PullArgs,
) -> Result<()> {
    let opts = options(args);
    let executor = SyncExecutor::new(ctx, remote);

    println!("{} Pulling {} from the platform...", "=>".blue().bold(), kind);
    let pull = executor.plan_pull(kind, &opts).await?;

    if pull.is_empty() {
        println!("No {} found on the platform.", kind);
        return Ok(());
    }
    print_plan(&pull, opts.flags);

    if pull.plan.is_noop() {
        return Ok(());
    }
    if !opts.dry_run && !args.yes && !interactive::confirm("Proceed?")? {
        println!("Pull cancelled.");
        return Ok(());
    }

    let report = executor.apply_pull(pull, &opts).await?;
    finish(&report, "Pull")
}

fn print_plan(pull: &PullPlan, flags: PullFlags) {
    let plan = &pull.plan;
    for warning in &plan.warnings {
        println!("   {} {}", "!".yellow(), warning);
    }
    for item in &plan.items {
        let marker = match item.action {
            PlanAction::Create => "+".green(),
            PlanAction::Update => "~".yellow(),
            PlanAction::Skip => "-".dimmed(),
        };
        println!(
            "   {} {} {} {}",
            marker,
            item.action.as_str(),
            item.name.cyan(),
            format!("({})", item.id).dimmed()
        );
    }

    let counts = &plan.counts;
    println!();
    println!(
        "Plan: {} create, {} update, {} skip",
        counts.create, counts.update, counts.skip
    );

    if counts.skip > 0 && !flags.update && !flags.all {
        let noun = pull.kind.to_string();
        if counts.create == 0 {
            println!(
                "Tip: use {} to refresh existing {noun} or {} to pull everything",
                "--update".cyan(),
                "--all".cyan()
            );
        } else {
            println!("Tip: use {} to also refresh existing {noun}", "--all".cyan());
        }
    }
}
