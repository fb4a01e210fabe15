//! Command implementations for convai-cli

pub mod delete;
pub mod init;
pub mod pull;
pub mod push;
pub mod status;
pub mod test;
pub mod widget;

pub use delete::run_delete;
pub use init::run_init;
pub use pull::run_pull;
pub use push::run_push;
pub use status::run_status;
pub use test::run_agent_test;
pub use widget::run_widget;

use colored::Colorize;
use convai_core::SyncReport;

use crate::error::{CliError, Result};

/// Print a report's lines, then fail if any resource failed.
pub(crate) fn finish(report: &SyncReport, verb: &str) -> Result<()> {
    for action in &report.actions {
        println!("   {} {}", "+".green(), action);
    }
    for warning in &report.warnings {
        println!("   {} {}", "!".yellow(), warning);
    }
    for error in &report.errors {
        println!("   {} {}", "x".red(), error.red());
    }

    let counts = &report.counts;
    println!();
    if report.success {
        println!(
            "{} {} complete: {} created, {} updated, {} unchanged, {} deleted, {} skipped",
            "OK".green().bold(),
            verb,
            counts.created,
            counts.updated,
            counts.unchanged,
            counts.deleted,
            counts.skipped
        );
        Ok(())
    } else {
        Err(CliError::user(format!(
            "{verb} finished with {} failure(s)",
            counts.failed
        )))
    }
}
