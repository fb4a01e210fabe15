//! Init command implementation

use std::path::Path;

use colored::Colorize;
use convai_core::init_project;
use convai_fs::NormalizedPath;

use crate::error::Result;

/// Run the init command
pub fn run_init(path: &Path, overwrite: bool) -> Result<()> {
    let root = NormalizedPath::new(path);
    println!("{} Initializing project in {}", "=>".blue().bold(), root);
    if overwrite {
        println!("{} existing files will be overwritten", "warning:".yellow().bold());
    }

    let report = init_project(&root, overwrite)?;
    for created in &report.created {
        println!("   {} {}", "+".green(), created);
    }
    for skipped in &report.skipped {
        println!("   {} {} {}", "-".dimmed(), skipped, "(already exists, skipped)".dimmed());
    }

    println!();
    println!("{} Project initialized.", "OK".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Set {} in your environment", "ELEVENLABS_API_KEY".cyan());
    println!("  2. Fetch existing agents with {}", "convai agents pull".cyan());
    println!("  3. Send local changes with {}", "convai agents push".cyan());
    Ok(())
}
