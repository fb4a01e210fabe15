//! Interactive prompts for CLI commands

use dialoguer::Confirm;

use crate::error::Result;

/// Ask a yes/no question on the terminal, defaulting to yes.
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(true).interact()?)
}
