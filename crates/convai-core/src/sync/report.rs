//! Outcome of a sync batch

use serde::{Deserialize, Serialize};

/// Per-outcome tallies for one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub deleted: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Report from a pull, push or delete.
///
/// Per-resource problems land in `warnings` (skipped, batch unaffected) or
/// `errors` (the resource failed); neither aborts the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// False once any resource failed
    pub success: bool,
    /// Actions taken, or in dry-run the actions that would be taken
    pub actions: Vec<String>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub counts: SyncCounts,
}

impl SyncReport {
    pub fn success() -> Self {
        Self {
            success: true,
            actions: Vec::new(),
            warnings: Vec::new(),
            errors: Vec::new(),
            counts: SyncCounts::default(),
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.push(action.into());
        self
    }

    pub fn action(&mut self, action: impl Into<String>) {
        self.actions.push(action.into());
    }

    /// Record a skipped resource.
    pub fn warn(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Record a failed resource and mark the batch unsuccessful.
    pub fn fail(&mut self, error: impl Into<String>) {
        let error = error.into();
        tracing::warn!("{error}");
        self.errors.push(error);
        self.counts.failed += 1;
        self.success = false;
    }

    /// True when nothing was done and nothing went wrong.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }
}

impl Default for SyncReport {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_flips_success() {
        let mut report = SyncReport::success().with_action("Created agent: A");
        assert!(report.success);

        report.fail("Failed to push agent B: boom");

        assert!(!report.success);
        assert_eq!(report.counts.failed, 1);
        assert_eq!(report.actions.len(), 1);
    }

    #[test]
    fn warnings_do_not_fail_the_batch() {
        let mut report = SyncReport::success();
        report.warn("Config file not found");
        assert!(report.success);
        assert!(!report.is_empty());
    }
}
