//! Running an agent's attached tests and waiting for the results

use std::time::Duration;

use serde_json::Value;

use crate::resource::ResourceKind;
use crate::{Error, Result};

use super::executor::SyncExecutor;

/// How long to wait for a test invocation to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

/// Final status of one test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Passed,
    Failed,
}

/// One settled test run.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRunResult {
    pub name: String,
    pub status: RunStatus,
    /// The run as returned by the remote, for detailed reporting.
    pub raw: Value,
}

/// Outcome of [`SyncExecutor::run_agent_tests`].
#[derive(Debug, Clone, PartialEq)]
pub struct TestInvocationReport {
    pub agent_id: String,
    pub invocation_id: String,
    pub runs: Vec<TestRunResult>,
    /// Runs the remote returned without a status.
    pub warnings: Vec<String>,
}

impl TestInvocationReport {
    pub fn passed(&self) -> usize {
        self.runs.iter().filter(|r| r.status == RunStatus::Passed).count()
    }

    pub fn failed(&self) -> usize {
        self.runs.iter().filter(|r| r.status == RunStatus::Failed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Test ids attached to an agent config (local case).
pub fn attached_test_ids(config: &Value) -> Vec<String> {
    config
        .pointer("/platform_settings/testing/attached_tests")
        .and_then(Value::as_array)
        .map(|tests| {
            tests
                .iter()
                .filter_map(|t| t.get("test_id").and_then(Value::as_str))
                .filter(|id| !id.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn str_field<'v>(run: &'v Value, keys: &[&str]) -> Option<&'v str> {
    keys.iter()
        .find_map(|k| run.get(*k).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
}

fn run_name(run: &Value) -> String {
    str_field(run, &["testName", "test_name"])
        .or_else(|| str_field(run, &["testId", "test_id"]))
        .unwrap_or("Unknown")
        .to_string()
}

fn test_runs(invocation: &Value) -> &[Value] {
    ["testRuns", "test_runs"]
        .iter()
        .find_map(|k| invocation.get(*k).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Settled results, or `None` while any run is still in progress.
///
/// Runs without a status are left out and reported as warnings; at least
/// one run must carry a status for the invocation to count as settled.
fn settled(invocation: &Value) -> Option<(Vec<TestRunResult>, Vec<String>)> {
    let mut results = Vec::new();
    let mut warnings = Vec::new();
    for run in test_runs(invocation) {
        let name = run_name(run);
        let status = match str_field(run, &["status"]) {
            Some("passed") => RunStatus::Passed,
            Some("failed") => RunStatus::Failed,
            Some(_) => return None,
            None => {
                warnings.push(format!("Test run {name} has no status"));
                continue;
            }
        };
        results.push(TestRunResult {
            name,
            status,
            raw: run.clone(),
        });
    }
    if results.is_empty() {
        None
    } else {
        Some((results, warnings))
    }
}

impl SyncExecutor<'_> {
    /// Run the tests attached to a tracked agent and wait for the outcome.
    ///
    /// # Errors
    ///
    /// [`Error::ResourceNotFound`] if the agent is not in the index,
    /// [`Error::NoAttachedTests`] if its config lists none, and
    /// [`Error::PollTimeout`] if results do not settle in time.
    pub async fn run_agent_tests(
        &self,
        agent_id: &str,
        poll: PollConfig,
    ) -> Result<TestInvocationReport> {
        let kind = ResourceKind::Agent;
        let index = self.load_index(kind)?;
        let entry = index.find(agent_id).ok_or_else(|| Error::ResourceNotFound {
            kind,
            id: agent_id.to_string(),
        })?;
        let config = self.read_config(entry)?;

        let test_ids = attached_test_ids(&config);
        if test_ids.is_empty() {
            return Err(Error::NoAttachedTests {
                agent: kind.display_name(&config).unwrap_or_else(|| agent_id.to_string()),
            });
        }

        let invocation_id = self.remote().run_tests(agent_id, &test_ids).await?;
        tracing::info!(agent_id, invocation_id, tests = test_ids.len(), "started test run");

        for attempt in 1..=poll.max_attempts {
            let invocation = self.remote().get_test_invocation(&invocation_id).await?;
            if let Some((runs, warnings)) = settled(&invocation) {
                tracing::debug!(attempt, "test invocation settled");
                return Ok(TestInvocationReport {
                    agent_id: agent_id.to_string(),
                    invocation_id,
                    runs,
                    warnings,
                });
            }
            tracing::debug!(attempt, max = poll.max_attempts, "test invocation still running");
            if attempt < poll.max_attempts {
                tokio::time::sleep(poll.interval).await;
            }
        }

        Err(Error::PollTimeout {
            invocation_id,
            attempts: poll.max_attempts,
        })
    }
}
