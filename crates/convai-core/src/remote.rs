//! The remote management API as seen by the sync engine
//!
//! Bodies crossing this seam use remote (camelCase) keys. Implementations
//! own transport, authentication and wire-format concerns.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::resource::ResourceKind;

/// One item of a remote listing.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteSummary {
    /// Absent when the item carries no recognizable id field.
    pub id: Option<String>,
    pub name: Option<String>,
}

impl RemoteSummary {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    /// Read id and name out of a raw listing item.
    pub fn from_value(kind: ResourceKind, item: &Value) -> Self {
        Self {
            id: kind.remote_id(item),
            name: kind.display_name(item),
        }
    }

    /// Name for messages, falling back to a generic label.
    pub fn label(&self, kind: ResourceKind) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Unnamed {}", kind.noun()))
    }
}

/// What the remote reports after a create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationReceipt {
    pub id: String,
    pub version_id: Option<String>,
    pub branch_id: Option<String>,
}

impl MutationReceipt {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Read a receipt from a response body; `fallback_id` is used when the
    /// body does not echo the id back.
    pub fn from_value(kind: ResourceKind, body: &Value, fallback_id: Option<&str>) -> Option<Self> {
        let id = kind
            .remote_id(body)
            .or_else(|| fallback_id.map(str::to_string))?;
        let text = |keys: &[&str]| {
            keys.iter()
                .find_map(|k| body.get(*k).and_then(Value::as_str))
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        Some(Self {
            id,
            version_id: text(&["versionId", "version_id"]),
            branch_id: text(&["branchId", "branch_id"]),
        })
    }
}

/// Remote management API.
///
/// Every call is awaited before the next one is issued; implementations do
/// not need to be reentrant, only `Send + Sync`.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// List resources of a kind, fetching pages of `page_size` until done.
    async fn list(&self, kind: ResourceKind, page_size: u32) -> Result<Vec<RemoteSummary>>;

    /// Fetch the full body of one resource.
    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Value>;

    async fn create(&self, kind: ResourceKind, body: &Value) -> Result<MutationReceipt>;

    async fn update(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<MutationReceipt>;

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<()>;

    /// Start a run of `test_ids` against an agent; returns the invocation id.
    async fn run_tests(&self, agent_id: &str, test_ids: &[String]) -> Result<String>;

    /// Current state of a test invocation, including its `testRuns`.
    async fn get_test_invocation(&self, invocation_id: &str) -> Result<Value>;
}
