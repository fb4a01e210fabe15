//! Read-only view of an index and its config files

use serde::Serialize;

use crate::Result;
use crate::resource::ResourceKind;

use super::executor::SyncExecutor;

/// Local state of one tracked resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "detail")]
pub enum ResourceState {
    /// Has a remote id.
    Created,
    /// No remote id yet; the next push creates it.
    NotPushed,
    ConfigMissing,
    ConfigError(String),
}

impl ResourceState {
    pub fn describe(&self) -> String {
        match self {
            Self::Created => "Created".into(),
            Self::NotPushed => "Not pushed yet".into(),
            Self::ConfigMissing => "Config file not found".into(),
            Self::ConfigError(e) => format!("Config error: {e}"),
        }
    }
}

/// One line of `status` / `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub name: String,
    pub config: String,
    pub id: Option<String>,
    pub env: Option<String>,
    #[serde(flatten)]
    pub state: ResourceState,
}

impl SyncExecutor<'_> {
    /// Describe every entry of the kind's index. Nothing remote is touched.
    pub fn status(&self, kind: ResourceKind) -> Result<Vec<StatusRow>> {
        let index = self.load_index(kind)?;

        let rows = index
            .entries()
            .iter()
            .map(|entry| {
                let path = self.context().resolve(&entry.config);
                let (name, config_state) = if !path.is_file() {
                    (format!("Unknown {}", kind.noun()), Some(ResourceState::ConfigMissing))
                } else {
                    match self.read_config(entry) {
                        Ok(config) => (
                            kind.display_name(&config)
                                .unwrap_or_else(|| format!("Unnamed {}", kind.noun())),
                            None,
                        ),
                        Err(e) => (
                            format!("Unknown {}", kind.noun()),
                            Some(ResourceState::ConfigError(e.to_string())),
                        ),
                    }
                };
                let state = config_state.unwrap_or(if entry.remote_id().is_some() {
                    ResourceState::Created
                } else {
                    ResourceState::NotPushed
                });
                StatusRow {
                    name,
                    config: entry.config.clone(),
                    id: entry.remote_id().map(str::to_string),
                    env: entry.env.clone(),
                    state,
                }
            })
            .collect();
        Ok(rows)
    }
}
