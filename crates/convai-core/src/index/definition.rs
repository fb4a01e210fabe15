//! One entry of a resource index

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A locally known resource: where its config lives and what the remote
/// calls it.
///
/// `id` is absent until the resource has been created remotely. Fields this
/// tool does not know about are carried through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Config file path relative to the project root.
    pub config: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceDefinition {
    /// An entry for a config that has not been created remotely yet.
    pub fn new(config: impl Into<String>) -> Self {
        Self {
            config: config.into(),
            id: None,
            env: None,
            resource_type: None,
            version_id: None,
            branch_id: None,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type(mut self, resource_type: Option<String>) -> Self {
        self.resource_type = resource_type;
        self
    }

    pub fn with_env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// The remote id, treating an empty string as absent.
    pub fn remote_id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Whether this entry belongs to `environment`. Entries without an
    /// `env` field belong to every environment.
    pub fn in_environment(&self, environment: &str) -> bool {
        self.env.as_deref().is_none_or(|env| env == environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn minimal_entry_serializes_compactly() {
        let def = ResourceDefinition::new("agent_configs/a.json").with_id("ag_1");
        assert_eq!(
            serde_json::to_value(&def).unwrap(),
            json!({"config": "agent_configs/a.json", "id": "ag_1"})
        );
    }

    #[test]
    fn type_field_is_renamed() {
        let def = ResourceDefinition::new("t.json").with_type(Some("webhook".into()));
        assert_eq!(serde_json::to_value(&def).unwrap()["type"], "webhook");
    }

    #[test]
    fn unknown_fields_round_trip() {
        let raw = json!({"config": "a.json", "id": "x", "owner": "team-a"});
        let def: ResourceDefinition = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(def.extra["owner"], "team-a");
        assert_eq!(serde_json::to_value(&def).unwrap(), raw);
    }

    #[test]
    fn empty_id_counts_as_missing() {
        let def: ResourceDefinition = serde_json::from_value(json!({"config": "a.json", "id": ""})).unwrap();
        assert_eq!(def.remote_id(), None);
    }

    #[test]
    fn environment_filter() {
        let untagged = ResourceDefinition::new("a.json");
        let staging = ResourceDefinition::new("b.json").with_env("staging");
        assert!(untagged.in_environment("prod"));
        assert!(staging.in_environment("staging"));
        assert!(!staging.in_environment("prod"));
    }
}
