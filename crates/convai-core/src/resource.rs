//! Resource kinds and the mapping between local files and remote bodies
//!
//! Each kind has its own index file, config directory and body shape. The
//! functions here are pure: callers do the casing conversion and I/O.

use std::fmt;

use serde_json::{Map, Value, json};

/// The three kinds of remote resource kept in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Agent,
    Tool,
    Test,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Agent, ResourceKind::Tool, ResourceKind::Test];

    /// Index file name at the project root.
    pub fn index_file(self) -> &'static str {
        match self {
            Self::Agent => "agents.json",
            Self::Tool => "tools.json",
            Self::Test => "tests.json",
        }
    }

    /// Top-level key holding the entry list inside the index file.
    pub fn list_key(self) -> &'static str {
        match self {
            Self::Agent => "agents",
            Self::Tool => "tools",
            Self::Test => "tests",
        }
    }

    /// Default directory for newly materialized config files.
    pub fn config_dir(self) -> &'static str {
        match self {
            Self::Agent => "agent_configs",
            Self::Tool => "tool_configs",
            Self::Test => "test_configs",
        }
    }

    /// Capitalized singular name for messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::Agent => "Agent",
            Self::Tool => "Tool",
            Self::Test => "Test",
        }
    }

    /// Fields probed, in order, for a remote item's id.
    pub fn id_fields(self) -> &'static [&'static str] {
        match self {
            Self::Agent => &["agentId", "agent_id", "id"],
            Self::Tool => &["id", "toolId", "tool_id"],
            Self::Test => &["id"],
        }
    }

    /// Extract the remote id from a listing or detail body.
    pub fn remote_id(self, item: &Value) -> Option<String> {
        self.id_fields()
            .iter()
            .find_map(|field| non_empty_str(item.get(*field)))
    }

    /// Human-readable name of a listing item, detail body or local config.
    pub fn display_name(self, item: &Value) -> Option<String> {
        if self == Self::Tool {
            let nested = ["toolConfig", "tool_config"]
                .iter()
                .find_map(|key| non_empty_str(item.get(*key).and_then(|c| c.get("name"))));
            if nested.is_some() {
                return nested;
            }
        }
        non_empty_str(item.get("name"))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.list_key())
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// A config body ready to be written locally, plus the index `type` to record.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalBody {
    pub body: Value,
    pub entry_type: Option<String>,
}

/// Why a remote detail could not be turned into a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingWarning(pub String);

impl fmt::Display for MappingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shape a remote detail (already converted to local case) into a local file.
///
/// `fallback_name` is used for agents whose detail carries no name.
pub fn local_body(
    kind: ResourceKind,
    detail: &Value,
    fallback_name: &str,
) -> Result<LocalBody, MappingWarning> {
    match kind {
        ResourceKind::Agent => {
            let mut body = Map::new();
            let name = non_empty_str(detail.get("name")).unwrap_or_else(|| fallback_name.to_string());
            body.insert("name".into(), Value::String(name));
            body.insert(
                "conversation_config".into(),
                field_or(detail, "conversation_config", json!({})),
            );
            body.insert(
                "platform_settings".into(),
                field_or(detail, "platform_settings", json!({})),
            );
            if let Some(workflow) = detail.get("workflow").filter(|w| !w.is_null()) {
                body.insert("workflow".into(), workflow.clone());
            }
            body.insert("tags".into(), field_or(detail, "tags", json!([])));
            Ok(LocalBody {
                body: Value::Object(body),
                entry_type: None,
            })
        }
        ResourceKind::Tool => {
            let config = detail
                .get("tool_config")
                .filter(|c| c.is_object())
                .ok_or_else(|| MappingWarning(format!("No tool_config found for tool {fallback_name}")))?;
            let entry_type = non_empty_str(config.get("type")).unwrap_or_else(|| "unknown".into());
            Ok(LocalBody {
                body: config.clone(),
                entry_type: Some(entry_type),
            })
        }
        ResourceKind::Test => {
            let mut body = detail.as_object().cloned().unwrap_or_default();
            body.remove("id");
            let entry_type = non_empty_str(body.get("type")).unwrap_or_else(|| "conversational".into());
            Ok(LocalBody {
                body: Value::Object(body),
                entry_type: Some(entry_type),
            })
        }
    }
}

fn field_or(detail: &Value, key: &str, default: Value) -> Value {
    match detail.get(key) {
        Some(v) if !v.is_null() => v.clone(),
        _ => default,
    }
}

/// Shape a local config (already converted to remote case) into a request body.
pub fn remote_body(kind: ResourceKind, config: &Value) -> Value {
    match kind {
        ResourceKind::Agent => {
            let mut body = Map::new();
            if let Some(name) = config.get("name") {
                body.insert("name".into(), name.clone());
            }
            let mut conversation = field_or(config, "conversationConfig", json!({}));
            strip_deprecated_prompt_tools(&mut conversation);
            body.insert("conversationConfig".into(), conversation);
            body.insert(
                "platformSettings".into(),
                field_or(config, "platformSettings", json!({})),
            );
            if let Some(workflow) = config.get("workflow").filter(|w| !w.is_null()) {
                body.insert("workflow".into(), workflow.clone());
            }
            body.insert("tags".into(), field_or(config, "tags", json!([])));
            Value::Object(body)
        }
        ResourceKind::Tool => json!({ "toolConfig": config }),
        ResourceKind::Test => config.clone(),
    }
}

/// Drop `agent.prompt.tools` when `agent.prompt.toolIds` is present.
///
/// The API rejects bodies that carry both the inline tool list and tool ids.
pub fn strip_deprecated_prompt_tools(conversation_config: &mut Value) {
    let Some(prompt) = conversation_config
        .get_mut("agent")
        .and_then(|agent| agent.get_mut("prompt"))
        .and_then(Value::as_object_mut)
    else {
        return;
    };
    if prompt.contains_key("toolIds") && prompt.shift_remove("tools").is_some() {
        tracing::debug!("dropped deprecated prompt.tools in favour of prompt.toolIds");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn agent_id_probes_all_spellings() {
        let kind = ResourceKind::Agent;
        assert_eq!(kind.remote_id(&json!({"agentId": "a1"})), Some("a1".into()));
        assert_eq!(kind.remote_id(&json!({"agent_id": "a2"})), Some("a2".into()));
        assert_eq!(kind.remote_id(&json!({"id": "a3"})), Some("a3".into()));
        assert_eq!(kind.remote_id(&json!({"agentId": ""})), None);
        assert_eq!(kind.remote_id(&json!({"name": "x"})), None);
    }

    #[test]
    fn tool_name_comes_from_tool_config() {
        let item = json!({"id": "t1", "toolConfig": {"name": "lookup"}});
        assert_eq!(ResourceKind::Tool.display_name(&item), Some("lookup".into()));
        assert_eq!(
            ResourceKind::Tool.display_name(&json!({"name": "flat"})),
            Some("flat".into())
        );
    }

    #[test]
    fn agent_local_body_fills_defaults() {
        let detail = json!({"agent_id": "a1", "name": "Support", "conversation_config": {"agent": {}}});
        let mapped = local_body(ResourceKind::Agent, &detail, "ignored").unwrap();
        assert_eq!(
            mapped.body,
            json!({
                "name": "Support",
                "conversation_config": {"agent": {}},
                "platform_settings": {},
                "tags": []
            })
        );
        assert_eq!(mapped.entry_type, None);
    }

    #[test]
    fn agent_local_body_keeps_workflow() {
        let detail = json!({"name": "W", "workflow": {"nodes": {}}});
        let mapped = local_body(ResourceKind::Agent, &detail, "W").unwrap();
        assert_eq!(mapped.body["workflow"], json!({"nodes": {}}));
    }

    #[test]
    fn tool_without_config_is_a_warning() {
        let err = local_body(ResourceKind::Tool, &json!({"id": "t1"}), "lookup").unwrap_err();
        assert_eq!(err.0, "No tool_config found for tool lookup");
    }

    #[test]
    fn test_body_drops_id_and_defaults_type() {
        let mapped = local_body(ResourceKind::Test, &json!({"id": "x", "name": "T"}), "T").unwrap();
        assert_eq!(mapped.body, json!({"name": "T"}));
        assert_eq!(mapped.entry_type.as_deref(), Some("conversational"));
    }

    #[test]
    fn agent_remote_body_strips_tools_when_tool_ids_present() {
        let config = json!({
            "name": "A",
            "conversationConfig": {"agent": {"prompt": {"prompt": "p", "tools": [{"name": "x"}], "toolIds": ["t1"]}}}
        });
        let body = remote_body(ResourceKind::Agent, &config);
        assert_eq!(
            body["conversationConfig"]["agent"]["prompt"],
            json!({"prompt": "p", "toolIds": ["t1"]})
        );
        assert_eq!(body["platformSettings"], json!({}));
        assert_eq!(body["tags"], json!([]));
    }

    #[test]
    fn agent_remote_body_keeps_tools_without_tool_ids() {
        let config = json!({"conversationConfig": {"agent": {"prompt": {"tools": [{"name": "x"}]}}}});
        let body = remote_body(ResourceKind::Agent, &config);
        assert_eq!(
            body["conversationConfig"]["agent"]["prompt"]["tools"],
            json!([{"name": "x"}])
        );
    }

    #[test]
    fn tool_remote_body_wraps_config() {
        let body = remote_body(ResourceKind::Tool, &json!({"name": "lookup"}));
        assert_eq!(body, json!({"toolConfig": {"name": "lookup"}}));
    }
}
