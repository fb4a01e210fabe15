//! [`RemoteApi`] over the platform's REST API
//!
//! The wire format is snake_case. Bodies arrive here in remote (camel)
//! case and are converted on the way out; responses are converted back
//! before they reach the sync engine.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};

use convai_core::{
    ConfigContext, Error, MutationReceipt, RemoteApi, RemoteSummary, ResourceKind, Result,
    to_local_case, to_remote_case,
};

const API_KEY_HEADER: &str = "xi-api-key";

/// API host for a residency region. Unknown regions use the default host.
pub fn base_url(residency: &str) -> &'static str {
    match residency {
        "eu-residency" => "https://api.eu.residency.elevenlabs.io",
        "in-residency" => "https://api.in.residency.elevenlabs.io",
        _ => "https://api.elevenlabs.io",
    }
}

fn collection(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Agent => "/v1/convai/agents",
        ResourceKind::Tool => "/v1/convai/tools",
        ResourceKind::Test => "/v1/convai/agent-testing",
    }
}

fn create_path(kind: ResourceKind) -> String {
    match kind {
        ResourceKind::Tool => collection(kind).to_string(),
        _ => format!("{}/create", collection(kind)),
    }
}

fn update_method(kind: ResourceKind) -> Method {
    match kind {
        ResourceKind::Test => Method::PUT,
        _ => Method::PATCH,
    }
}

/// Remote client backed by `reqwest`.
///
/// A missing API key is only reported when a request is about to be sent,
/// so dry runs and local commands work without credentials.
pub struct HttpRemote {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpRemote {
    pub fn new(ctx: &ConfigContext) -> Self {
        Self::with_base_url(base_url(&ctx.residency), ctx.api_key.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn api_key(&self, operation: &str) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            Error::remote(
                operation,
                "no API key configured; set ELEVENLABS_API_KEY or pass --api-key",
            )
        })
    }

    /// Send one request and return the response body in remote case.
    async fn send(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let key = self.api_key(operation)?;
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "remote request");

        let mut request = self
            .client
            .request(method, &url)
            .header(API_KEY_HEADER, key)
            .query(query);
        if let Some(body) = body {
            request = request.json(&to_local_case(body));
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::remote(operation, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::remote(operation, e))?;

        if !status.is_success() {
            return Err(Error::remote(operation, error_message(status, &text)));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let parsed: Value = serde_json::from_str(&text).map_err(|e| Error::UnexpectedResponse {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;
        Ok(to_remote_case(&parsed))
    }
}

/// `"<status>: <detail>"`, preferring the API's `detail` message.
fn error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        match v.get("detail") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Object(o)) => o.get("message").and_then(Value::as_str).map(str::to_string),
            _ => None,
        }
    });
    format!("{status}: {}", detail.unwrap_or_else(|| body.trim().to_string()))
}

/// Items and continuation cursor of one listing page (remote case).
fn page_items(kind: ResourceKind, page: &Value) -> (Vec<Value>, Option<String>) {
    let items = page
        .get(kind.list_key())
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let more = page.get("hasMore").and_then(Value::as_bool).unwrap_or(false);
    let cursor = page
        .get("nextCursor")
        .and_then(Value::as_str)
        .filter(|c| more && !c.is_empty())
        .map(str::to_string);
    (items, cursor)
}

#[async_trait]
impl RemoteApi for HttpRemote {
    async fn list(&self, kind: ResourceKind, page_size: u32) -> Result<Vec<RemoteSummary>> {
        let mut summaries = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut query = vec![("page_size", page_size.to_string())];
            if let Some(cursor) = &cursor {
                query.push(("cursor", cursor.clone()));
            }
            let page = self
                .send("list", Method::GET, collection(kind), &query, None)
                .await?;
            let (items, next) = page_items(kind, &page);
            summaries.extend(items.iter().map(|item| RemoteSummary::from_value(kind, item)));
            match next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        tracing::debug!(kind = %kind, count = summaries.len(), "listed remote resources");
        Ok(summaries)
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Value> {
        let path = format!("{}/{}", collection(kind), id);
        self.send("get", Method::GET, &path, &[], None).await
    }

    async fn create(&self, kind: ResourceKind, body: &Value) -> Result<MutationReceipt> {
        let response = self
            .send("create", Method::POST, &create_path(kind), &[], Some(body))
            .await?;
        MutationReceipt::from_value(kind, &response, None).ok_or_else(|| Error::UnexpectedResponse {
            operation: "create".into(),
            message: format!("no {} id in response", kind.noun().to_lowercase()),
        })
    }

    async fn update(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<MutationReceipt> {
        let path = format!("{}/{}", collection(kind), id);
        let response = self
            .send("update", update_method(kind), &path, &[], Some(body))
            .await?;
        Ok(MutationReceipt::from_value(kind, &response, Some(id)).unwrap_or_else(|| MutationReceipt::new(id)))
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<()> {
        let path = format!("{}/{}", collection(kind), id);
        self.send("delete", Method::DELETE, &path, &[], None).await?;
        Ok(())
    }

    async fn run_tests(&self, agent_id: &str, test_ids: &[String]) -> Result<String> {
        let path = format!("{}/{}/run-tests", collection(ResourceKind::Agent), agent_id);
        let tests: Vec<Value> = test_ids.iter().map(|id| json!({ "testId": id })).collect();
        let body = json!({ "tests": tests });
        let response = self
            .send("run tests", Method::POST, &path, &[], Some(&body))
            .await?;
        response
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::UnexpectedResponse {
                operation: "run tests".into(),
                message: "no invocation id in response".into(),
            })
    }

    async fn get_test_invocation(&self, invocation_id: &str) -> Result<Value> {
        let path = format!("/v1/convai/test-invocations/{invocation_id}");
        self.send("get test invocation", Method::GET, &path, &[], None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn residency_hosts() {
        assert_eq!(base_url("us"), "https://api.elevenlabs.io");
        assert_eq!(base_url("global"), "https://api.elevenlabs.io");
        assert_eq!(base_url("eu-residency"), "https://api.eu.residency.elevenlabs.io");
        assert_eq!(base_url("in-residency"), "https://api.in.residency.elevenlabs.io");
    }

    #[test]
    fn endpoints_per_kind() {
        assert_eq!(create_path(ResourceKind::Agent), "/v1/convai/agents/create");
        assert_eq!(create_path(ResourceKind::Tool), "/v1/convai/tools");
        assert_eq!(create_path(ResourceKind::Test), "/v1/convai/agent-testing/create");
        assert_eq!(update_method(ResourceKind::Test), Method::PUT);
        assert_eq!(update_method(ResourceKind::Agent), Method::PATCH);
    }

    #[test]
    fn paging_stops_without_more() {
        let page = json!({"agents": [{"agentId": "a"}], "nextCursor": "c2", "hasMore": true});
        let (items, cursor) = page_items(ResourceKind::Agent, &page);
        assert_eq!(items.len(), 1);
        assert_eq!(cursor.as_deref(), Some("c2"));

        let last = json!({"agents": [], "nextCursor": "c3", "hasMore": false});
        assert_eq!(page_items(ResourceKind::Agent, &last).1, None);
        assert_eq!(page_items(ResourceKind::Tool, &json!({})), (vec![], None));
    }

    #[test]
    fn error_message_prefers_detail() {
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, r#"{"detail": {"message": "Agent not found"}}"#),
            "404 Not Found: Agent not found"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "502 Bad Gateway: upstream down"
        );
    }

    #[tokio::test]
    async fn missing_key_fails_before_sending() {
        let remote = HttpRemote::with_base_url("http://127.0.0.1:9", None);
        let err = remote.get(ResourceKind::Agent, "a1").await.unwrap_err();
        assert!(err.to_string().contains("ELEVENLABS_API_KEY"), "got: {err}");
    }
}
