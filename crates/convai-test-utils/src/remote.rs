//! [`MockRemote`]: an in-memory remote API that records every call.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use convai_core::{Error, MutationReceipt, RemoteApi, RemoteSummary, ResourceKind, Result};
use serde_json::{Value, json};

/// Remote operations, for call assertions and failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    List,
    Get,
    Create,
    Update,
    Delete,
    RunTests,
    GetInvocation,
}

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub struct MockCall {
    pub op: MockOp,
    pub kind: Option<ResourceKind>,
    pub id: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct State {
    resources: HashMap<ResourceKind, Vec<(String, Value)>>,
    raw_listing: HashMap<ResourceKind, Vec<Value>>,
    failures: HashSet<(MockOp, String)>,
    calls: Vec<MockCall>,
    invocations: VecDeque<Value>,
    run_test_ids: Vec<String>,
    next_id: u32,
}

/// In-memory stand-in for the remote management API.
///
/// Stored bodies are in remote (camelCase) form. Listings are built from the
/// stored bodies with the kind's id field filled in, followed by any raw
/// items added with [`MockRemote::with_listing_item`].
///
/// # Example
///
/// ```rust,no_run
/// use convai_core::ResourceKind;
/// use convai_test_utils::MockRemote;
/// use serde_json::json;
///
/// let remote = MockRemote::new()
///     .with_resource(ResourceKind::Agent, "ag_1", json!({"name": "Support"}));
/// ```
#[derive(Default)]
pub struct MockRemote {
    state: Mutex<State>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a resource; `body` is its remote detail without the id field.
    pub fn with_resource(self, kind: ResourceKind, id: &str, body: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .resources
            .entry(kind)
            .or_default()
            .push((id.to_string(), body));
        self
    }

    /// Append a raw listing item that has no stored detail.
    pub fn with_listing_item(self, kind: ResourceKind, item: Value) -> Self {
        self.state
            .lock()
            .unwrap()
            .raw_listing
            .entry(kind)
            .or_default()
            .push(item);
        self
    }

    /// Make `op` on `id` fail. `RunTests` matches on the agent id and
    /// `Create` on the resource's display name.
    pub fn fail_on(self, op: MockOp, id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((op, id.to_string()));
        self
    }

    /// Responses for successive `get_test_invocation` calls. The last one
    /// repeats once the queue is drained.
    pub fn with_invocation_states(self, states: Vec<Value>) -> Self {
        self.state.lock().unwrap().invocations = states.into();
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_of(&self, op: MockOp) -> Vec<MockCall> {
        self.calls().into_iter().filter(|c| c.op == op).collect()
    }

    /// Whether any call would have changed remote state.
    pub fn mutated(&self) -> bool {
        self.calls()
            .iter()
            .any(|c| matches!(c.op, MockOp::Create | MockOp::Update | MockOp::Delete))
    }

    /// Current stored body of a resource, if any.
    pub fn resource(&self, kind: ResourceKind, id: &str) -> Option<Value> {
        self.state
            .lock()
            .unwrap()
            .resources
            .get(&kind)
            .and_then(|items| items.iter().find(|(i, _)| i == id))
            .map(|(_, body)| body.clone())
    }

    /// Test ids passed to the last `run_tests` call.
    pub fn run_test_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().run_test_ids.clone()
    }

    fn record(
        &self,
        op: MockOp,
        kind: Option<ResourceKind>,
        id: Option<&str>,
        body: Option<&Value>,
    ) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall {
            op,
            kind,
            id: id.map(str::to_string),
            body: body.cloned(),
        });
        match id {
            Some(id) if state.failures.contains(&(op, id.to_string())) => {
                Err(Error::remote(format!("{op:?}"), format!("injected failure for {id}")))
            }
            _ => Ok(()),
        }
    }
}

fn with_id(kind: ResourceKind, id: &str, body: &Value) -> Value {
    let mut out = body.clone();
    if let Some(map) = out.as_object_mut() {
        map.insert(kind.id_fields()[0].to_string(), json!(id));
    }
    out
}

fn prefix(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Agent => "agent",
        ResourceKind::Tool => "tool",
        ResourceKind::Test => "test",
    }
}

#[async_trait]
impl RemoteApi for MockRemote {
    async fn list(&self, kind: ResourceKind, _page_size: u32) -> Result<Vec<RemoteSummary>> {
        self.record(MockOp::List, Some(kind), None, None)?;
        let state = self.state.lock().unwrap();
        let stored = state
            .resources
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|(id, body)| with_id(kind, id, body));
        let raw = state.raw_listing.get(&kind).into_iter().flatten().cloned();
        Ok(stored
            .chain(raw)
            .map(|item| RemoteSummary::from_value(kind, &item))
            .collect())
    }

    async fn get(&self, kind: ResourceKind, id: &str) -> Result<Value> {
        self.record(MockOp::Get, Some(kind), Some(id), None)?;
        self.resource(kind, id)
            .map(|body| with_id(kind, id, &body))
            .ok_or_else(|| Error::remote("get", format!("404: {} {id} not found", kind.noun())))
    }

    async fn create(&self, kind: ResourceKind, body: &Value) -> Result<MutationReceipt> {
        let name = kind.display_name(body).unwrap_or_default();
        self.record(MockOp::Create, Some(kind), Some(&name), Some(body))?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("{}_{}", prefix(kind), state.next_id);
        state
            .resources
            .entry(kind)
            .or_default()
            .push((id.clone(), body.clone()));
        Ok(MutationReceipt::new(id))
    }

    async fn update(&self, kind: ResourceKind, id: &str, body: &Value) -> Result<MutationReceipt> {
        self.record(MockOp::Update, Some(kind), Some(id), Some(body))?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let version = state.next_id;
        let items = state.resources.entry(kind).or_default();
        match items.iter_mut().find(|(i, _)| i == id) {
            Some((_, stored)) => *stored = body.clone(),
            None => return Err(Error::remote("update", format!("404: {id} not found"))),
        }
        let mut receipt = MutationReceipt::new(id);
        if kind == ResourceKind::Agent {
            receipt.version_id = Some(format!("ver_{version}"));
            receipt.branch_id = Some("branch_main".to_string());
        }
        Ok(receipt)
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> Result<()> {
        self.record(MockOp::Delete, Some(kind), Some(id), None)?;
        let mut state = self.state.lock().unwrap();
        if let Some(items) = state.resources.get_mut(&kind) {
            items.retain(|(i, _)| i != id);
        }
        Ok(())
    }

    async fn run_tests(&self, agent_id: &str, test_ids: &[String]) -> Result<String> {
        self.record(MockOp::RunTests, Some(ResourceKind::Agent), Some(agent_id), None)?;
        let mut state = self.state.lock().unwrap();
        state.run_test_ids = test_ids.to_vec();
        Ok(format!("inv_{agent_id}"))
    }

    async fn get_test_invocation(&self, invocation_id: &str) -> Result<Value> {
        self.record(MockOp::GetInvocation, None, Some(invocation_id), None)?;
        let mut state = self.state.lock().unwrap();
        let next = if state.invocations.len() > 1 {
            state.invocations.pop_front()
        } else {
            state.invocations.front().cloned()
        };
        Ok(next.unwrap_or_else(|| json!({"testRuns": []})))
    }
}
