//! Key-casing transformer for configuration trees
//!
//! Local files use snake_case keys; the remote seam uses camelCase. The
//! transform rewrites object keys only. Values, array order and sibling key
//! order are untouched. Identifier maps listed in [`CasingRules`] keep their
//! own keys verbatim while everything beneath them is still converted.

mod rules;
mod words;

pub use rules::{CasingRules, ChildKeys};
pub use words::{normalize, to_camel, to_camel_joined, to_snake};

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
enum Direction {
    Remote,
    Local,
}

impl Direction {
    fn convert(self, key: &str, keys: ChildKeys) -> String {
        match (self, keys) {
            (_, ChildKeys::Preserve) => key.to_string(),
            (Direction::Remote, ChildKeys::WorkflowIds) => to_camel_joined(key),
            (Direction::Remote, ChildKeys::Convert) => to_camel(key),
            (Direction::Local, _) => to_snake(key),
        }
    }
}

/// Where a value sits: how its own keys are treated, and the key of the
/// object holding it.
#[derive(Debug, Clone, Copy)]
struct Context<'a> {
    keys: ChildKeys,
    parent_key: Option<&'a str>,
}

const ROOT: Context<'static> = Context {
    keys: ChildKeys::Convert,
    parent_key: None,
};

/// Convert a local (snake_case) tree to remote (camelCase) keys.
pub fn to_remote_case(tree: &Value) -> Value {
    transform_with(tree, Direction::Remote, CasingRules::default())
}

/// Convert a remote (camelCase) tree to local (snake_case) keys.
pub fn to_local_case(tree: &Value) -> Value {
    transform_with(tree, Direction::Local, CasingRules::default())
}

/// [`to_remote_case`] with an explicit rule set.
pub fn to_remote_case_with(tree: &Value, rules: CasingRules) -> Value {
    transform_with(tree, Direction::Remote, rules)
}

/// [`to_local_case`] with an explicit rule set.
pub fn to_local_case_with(tree: &Value, rules: CasingRules) -> Value {
    transform_with(tree, Direction::Local, rules)
}

fn transform_with(tree: &Value, direction: Direction, rules: CasingRules) -> Value {
    transform(tree, direction, rules, ROOT)
}

fn transform(value: &Value, direction: Direction, rules: CasingRules, ctx: Context<'_>) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| transform(item, direction, rules, ctx))
                .collect(),
        ),
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, child) in map {
                let child_keys = match ctx.keys {
                    ChildKeys::Convert => rules.child_keys(key, ctx.parent_key),
                    ChildKeys::Preserve | ChildKeys::WorkflowIds => ChildKeys::Convert,
                };
                let child_ctx = Context {
                    keys: child_keys,
                    parent_key: Some(key),
                };
                let converted = direction.convert(key, ctx.keys);
                let child = transform(child, direction, rules, child_ctx);
                if let Some(previous) = out.insert(converted.clone(), child) {
                    tracing::warn!(
                        key = %key,
                        converted = %converted,
                        dropped = %previous,
                        "sibling keys collide after case conversion; the later one wins"
                    );
                }
            }
            Value::Object(out)
        }
        scalar => scalar.clone(),
    }
}
