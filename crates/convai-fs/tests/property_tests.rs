use convai_fs::{fingerprint, sanitize_label};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z ]{0,8}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,6}", inner, 0..5)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Rebuild every object with its keys in reverse order.
fn reverse_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut reversed = Map::new();
            for (k, v) in map.iter().rev() {
                reversed.insert(k.clone(), reverse_keys(v));
            }
            Value::Object(reversed)
        }
        Value::Array(items) => Value::Array(items.iter().map(reverse_keys).collect()),
        other => other.clone(),
    }
}

proptest! {
    #[test]
    fn fingerprint_ignores_key_order(tree in arb_json()) {
        prop_assert_eq!(fingerprint(&tree), fingerprint(&reverse_keys(&tree)));
    }

    #[test]
    fn fingerprint_sees_trailing_whitespace(s in "[a-z]{1,12}") {
        let plain = json!({"prompt": {"text": s.clone()}});
        let padded = json!({"prompt": {"text": format!("{s} ")}});
        prop_assert_ne!(fingerprint(&plain), fingerprint(&padded));
    }

    #[test]
    fn sanitized_labels_are_portable(label in "\\PC{0,160}") {
        let stem = sanitize_label(&label);
        prop_assert!(!stem.is_empty());
        prop_assert!(stem.chars().count() <= 100);
        prop_assert!(!stem.starts_with('.'));
        prop_assert!(!stem.starts_with('-') && !stem.ends_with('-'));
        prop_assert!(!stem.chars().any(|c| "\\/:*?\"<>|".contains(c) || c.is_whitespace()));
    }
}

#[test]
fn fingerprint_treats_nested_reordering_as_equal() {
    let a = json!({"conversation_config": {"agent": {"prompt": "hi", "first_message": "yo"}}, "name": "A"});
    let b = json!({"name": "A", "conversation_config": {"agent": {"first_message": "yo", "prompt": "hi"}}});
    assert_eq!(fingerprint(&a), fingerprint(&b));
}

#[test]
fn fingerprint_distinguishes_null_and_arrays() {
    assert_ne!(fingerprint(&json!({"tags": null})), fingerprint(&json!({"tags": []})));
    assert_eq!(fingerprint(&json!({"tags": ["a", null]})), fingerprint(&json!({"tags": ["a", null]})));
}
