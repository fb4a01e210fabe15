//! SHA-256 checksum utilities
//!
//! Every digest in the workspace uses the canonical `sha256:<hex>` format.
//! [`fingerprint`] hashes a JSON tree by content, so two configs that differ
//! only in key order share a fingerprint.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Order-independent content fingerprint of a JSON tree.
///
/// Object keys are sorted at every depth, including objects nested in
/// arrays. Array order stays significant.
pub fn fingerprint(tree: &Value) -> String {
    let canonical = canonicalize(tree);
    // Serializing a Value cannot fail: every key is already a string.
    let compact = serde_json::to_string(&canonical).unwrap_or_default();
    compute_content_checksum(&compact)
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        scalar => scalar.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_checksum_known_value() {
        assert_eq!(
            compute_content_checksum("hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn fingerprint_has_fixed_shape() {
        let digest = fingerprint(&json!({"name": "Agent"}));
        assert!(digest.starts_with(PREFIX));
        assert_eq!(digest.len(), PREFIX.len() + 64);
    }

    #[test]
    fn canonical_form_sorts_nested_keys() {
        let tree = json!({"b": 1, "a": {"d": [{"z": 1, "y": 2}], "c": null}});
        let text = serde_json::to_string(&canonicalize(&tree)).unwrap();
        assert_eq!(text, r#"{"a":{"c":null,"d":[{"y":2,"z":1}]},"b":1}"#);
    }

    #[test]
    fn array_order_is_significant() {
        assert_ne!(fingerprint(&json!([1, 2])), fingerprint(&json!([2, 1])));
    }

    #[test]
    fn null_differs_from_missing_key() {
        assert_ne!(
            fingerprint(&json!({"a": null})),
            fingerprint(&json!({}))
        );
    }
}
