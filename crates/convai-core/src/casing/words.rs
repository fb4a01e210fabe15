//! Single-key conversion between snake_case and camelCase

/// Convert one key to camelCase.
///
/// `_` and `-` separate words. Leading and trailing underscores are kept, and
/// a word that starts with a digit keeps its `_` so `start_1` survives a
/// round trip unchanged.
pub fn to_camel(key: &str) -> String {
    camel(key, false)
}

/// Like [`to_camel`], but words starting with a digit are joined directly:
/// `start_1` becomes `start1`. Not reversible.
pub fn to_camel_joined(key: &str) -> String {
    camel(key, true)
}

fn camel(key: &str, join_digits: bool) -> String {
    let body = key.trim_matches('_');
    if body.is_empty() {
        return key.to_string();
    }
    let lead = key.len() - key.trim_start_matches('_').len();
    let trail = key.len() - key.trim_end_matches('_').len();

    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..lead]);

    let mut words = body.split(['_', '-']).filter(|w| !w.is_empty());
    if let Some(first) = words.next() {
        let mut chars = first.chars();
        if let Some(c) = chars.next() {
            out.extend(c.to_lowercase());
            out.push_str(chars.as_str());
        }
    }
    for word in words {
        let mut chars = word.chars();
        let Some(c) = chars.next() else { continue };
        if c.is_ascii_digit() {
            if !join_digits {
                out.push('_');
            }
            out.push_str(word);
        } else {
            out.extend(c.to_uppercase());
            out.push_str(chars.as_str());
        }
    }

    out.push_str(&key[key.len() - trail..]);
    out
}

/// Convert one key to snake_case.
pub fn to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c == '-' {
            out.push('_');
        } else if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convention-neutral identity of a key, used to match exception rules.
pub fn normalize(key: &str) -> String {
    to_snake(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("conversation_config", "conversationConfig")]
    #[case("agent_id", "agentId")]
    #[case("first-message", "firstMessage")]
    #[case("agentId", "agentId")]
    #[case("name", "name")]
    #[case("start_1", "start_1")]
    #[case("edge_1_to", "edge_1To")]
    #[case("_private", "_private")]
    #[case("__meta__", "__meta__")]
    #[case("_", "_")]
    #[case("", "")]
    fn camel(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_camel(input), expected);
    }

    #[rstest]
    #[case("start_1", "start1")]
    #[case("edge_1_to_2", "edge1To2")]
    #[case("agent_node", "agentNode")]
    #[case("node_a", "nodeA")]
    fn camel_joined(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_camel_joined(input), expected);
    }

    #[rstest]
    #[case("conversationConfig", "conversation_config")]
    #[case("agentId", "agent_id")]
    #[case("first-message", "first_message")]
    #[case("agent_id", "agent_id")]
    #[case("edge_1To", "edge_1_to")]
    #[case("Workflow", "workflow")]
    #[case("_private", "_private")]
    fn snake(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(to_snake(input), expected);
    }

    #[rstest]
    #[case("turn_timeout")]
    #[case("tts_output_format_2")]
    #[case("node_1_label")]
    #[case("_internal_flag")]
    fn snake_keys_round_trip(#[case] key: &str) {
        assert_eq!(to_snake(&to_camel(key)), key);
    }
}
