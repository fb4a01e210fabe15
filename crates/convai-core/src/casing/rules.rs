//! Exception rules for the key-casing transformer
//!
//! Some subtrees hold user-chosen identifiers as keys: HTTP header names,
//! dynamic variable names and workflow node/edge labels. Those keys are
//! copied verbatim; the values beneath them are still converted.

use super::words::normalize;

/// Keys whose immediate children are identifiers, wherever they appear.
const IDENTIFIER_MAPS: &[&str] = &["request_headers", "dynamic_variables"];

/// Keys whose immediate children are identifiers when nested under `workflow`.
const WORKFLOW_MAPS: &[&str] = &["nodes", "edges"];

const WORKFLOW: &str = "workflow";

/// How the keys of one object are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKeys {
    /// Ordinary keys, converted by the direction's convention.
    Convert,
    /// Identifiers, copied verbatim.
    Preserve,
    /// Workflow node/edge ids under full conversion: digit words are joined
    /// on the way out (`start_1` becomes `start1`).
    WorkflowIds,
}

/// Switchable parts of the exception table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CasingRules {
    /// Keep `workflow.nodes` / `workflow.edges` ids verbatim.
    pub workflow_identifiers: bool,
}

impl Default for CasingRules {
    fn default() -> Self {
        Self {
            workflow_identifiers: true,
        }
    }
}

impl CasingRules {
    /// Rules that case-convert workflow node and edge ids like any other key.
    pub fn convert_workflow_identifiers() -> Self {
        Self {
            workflow_identifiers: false,
        }
    }

    /// How the keys of the object stored under `key` are treated.
    ///
    /// `parent` is the key of the object that contains `key`. Both are
    /// compared in their convention-neutral form.
    pub fn child_keys(&self, key: &str, parent: Option<&str>) -> ChildKeys {
        let key = normalize(key);
        if IDENTIFIER_MAPS.contains(&key.as_str()) {
            return ChildKeys::Preserve;
        }
        let workflow_map = WORKFLOW_MAPS.contains(&key.as_str())
            && parent.is_some_and(|p| normalize(p) == WORKFLOW);
        match (workflow_map, self.workflow_identifiers) {
            (true, true) => ChildKeys::Preserve,
            (true, false) => ChildKeys::WorkflowIds,
            (false, _) => ChildKeys::Convert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("request_headers", None, ChildKeys::Preserve)]
    #[case("requestHeaders", Some("webhook"), ChildKeys::Preserve)]
    #[case("dynamicVariables", None, ChildKeys::Preserve)]
    #[case("nodes", Some("workflow"), ChildKeys::Preserve)]
    #[case("edges", Some("Workflow"), ChildKeys::Preserve)]
    #[case("nodes", Some("graph"), ChildKeys::Convert)]
    #[case("nodes", None, ChildKeys::Convert)]
    #[case("headers", None, ChildKeys::Convert)]
    fn default_rules(#[case] key: &str, #[case] parent: Option<&str>, #[case] expected: ChildKeys) {
        assert_eq!(CasingRules::default().child_keys(key, parent), expected);
    }

    #[test]
    fn workflow_rule_can_be_disabled() {
        let rules = CasingRules::convert_workflow_identifiers();
        assert_eq!(rules.child_keys("nodes", Some("workflow")), ChildKeys::WorkflowIds);
        assert_eq!(rules.child_keys("nodes", Some("graph")), ChildKeys::Convert);
        assert_eq!(rules.child_keys("request_headers", None), ChildKeys::Preserve);
    }
}
