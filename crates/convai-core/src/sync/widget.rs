//! Embeddable HTML widget for a tracked agent

use crate::resource::ResourceKind;
use crate::{Error, Result};

use super::executor::SyncExecutor;

/// Script that defines the `<elevenlabs-convai>` element.
pub const WIDGET_SCRIPT_URL: &str = "https://unpkg.com/@elevenlabs/convai-widget-embed";

/// Residencies served by the default widget backend.
const DEFAULT_LOCATIONS: [&str; 2] = ["global", "us"];

/// Widget snippet for one agent, with the name shown alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Widget {
    pub agent_id: String,
    pub name: String,
    pub residency: String,
    pub snippet: String,
}

/// Build the HTML embed snippet for `agent_id`.
///
/// Isolated regions get a `server-location` attribute; `global` and `us`
/// use the default backend and carry none.
pub fn widget_snippet(agent_id: &str, residency: &str) -> String {
    let mut element = format!("<elevenlabs-convai agent-id=\"{agent_id}\"");
    if !DEFAULT_LOCATIONS.contains(&residency) {
        element.push_str(&format!(" server-location=\"{residency}\""));
    }
    element.push_str("></elevenlabs-convai>");
    format!("{element}\n<script src=\"{WIDGET_SCRIPT_URL}\" async type=\"text/javascript\"></script>")
}

impl SyncExecutor<'_> {
    /// Widget snippet for an agent tracked in the local index.
    ///
    /// Nothing remote is touched. The agent must be listed in the index
    /// under `agent_id`; its config only supplies the display name.
    pub fn widget(&self, agent_id: &str) -> Result<Widget> {
        let kind = ResourceKind::Agent;
        let index = self.load_index(kind)?;
        let entry = index.find(agent_id).ok_or_else(|| Error::ResourceNotFound {
            kind,
            id: agent_id.to_string(),
        })?;

        let residency = self.context().residency.clone();
        Ok(Widget {
            agent_id: agent_id.to_string(),
            name: self.entry_label(kind, entry),
            snippet: widget_snippet(agent_id, &residency),
            residency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("us")]
    #[case("global")]
    fn default_locations_have_no_server_attribute(#[case] residency: &str) {
        assert_eq!(
            widget_snippet("ag_1", residency),
            "<elevenlabs-convai agent-id=\"ag_1\"></elevenlabs-convai>\n\
             <script src=\"https://unpkg.com/@elevenlabs/convai-widget-embed\" async type=\"text/javascript\"></script>"
        );
    }

    #[rstest]
    #[case("eu-residency")]
    #[case("in-residency")]
    fn isolated_regions_name_their_server(#[case] residency: &str) {
        let snippet = widget_snippet("ag_1", residency);
        let first_line = snippet.lines().next().unwrap_or_default();
        assert_eq!(
            first_line,
            format!("<elevenlabs-convai agent-id=\"ag_1\" server-location=\"{residency}\"></elevenlabs-convai>")
        );
        assert!(snippet.ends_with("</script>"));
    }
}
