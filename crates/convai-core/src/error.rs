//! Error types for convai-core

use std::path::PathBuf;

use crate::resource::ResourceKind;

/// Result type for convai-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in convai-core operations
///
/// Per-resource failures during a batch are collected into the sync report
/// instead; these variants abort the operation that returned them.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The kind's index file is missing
    #[error("{} not found at {path}. Run 'convai init' first.", .kind.index_file())]
    IndexNotFound { kind: ResourceKind, path: PathBuf },

    /// The index file exists but is not shaped like `{ "<kind>": [...] }`
    #[error("Malformed index {path}: {message}")]
    MalformedIndex { path: PathBuf, message: String },

    /// No entry with this id in the local index
    #[error("{} with ID {id} not found in {}", .kind.noun(), .kind.index_file())]
    ResourceNotFound { kind: ResourceKind, id: String },

    /// Mutually exclusive or otherwise invalid options
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// A remote API call failed
    #[error("Remote {operation} failed: {message}")]
    Remote { operation: String, message: String },

    /// The remote returned something that cannot be used
    #[error("Unexpected remote response for {operation}: {message}")]
    UnexpectedResponse { operation: String, message: String },

    /// An agent has no tests attached in its platform settings
    #[error("No tests attached to agent {agent}")]
    NoAttachedTests { agent: String },

    /// Test results did not settle in time
    #[error("Timed out waiting for test invocation {invocation_id} after {attempts} polls")]
    PollTimeout { invocation_id: String, attempts: u32 },

    /// Filesystem error from convai-fs
    #[error(transparent)]
    Fs(#[from] convai_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn remote(operation: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Remote {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_not_found_mentions_init() {
        let err = Error::IndexNotFound {
            kind: ResourceKind::Agent,
            path: PathBuf::from("/p/agents.json"),
        };
        let display = err.to_string();
        assert!(display.starts_with("agents.json not found"), "got: {display}");
        assert!(display.contains("Run 'convai init' first"), "got: {display}");
    }

    #[test]
    fn resource_not_found_names_kind() {
        let err = Error::ResourceNotFound {
            kind: ResourceKind::Tool,
            id: "tool_1".into(),
        };
        assert_eq!(err.to_string(), "Tool with ID tool_1 not found in tools.json");
    }
}
