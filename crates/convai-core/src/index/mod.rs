//! Per-kind resource index
//!
//! Each kind is tracked in its own JSON file at the project root, shaped as
//! `{ "agents": [ {config, id, ...}, ... ] }`. Entry order is significant and
//! preserved; new entries are appended.

mod definition;

pub use definition::ResourceDefinition;

use std::fs::File;
use std::io::Read;

use fs2::FileExt;
use serde_json::{Map, Value};

use convai_fs::{NormalizedPath, io};

use crate::resource::ResourceKind;
use crate::{Error, Result};

/// The ordered list of locally known resources of one kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    kind: ResourceKind,
    entries: Vec<ResourceDefinition>,
    /// Other top-level keys found in the file, written back unchanged.
    extra: Map<String, Value>,
}

impl Index {
    /// An empty index.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Location of the kind's index under `root`.
    pub fn path(root: &NormalizedPath, kind: ResourceKind) -> NormalizedPath {
        root.join(kind.index_file())
    }

    /// Whether the kind's index file exists under `root`.
    pub fn exists(root: &NormalizedPath, kind: ResourceKind) -> bool {
        Self::path(root, kind).is_file()
    }

    /// Load the index under a shared lock.
    ///
    /// # Errors
    ///
    /// [`Error::IndexNotFound`] if the file is missing, or a parse error if
    /// it is not shaped like an index.
    pub fn load(root: &NormalizedPath, kind: ResourceKind) -> Result<Self> {
        let path = Self::path(root, kind);
        let native = path.to_native();

        let file = match File::open(&native) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::IndexNotFound { kind, path: native });
            }
            Err(e) => return Err(convai_fs::Error::io(&native, e).into()),
        };
        file.lock_shared()
            .map_err(|_| convai_fs::Error::LockFailed { path: native.clone() })?;

        // Read through the locked handle; the lock is released on drop.
        let mut content = String::new();
        (&file)
            .read_to_string(&mut content)
            .map_err(|e| convai_fs::Error::io(&native, e))?;

        Self::parse(kind, &content).map_err(|message| Error::MalformedIndex { path: native, message })
    }

    fn parse(kind: ResourceKind, content: &str) -> std::result::Result<Self, String> {
        let document: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
        let Value::Object(mut extra) = document else {
            return Err("expected a JSON object at the top level".into());
        };

        let entries = match extra.shift_remove(kind.list_key()) {
            None | Some(Value::Null) => Vec::new(),
            Some(list @ Value::Array(_)) => serde_json::from_value(list).map_err(|e| e.to_string())?,
            Some(_) => return Err(format!("\"{}\" must be a list", kind.list_key())),
        };

        Ok(Self {
            kind,
            entries,
            extra,
        })
    }

    /// Write the index atomically under an exclusive lock.
    pub fn save(&self, root: &NormalizedPath) -> Result<()> {
        let mut document = Map::new();
        document.insert(
            self.kind.list_key().to_string(),
            serde_json::to_value(&self.entries)?,
        );
        for (key, value) in &self.extra {
            document.insert(key.clone(), value.clone());
        }

        let path = Self::path(root, self.kind);
        io::write_json(&path, &Value::Object(document))?;
        tracing::debug!(path = %path, entries = self.entries.len(), "saved index");
        Ok(())
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn entries(&self) -> &[ResourceDefinition] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [ResourceDefinition] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ResourceDefinition) {
        self.entries.push(entry);
    }

    /// First entry with this remote id.
    pub fn find(&self, id: &str) -> Option<&ResourceDefinition> {
        self.entries.iter().find(|e| e.remote_id() == Some(id))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.remote_id() == Some(id))
    }

    /// Remove the first entry with this remote id.
    pub fn remove(&mut self, id: &str) -> Option<ResourceDefinition> {
        let pos = self.position(id)?;
        Some(self.entries.remove(pos))
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, keep: impl FnMut(&ResourceDefinition) -> bool) {
        self.entries.retain(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parse_accepts_empty_object() {
        let index = Index::parse(ResourceKind::Agent, "{}").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn parse_rejects_non_list() {
        let err = Index::parse(ResourceKind::Tool, r#"{"tools": {"a": 1}}"#).unwrap_err();
        assert!(err.contains("\"tools\" must be a list"), "got: {err}");
    }

    #[test]
    fn save_keeps_foreign_top_level_keys() {
        let dir = tempfile::tempdir().unwrap();
        let root = NormalizedPath::new(dir.path());
        std::fs::write(
            dir.path().join("agents.json"),
            r#"{"agents": [{"config": "a.json", "id": "x"}], "schema": 2}"#,
        )
        .unwrap();

        let mut index = Index::load(&root, ResourceKind::Agent).unwrap();
        index.push(ResourceDefinition::new("b.json"));
        index.save(&root).unwrap();

        let raw: Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("agents.json")).unwrap())
                .unwrap();
        assert_eq!(
            raw,
            json!({"agents": [{"config": "a.json", "id": "x"}, {"config": "b.json"}], "schema": 2})
        );
    }

    #[test]
    fn remove_takes_first_match_only() {
        let mut index = Index::new(ResourceKind::Agent);
        index.push(ResourceDefinition::new("a.json").with_id("dup"));
        index.push(ResourceDefinition::new("b.json").with_id("dup"));

        let removed = index.remove("dup").unwrap();
        assert_eq!(removed.config, "a.json");
        assert_eq!(index.len(), 1);
    }
}
