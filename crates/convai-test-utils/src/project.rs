//! [`TestProject`] builder for sync scenarios.

use std::fs;
use std::path::Path;

use convai_core::{ConfigContext, ResourceKind};
use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary project directory with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use convai_core::ResourceKind;
/// use convai_test_utils::TestProject;
/// use serde_json::json;
///
/// let project = TestProject::new().initialized();
/// project.write_json("agent_configs/support.json", &json!({"name": "Support"}));
/// project.add_entry(ResourceKind::Agent, json!({"config": "agent_configs/support.json"}));
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// An empty project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Write empty index files for every kind, like `convai init` does.
    pub fn initialized(self) -> Self {
        for kind in ResourceKind::ALL {
            self.write_json(kind.index_file(), &json!({ kind.list_key(): [] }));
        }
        self
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A default configuration context rooted here.
    pub fn context(&self) -> ConfigContext {
        ConfigContext::new(self.root())
    }

    /// Write `value` as pretty JSON at `rel`, creating parent directories.
    pub fn write_json(&self, rel: &str, value: &Value) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    pub fn write_text(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    pub fn read_json(&self, rel: &str) -> Value {
        let path = self.root().join(rel);
        let text = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()));
        serde_json::from_str(&text).unwrap()
    }

    pub fn read_text(&self, rel: &str) -> String {
        fs::read_to_string(self.root().join(rel)).unwrap()
    }

    /// Entries of a kind's index file.
    pub fn index_entries(&self, kind: ResourceKind) -> Vec<Value> {
        self.read_json(kind.index_file())[kind.list_key()]
            .as_array()
            .cloned()
            .unwrap_or_default()
    }

    /// Append a raw entry to a kind's index, creating the file if needed.
    pub fn add_entry(&self, kind: ResourceKind, entry: Value) {
        let mut entries = if self.exists(kind.index_file()) {
            self.index_entries(kind)
        } else {
            Vec::new()
        };
        entries.push(entry);
        self.write_json(kind.index_file(), &json!({ kind.list_key(): entries }));
    }

    /// Write a config file and track it in the index in one step.
    pub fn add_resource(&self, kind: ResourceKind, rel: &str, id: Option<&str>, config: &Value) {
        self.write_json(rel, config);
        let entry = match id {
            Some(id) => json!({"config": rel, "id": id}),
            None => json!({"config": rel}),
        };
        self.add_entry(kind, entry);
    }

    pub fn exists(&self, rel: &str) -> bool {
        self.root().join(rel).exists()
    }

    /// Names of the files directly inside `rel`, sorted.
    pub fn files_in(&self, rel: &str) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(self.root().join(rel)) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.root().join(rel);
        assert!(full_path.exists(), "Expected file to exist: {}", full_path.display());
    }

    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.root().join(rel);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
