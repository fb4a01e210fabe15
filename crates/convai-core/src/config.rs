//! Explicit configuration threaded into every sync operation
//!
//! Values resolve in layers, later layers winning: built-in defaults, the
//! optional `convai.toml` project file, then whatever the caller applies
//! from environment variables or flags.

use serde::{Deserialize, Serialize};

use convai_fs::{ConfigStore, NormalizedPath};

use crate::Result;

/// Project settings file name at the root.
pub const PROJECT_FILE: &str = "convai.toml";

pub const DEFAULT_ENVIRONMENT: &str = "prod";
pub const DEFAULT_RESIDENCY: &str = "us";
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// On-disk shape of `convai.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectFile {
    #[serde(default)]
    pub sync: SyncSection,
}

/// The `[sync]` table. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncSection {
    pub environment: Option<String>,
    pub residency: Option<String>,
    pub page_size: Option<u32>,
}

/// Everything an operation needs to know about where and how to sync.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigContext {
    /// Project root; index files and relative config paths resolve here.
    pub root: NormalizedPath,
    /// Environment tag used to filter bulk deletes.
    pub environment: String,
    /// Data residency region selecting the API host.
    pub residency: String,
    /// Page size for remote listings.
    pub page_size: u32,
    /// API key passed through to the remote client; never persisted.
    pub api_key: Option<String>,
}

impl ConfigContext {
    /// Defaults rooted at `root`.
    pub fn new(root: impl Into<NormalizedPath>) -> Self {
        Self {
            root: root.into(),
            environment: DEFAULT_ENVIRONMENT.to_string(),
            residency: DEFAULT_RESIDENCY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            api_key: None,
        }
    }

    /// Defaults overlaid with `convai.toml` when the root has one.
    pub fn load(root: impl Into<NormalizedPath>) -> Result<Self> {
        let mut ctx = Self::new(root);
        let path = ctx.root.join(PROJECT_FILE);
        if let Some(file) = ConfigStore::new().load_optional::<ProjectFile>(&path)? {
            tracing::debug!(path = %path, "loaded project settings");
            ctx.apply_file(&file);
        }
        Ok(ctx)
    }

    fn apply_file(&mut self, file: &ProjectFile) {
        let sync = &file.sync;
        if let Some(env) = sync.environment.as_ref().filter(|s| !s.is_empty()) {
            self.environment = env.clone();
        }
        if let Some(residency) = sync.residency.as_ref().filter(|s| !s.is_empty()) {
            self.residency = residency.clone();
        }
        if let Some(page_size) = sync.page_size.filter(|n| *n > 0) {
            self.page_size = page_size;
        }
    }

    pub fn with_environment(mut self, environment: Option<String>) -> Self {
        if let Some(env) = environment.filter(|s| !s.is_empty()) {
            self.environment = env;
        }
        self
    }

    pub fn with_residency(mut self, residency: Option<String>) -> Self {
        if let Some(residency) = residency.filter(|s| !s.is_empty()) {
            self.residency = residency;
        }
        self
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        if let Some(page_size) = page_size.filter(|n| *n > 0) {
            self.page_size = page_size;
        }
        self
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|s| !s.trim().is_empty());
        self
    }

    /// Resolve an index-relative config path against the root.
    pub fn resolve(&self, config: &str) -> NormalizedPath {
        self.root.join(config)
    }

    /// Express `path` relative to the root when it lies underneath it.
    pub fn relativize(&self, path: &NormalizedPath) -> String {
        path.relative_to(&self.root)
            .unwrap_or_else(|| path.clone())
            .as_str()
            .to_string()
    }
}
