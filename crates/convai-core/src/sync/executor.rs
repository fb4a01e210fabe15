//! SyncExecutor: the handle every sync operation hangs off

use serde_json::Value;

use convai_fs::{NormalizedPath, io};

use crate::config::ConfigContext;
use crate::index::{Index, ResourceDefinition};
use crate::remote::RemoteApi;
use crate::resource::ResourceKind;
use crate::Result;

/// Orchestrates pull, push, delete, status and test runs for one project.
///
/// Operations run sequentially: each remote call is awaited before the next.
/// The executor holds no state between operations besides its context.
pub struct SyncExecutor<'a> {
    ctx: ConfigContext,
    remote: &'a dyn RemoteApi,
}

impl<'a> SyncExecutor<'a> {
    pub fn new(ctx: ConfigContext, remote: &'a dyn RemoteApi) -> Self {
        Self { ctx, remote }
    }

    pub fn context(&self) -> &ConfigContext {
        &self.ctx
    }

    pub(crate) fn remote(&self) -> &'a dyn RemoteApi {
        self.remote
    }

    pub(crate) fn root(&self) -> &NormalizedPath {
        &self.ctx.root
    }

    pub(crate) fn load_index(&self, kind: ResourceKind) -> Result<Index> {
        Index::load(self.root(), kind)
    }

    /// Read an entry's config file.
    pub(crate) fn read_config(&self, entry: &ResourceDefinition) -> convai_fs::Result<Value> {
        io::read_json(&self.ctx.resolve(&entry.config))
    }

    /// Display name of a tracked resource, read from its config when possible.
    pub(crate) fn entry_label(&self, kind: ResourceKind, entry: &ResourceDefinition) -> String {
        match self.read_config(entry) {
            Ok(config) => kind
                .display_name(&config)
                .unwrap_or_else(|| format!("Unnamed {}", kind.noun())),
            Err(_) => format!("Unknown {}", kind.noun()),
        }
    }
}

/// Lower-case noun for progress lines.
pub(crate) fn noun(kind: ResourceKind) -> String {
    kind.noun().to_lowercase()
}
