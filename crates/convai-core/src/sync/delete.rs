//! Delete: remove resources remotely and locally

use std::collections::HashSet;

use convai_fs::io;

use crate::resource::ResourceKind;
use crate::{Error, Result};

use super::executor::{SyncExecutor, noun};
use super::report::SyncReport;

/// Which entries to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// The entry with this remote id.
    One(String),
    /// Every entry in an environment; `None` means the context's environment.
    All { environment: Option<String> },
}

/// Options for delete.
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    pub dry_run: bool,
}

impl SyncExecutor<'_> {
    /// Delete the targeted entries.
    ///
    /// A failed remote delete is a warning: the local entry and config file
    /// are removed regardless, and the remote copy may remain.
    pub async fn delete(
        &self,
        kind: ResourceKind,
        target: &DeleteTarget,
        opts: &DeleteOptions,
    ) -> Result<SyncReport> {
        let mut index = self.load_index(kind)?;

        let positions: Vec<usize> = match target {
            DeleteTarget::One(id) => {
                let position = index.position(id).ok_or_else(|| Error::ResourceNotFound {
                    kind,
                    id: id.clone(),
                })?;
                vec![position]
            }
            DeleteTarget::All { environment } => {
                let environment = environment
                    .as_deref()
                    .unwrap_or(self.context().environment.as_str());
                index
                    .entries()
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.in_environment(environment))
                    .map(|(i, _)| i)
                    .collect()
            }
        };

        let mut report = SyncReport::success();
        let mut removed = HashSet::new();

        for position in positions {
            let entry = index.entries()[position].clone();
            let label = self.entry_label(kind, &entry);

            if opts.dry_run {
                report.action(format!(
                    "[dry-run] Would delete {}: {} ({})",
                    noun(kind),
                    label,
                    entry.config
                ));
                continue;
            }

            match entry.remote_id() {
                Some(id) => match self.remote().delete(kind, id).await {
                    Ok(()) => tracing::debug!(kind = %kind, id, "deleted remotely"),
                    Err(e) => report.warn(format!(
                        "Failed to delete {} {} remotely ({}); it may still exist: {}",
                        noun(kind),
                        label,
                        id,
                        e
                    )),
                },
                None => report.warn(format!(
                    "{} {} has no ID; removing the local copy only",
                    kind.noun(),
                    label
                )),
            }

            let path = self.context().resolve(&entry.config);
            if let Err(e) = io::remove_file(&path) {
                report.warn(format!("Could not remove {}: {}", entry.config, e));
            }

            removed.insert(position);
            report.counts.deleted += 1;
            report.action(format!("Deleted {}: {} ({})", noun(kind), label, entry.config));
        }

        if !removed.is_empty() {
            let mut position = 0;
            index.retain(|_| {
                let keep = !removed.contains(&position);
                position += 1;
                keep
            });
            index.save(self.root())?;
        }
        Ok(report)
    }
}
