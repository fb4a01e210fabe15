//! Push: send local configs to the remote side
//!
//! Entries without an id are created, the rest are updated. Every entry is
//! sent, changed or not.

use serde_json::Value;

use crate::casing::to_remote_case;
use crate::index::ResourceDefinition;
use crate::remote::MutationReceipt;
use crate::resource::{ResourceKind, remote_body};
use crate::{Error, Result};

use super::executor::{SyncExecutor, noun};
use super::report::SyncReport;

/// Options for push.
#[derive(Debug, Clone, Default)]
pub struct PushOptions {
    /// Push only the entry with this remote id.
    pub resource_id: Option<String>,
    pub dry_run: bool,
    /// Attached to agent updates as `versionDescription`.
    pub version_description: Option<String>,
}

impl SyncExecutor<'_> {
    /// Push every entry (or the one selected) of the kind's index.
    ///
    /// # Errors
    ///
    /// [`Error::IndexNotFound`] when the index is missing and
    /// [`Error::ResourceNotFound`] when `resource_id` is not tracked.
    /// Failures of individual resources are reported, not returned.
    pub async fn push(&self, kind: ResourceKind, opts: &PushOptions) -> Result<SyncReport> {
        let mut index = self.load_index(kind)?;

        if let Some(id) = &opts.resource_id
            && index.find(id).is_none()
        {
            return Err(Error::ResourceNotFound {
                kind,
                id: id.clone(),
            });
        }

        let mut report = SyncReport::success();
        let mut changed = false;

        for position in 0..index.len() {
            let entry = index.entries()[position].clone();
            if let Some(wanted) = &opts.resource_id
                && entry.remote_id() != Some(wanted.as_str())
            {
                continue;
            }

            let path = self.context().resolve(&entry.config);
            if !path.is_file() {
                report.warn(format!("Config file not found: {}", entry.config));
                report.counts.skipped += 1;
                continue;
            }
            let config = match self.read_config(&entry) {
                Ok(config) => config,
                Err(e) => {
                    report.warn(format!("Skipping {}: {}", entry.config, e));
                    report.counts.skipped += 1;
                    continue;
                }
            };

            let name = kind
                .display_name(&config)
                .unwrap_or_else(|| format!("Unnamed {}", kind.noun()));
            let existing_id = entry.remote_id().map(str::to_string);

            if opts.dry_run {
                let verb = if existing_id.is_some() { "update" } else { "create" };
                report.action(format!("[dry-run] Would {verb} {}: {name}", noun(kind)));
                continue;
            }

            let body = self.request_body(kind, &config, existing_id.is_some(), opts);
            let result = match &existing_id {
                None => self.remote().create(kind, &body).await,
                Some(id) => self.remote().update(kind, id, &body).await,
            };

            match result {
                Ok(receipt) => {
                    let target = &mut index.entries_mut()[position];
                    if apply_receipt(target, &receipt, existing_id.is_none()) {
                        changed = true;
                    }
                    if existing_id.is_some() {
                        report.counts.updated += 1;
                        report.action(format!("Updated {}: {name} (ID: {})", noun(kind), receipt.id));
                    } else {
                        report.counts.created += 1;
                        report.action(format!("Created {}: {name} (ID: {})", noun(kind), receipt.id));
                    }
                }
                Err(e) => report.fail(format!("Failed to push {} {name}: {e}", noun(kind))),
            }
        }

        if changed {
            index.save(self.root())?;
        }
        tracing::info!(
            kind = %kind,
            created = report.counts.created,
            updated = report.counts.updated,
            failed = report.counts.failed,
            "push finished"
        );
        Ok(report)
    }

    fn request_body(
        &self,
        kind: ResourceKind,
        config: &Value,
        is_update: bool,
        opts: &PushOptions,
    ) -> Value {
        let mut body = remote_body(kind, &to_remote_case(config));
        if kind == ResourceKind::Agent
            && is_update
            && let (Some(description), Some(map)) =
                (opts.version_description.as_ref(), body.as_object_mut())
        {
            map.insert("versionDescription".into(), Value::String(description.clone()));
        }
        body
    }
}

/// Copy what the remote reported onto the entry. Returns whether it changed.
fn apply_receipt(
    entry: &mut ResourceDefinition,
    receipt: &MutationReceipt,
    created: bool,
) -> bool {
    let before = entry.clone();
    if created {
        entry.id = Some(receipt.id.clone());
    }
    if receipt.version_id.is_some() {
        entry.version_id = receipt.version_id.clone();
    }
    if receipt.branch_id.is_some() {
        entry.branch_id = receipt.branch_id.clone();
    }
    *entry != before
}
