//! Pull: materialize remote resources into local files
//!
//! Split into [`SyncExecutor::plan_pull`] and [`SyncExecutor::apply_pull`] so
//! a caller can show the plan and ask for confirmation in between.

use convai_fs::{NormalizedPath, allocate_filename, fingerprint, io};

use crate::casing::to_local_case;
use crate::index::{Index, ResourceDefinition};
use crate::plan::{PlanAction, PlanItem, PullFlags, ReconcilePlan, local_records, reconcile};
use crate::remote::RemoteSummary;
use crate::resource::{ResourceKind, local_body};
use crate::{Error, Result};

use super::executor::{SyncExecutor, noun};
use super::report::SyncReport;

/// Options for pull.
#[derive(Debug, Clone, Default)]
pub struct PullOptions {
    /// Pull only this remote id.
    pub resource_id: Option<String>,
    /// Directory for new config files, relative to the root. Defaults to the
    /// kind's config directory.
    pub output_dir: Option<String>,
    pub flags: PullFlags,
    /// Plan and report without writing anything.
    pub dry_run: bool,
}

impl PullOptions {
    fn validate(&self) -> Result<()> {
        if self.flags.update && self.flags.all {
            return Err(Error::invalid_options(
                "--update and --all cannot be used together",
            ));
        }
        Ok(())
    }
}

/// A computed pull, ready to apply.
#[derive(Debug, Clone)]
pub struct PullPlan {
    pub kind: ResourceKind,
    pub plan: ReconcilePlan,
    index: Index,
    index_created: bool,
}

impl PullPlan {
    /// Whether the remote listing came back empty.
    pub fn is_empty(&self) -> bool {
        self.plan.items.is_empty()
    }
}

impl SyncExecutor<'_> {
    /// Load the index, list the remote side and classify every resource.
    ///
    /// A missing index is created empty, except in dry-run.
    pub async fn plan_pull(&self, kind: ResourceKind, opts: &PullOptions) -> Result<PullPlan> {
        opts.validate()?;

        let index_created = !Index::exists(self.root(), kind);
        let index = if index_created {
            let index = Index::new(kind);
            if !opts.dry_run {
                index.save(self.root())?;
                tracing::info!(file = kind.index_file(), "created missing index");
            }
            index
        } else {
            self.load_index(kind)?
        };

        let listing = match &opts.resource_id {
            Some(id) => {
                let detail = self.remote().get(kind, id).await?;
                let mut summary = RemoteSummary::from_value(kind, &detail);
                summary.id.get_or_insert_with(|| id.clone());
                vec![summary]
            }
            None => self.remote().list(kind, self.context().page_size).await?,
        };
        tracing::debug!(kind = %kind, count = listing.len(), "fetched remote listing");

        let local = local_records(kind, index.entries());
        let mut plan = reconcile(kind, &local.records, &listing, opts.flags);
        let mut warnings = local.warnings;
        warnings.append(&mut plan.warnings);
        plan.warnings = warnings;

        Ok(PullPlan {
            kind,
            plan,
            index,
            index_created: index_created && !opts.dry_run,
        })
    }

    /// Fetch and write every create/update item of `pull`.
    ///
    /// The index is saved once at the end, and only if an entry was added.
    pub async fn apply_pull(&self, pull: PullPlan, opts: &PullOptions) -> Result<SyncReport> {
        let PullPlan {
            kind,
            plan,
            mut index,
            index_created,
        } = pull;

        let mut report = SyncReport::success();
        if index_created {
            report.action(format!("Created {}", kind.index_file()));
        }
        for warning in &plan.warnings {
            report.warn(warning.clone());
        }
        report.counts.skipped = plan.counts.skip;

        let output_dir = self.output_dir(kind, opts);
        let mut index_changed = false;

        for item in plan.actionable() {
            if opts.dry_run {
                report.action(format!(
                    "[dry-run] Would {} {}: {} (ID: {})",
                    item.action.as_str(),
                    noun(kind),
                    item.name,
                    item.id
                ));
                continue;
            }

            match self.pull_item(kind, item, &output_dir, &mut report).await {
                Ok(Some(entry)) => {
                    index.push(entry);
                    index_changed = true;
                }
                Ok(None) => {}
                Err(e) => report.fail(format!(
                    "Failed to pull {} {} (ID: {}): {}",
                    noun(kind),
                    item.name,
                    item.id,
                    e
                )),
            }
        }

        if index_changed {
            index.save(self.root())?;
        }
        tracing::info!(
            kind = %kind,
            created = report.counts.created,
            updated = report.counts.updated,
            failed = report.counts.failed,
            "pull finished"
        );
        Ok(report)
    }

    /// Plan and apply in one go, without confirmation.
    pub async fn pull(&self, kind: ResourceKind, opts: &PullOptions) -> Result<SyncReport> {
        let plan = self.plan_pull(kind, opts).await?;
        self.apply_pull(plan, opts).await
    }

    fn output_dir(&self, kind: ResourceKind, opts: &PullOptions) -> NormalizedPath {
        let dir = opts
            .output_dir
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(kind.config_dir());
        self.context().resolve(dir)
    }

    /// Pull one resource. Returns the new index entry for creates.
    async fn pull_item(
        &self,
        kind: ResourceKind,
        item: &PlanItem,
        output_dir: &NormalizedPath,
        report: &mut SyncReport,
    ) -> Result<Option<ResourceDefinition>> {
        let detail = self.remote().get(kind, &item.id).await?;
        let detail = to_local_case(&detail);

        let mapped = match local_body(kind, &detail, &item.name) {
            Ok(mapped) => mapped,
            Err(warning) => {
                report.warn(warning.to_string());
                report.counts.skipped += 1;
                return Ok(None);
            }
        };

        match (item.action, &item.local) {
            (PlanAction::Update, Some(local)) => {
                let path = self.context().resolve(&local.config);
                let unchanged = io::read_json(&path)
                    .map(|existing| fingerprint(&existing) == fingerprint(&mapped.body))
                    .unwrap_or(false);
                if unchanged {
                    report.counts.unchanged += 1;
                    report.action(format!("Unchanged {}: {} ({})", noun(kind), item.name, local.config));
                    return Ok(None);
                }
                io::write_json(&path, &mapped.body)?;
                report.counts.updated += 1;
                report.action(format!("Updated {}: {} ({})", noun(kind), item.name, local.config));
                Ok(None)
            }
            _ => {
                let path = allocate_filename(output_dir, &item.name, ".json")?;
                io::write_json(&path, &mapped.body)?;
                let config = self.context().relativize(&path);
                report.counts.created += 1;
                report.action(format!(
                    "Created {}: {} (ID: {}) -> {}",
                    noun(kind),
                    item.name,
                    item.id,
                    config
                ));
                Ok(Some(
                    ResourceDefinition::new(config)
                        .with_id(item.id.clone())
                        .with_type(mapped.entry_type),
                ))
            }
        }
    }
}
