//! Reconciliation of a remote listing against the local index
//!
//! Pure classification: no I/O, no remote calls. The executor applies the
//! resulting plan.

use std::collections::{HashMap, HashSet};

use crate::index::ResourceDefinition;
use crate::remote::RemoteSummary;
use crate::resource::ResourceKind;

/// What pull will do with one remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanAction {
    Create,
    Update,
    Skip,
}

impl PlanAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Skip => "skip",
        }
    }
}

/// Mode switches for pull.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullFlags {
    /// Only refresh resources already tracked locally; never create.
    pub update: bool,
    /// Create new resources and refresh tracked ones.
    pub all: bool,
}

/// The local side of a known resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRecord {
    /// Position of the entry in the index.
    pub position: usize,
    /// Config path as stored in the index.
    pub config: String,
}

/// Local resources keyed by remote id, plus warnings raised while building.
#[derive(Debug, Clone, Default)]
pub struct LocalRecords {
    pub records: HashMap<String, LocalRecord>,
    pub warnings: Vec<String>,
}

/// Key index entries by remote id. The first occurrence of an id wins.
pub fn local_records(kind: ResourceKind, entries: &[ResourceDefinition]) -> LocalRecords {
    let mut out = LocalRecords::default();
    for (position, entry) in entries.iter().enumerate() {
        let Some(id) = entry.remote_id() else { continue };
        if out.records.contains_key(id) {
            out.warnings.push(format!(
                "Duplicate {} ID {} in {} ({}); using the first entry",
                kind.noun().to_lowercase(),
                id,
                kind.index_file(),
                entry.config
            ));
            continue;
        }
        out.records.insert(
            id.to_string(),
            LocalRecord {
                position,
                config: entry.config.clone(),
            },
        );
    }
    out
}

/// One classified remote resource.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanItem {
    pub action: PlanAction,
    pub id: String,
    pub name: String,
    /// The matching local entry, for update and skip-of-known items.
    pub local: Option<LocalRecord>,
}

/// Aggregate counts of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanCounts {
    pub create: usize,
    pub update: usize,
    pub skip: usize,
}

/// The outcome of [`reconcile`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcilePlan {
    pub items: Vec<PlanItem>,
    pub counts: PlanCounts,
    pub warnings: Vec<String>,
}

impl ReconcilePlan {
    /// Items that will change something locally.
    pub fn actionable(&self) -> impl Iterator<Item = &PlanItem> {
        self.items.iter().filter(|i| i.action != PlanAction::Skip)
    }

    pub fn is_noop(&self) -> bool {
        self.counts.create == 0 && self.counts.update == 0
    }
}

/// Classify every remote resource as create, update or skip.
///
/// | known locally | `update` | `all` | action |
/// |---|---|---|---|
/// | yes | any | any, if either set | update |
/// | yes | no | no | skip |
/// | no | yes | any | skip |
/// | no | no | any | create |
///
/// Items without an id are left out with a warning, as are repeated ids
/// after their first occurrence.
pub fn reconcile(
    kind: ResourceKind,
    local: &HashMap<String, LocalRecord>,
    remote: &[RemoteSummary],
    flags: PullFlags,
) -> ReconcilePlan {
    let mut plan = ReconcilePlan::default();
    let mut seen = HashSet::new();

    for summary in remote {
        let name = summary.label(kind);
        let Some(id) = summary.id.as_deref().filter(|id| !id.is_empty()) else {
            plan.warnings.push(format!(
                "Skipping {} without an ID: {}",
                kind.noun().to_lowercase(),
                name
            ));
            continue;
        };
        if !seen.insert(id) {
            plan.warnings.push(format!(
                "Remote listing repeats {} ID {}; ignoring the duplicate",
                kind.noun().to_lowercase(),
                id
            ));
            continue;
        }

        let known = local.get(id);
        let action = match (known.is_some(), flags.update, flags.all) {
            (true, true, _) | (true, _, true) => PlanAction::Update,
            (true, false, false) => PlanAction::Skip,
            (false, true, _) => PlanAction::Skip,
            (false, false, _) => PlanAction::Create,
        };
        match action {
            PlanAction::Create => plan.counts.create += 1,
            PlanAction::Update => plan.counts.update += 1,
            PlanAction::Skip => plan.counts.skip += 1,
        }
        plan.items.push(PlanItem {
            action,
            id: id.to_string(),
            name,
            local: known.cloned(),
        });
    }

    tracing::debug!(
        kind = %kind,
        create = plan.counts.create,
        update = plan.counts.update,
        skip = plan.counts.skip,
        "reconciled remote listing"
    );
    plan
}
