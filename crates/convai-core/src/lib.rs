//! Synchronization engine for convai-sync
//!
//! Keeps locally stored JSON configs for conversational agents, tools and
//! tests in step with a remote management API.
//!
//! ```text
//!                 convai-cli
//!                     |
//!                convai-core
//!   casing  plan  index  resource  remote  sync
//!                     |
//!                 convai-fs
//! ```
//!
//! The pure pieces ([`to_remote_case`], [`to_local_case`], [`reconcile`],
//! [`fingerprint`], [`allocate_filename`]) can be used on their own;
//! [`SyncExecutor`] ties them to the filesystem and a [`RemoteApi`].

pub mod casing;
pub mod config;
pub mod error;
pub mod index;
pub mod plan;
pub mod remote;
pub mod resource;
pub mod sync;

pub use casing::{CasingRules, to_local_case, to_remote_case};
pub use config::ConfigContext;
pub use convai_fs::{allocate_filename, fingerprint};
pub use error::{Error, Result};
pub use index::{Index, ResourceDefinition};
pub use plan::{PlanAction, PullFlags, ReconcilePlan, local_records, reconcile};
pub use remote::{MutationReceipt, RemoteApi, RemoteSummary};
pub use resource::ResourceKind;
pub use sync::{
    DeleteOptions, DeleteTarget, InitReport, PollConfig, PullOptions, PullPlan, PushOptions,
    ResourceState, RunStatus, StatusRow, SyncExecutor, SyncReport, TestInvocationReport,
    TestRunResult, Widget, init_project, widget_snippet,
};
