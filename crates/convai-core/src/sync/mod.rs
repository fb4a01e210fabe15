//! Sync operations
//!
//! - **pull**: remote resources into local files and the index
//! - **push**: local configs to the remote, recording returned ids
//! - **delete**: remove resources remotely and locally
//! - **status**: read-only view of an index
//! - **init**: scaffold a new project
//! - **runner**: run an agent's attached tests and wait for results
//! - **widget**: HTML embed snippet for a tracked agent

mod delete;
mod executor;
mod init;
mod pull;
mod push;
mod report;
mod runner;
mod status;
mod widget;

pub use delete::{DeleteOptions, DeleteTarget};
pub use executor::SyncExecutor;
pub use init::{ENV_EXAMPLE_FILE, InitReport, init_project};
pub use pull::{PullOptions, PullPlan};
pub use push::PushOptions;
pub use report::{SyncCounts, SyncReport};
pub use runner::{
    PollConfig, RunStatus, TestInvocationReport, TestRunResult, attached_test_ids,
};
pub use status::{ResourceState, StatusRow};
pub use widget::{WIDGET_SCRIPT_URL, Widget, widget_snippet};
