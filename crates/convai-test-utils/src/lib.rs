//! Shared test fixtures for the convai-sync workspace.
//!
//! Dev-dependency only, never published.
//!
//! - [`remote`]: [`MockRemote`], an in-memory [`convai_core::RemoteApi`]
//! - [`project`]: [`TestProject`], a temporary project directory builder

pub mod project;
pub mod remote;

pub use project::TestProject;
pub use remote::{MockCall, MockOp, MockRemote};
