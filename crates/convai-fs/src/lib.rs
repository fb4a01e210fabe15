//! Filesystem layer for convai-sync
//!
//! Provides normalized paths, locked atomic writes, format-aware config
//! loading, content fingerprints and collision-free file naming.

pub mod checksum;
pub mod config;
pub mod error;
pub mod filename;
pub mod io;
pub mod path;

pub use checksum::{compute_content_checksum, fingerprint};
pub use config::ConfigStore;
pub use error::{Error, Result};
pub use filename::{allocate_filename, sanitize_label, unique_file_name};
pub use path::NormalizedPath;
