//! Atomic I/O operations with file locking

use std::fs::{self, OpenOptions};
use std::io::Write;

use fs2::FileExt;
use serde::Serialize;

use crate::{Error, NormalizedPath, Result};

/// Write content atomically to a file with locking.
///
/// Content goes to a sibling temp file under an exclusive advisory lock and
/// is then renamed over the target. Parent directories are created.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name().unwrap_or("convai"),
        std::process::id()
    );
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|_| temp_file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    fs::rename(&temp_path, &native_path).map_err(|e| Error::io(&native_path, e))?;
    tracing::trace!(path = %path, bytes = content.len(), "wrote file");
    Ok(())
}

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Read and parse a JSON document.
pub fn read_json(path: &NormalizedPath) -> Result<serde_json::Value> {
    let content = read_text(path)?;
    serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
        path: path.to_native(),
        format: "JSON".into(),
        message: e.to_string(),
    })
}

/// Write a value as pretty-printed JSON with a trailing newline.
pub fn write_json<T: Serialize + ?Sized>(path: &NormalizedPath, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSerialize {
        path: path.to_native(),
        format: "JSON".into(),
        message: e.to_string(),
    })?;
    content.push('\n');
    write_atomic(path, content.as_bytes())
}

/// Remove a file. A file that is already gone counts as removed.
pub fn remove_file(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();
    match fs::remove_file(&native_path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(&native_path, e)),
    }
}

/// Create a directory and its parents.
pub fn ensure_dir(path: &NormalizedPath) -> Result<()> {
    let native_path = path.to_native();
    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))
}
