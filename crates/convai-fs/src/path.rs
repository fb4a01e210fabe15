//! Slash-normalized paths
//!
//! Index entries store config locations relative to the project root with
//! forward slashes, so the same `agents.json` works on every platform.

use std::path::{Path, PathBuf};

/// A path stored with forward slashes, converted to native form only for I/O.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let inner = match raw.strip_prefix("./") {
            Some(rest) if !rest.is_empty() => rest.to_string(),
            _ => raw,
        };
        Self { inner }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join a relative segment. An absolute segment replaces the base.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        if segment.starts_with('/') || self.inner.is_empty() || self.inner == "." {
            return Self::new(segment);
        }
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self::new(joined)
    }

    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self { inner: "/".into() }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.inner
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
    }

    /// File name without its final extension.
    pub fn file_stem(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[..idx]),
            _ => Some(name),
        }
    }

    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 => Some(&name[idx + 1..]),
            _ => None,
        }
    }

    /// Strip `root` from the front of this path, if it is a prefix.
    pub fn relative_to(&self, root: &NormalizedPath) -> Option<Self> {
        let base = root.inner.trim_end_matches('/');
        let rest = self.inner.strip_prefix(base)?;
        let rest = rest.strip_prefix('/')?;
        Some(Self::new(rest))
    }

    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
