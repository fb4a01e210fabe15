//! Format-aware configuration loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Loads and saves typed documents, picking the format from the extension.
///
/// `.json` and `.toml` are understood. Saving is atomic.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        match format_of(path)? {
            Format::Toml => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            Format::Json => {
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
        }
    }

    /// Like [`ConfigStore::load`], but a missing file yields `None`.
    pub fn load_optional<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<Option<T>> {
        match self.load(path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let serialize_error = |format: &str, message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        let content = match format_of(path)? {
            Format::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_error("TOML", e.to_string()))?
            }
            Format::Json => {
                let mut text = serde_json::to_string_pretty(value)
                    .map_err(|e| serialize_error("JSON", e.to_string()))?;
                text.push('\n');
                text
            }
        };

        io::write_atomic(path, content.as_bytes())
    }
}

enum Format {
    Toml,
    Json,
}

fn format_of(path: &NormalizedPath) -> Result<Format> {
    let extension = path.extension().unwrap_or("");
    match extension.to_lowercase().as_str() {
        "toml" => Ok(Format::Toml),
        "json" => Ok(Format::Json),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}
