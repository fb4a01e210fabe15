//! Project scaffolding: empty indexes, config directories, `.env.example`

use convai_fs::{NormalizedPath, io};

use crate::Result;
use crate::index::Index;
use crate::resource::ResourceKind;

/// Name of the sample environment file written at the root.
pub const ENV_EXAMPLE_FILE: &str = ".env.example";

const ENV_EXAMPLE: &str = "# ElevenLabs API Key\nELEVENLABS_API_KEY=your_api_key_here\n";

/// What [`init_project`] did, as root-relative paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub created: Vec<String>,
    /// Files left alone because they already existed.
    pub skipped: Vec<String>,
}

/// Lay out a project under `root`.
///
/// Existing index files and `.env.example` are kept unless `overwrite` is
/// set, in which case they are rewritten. Config directories are only ever
/// created; their contents are never touched.
pub fn init_project(root: &NormalizedPath, overwrite: bool) -> Result<InitReport> {
    io::ensure_dir(root)?;
    let mut report = InitReport::default();

    for kind in ResourceKind::ALL {
        let name = kind.index_file().to_string();
        if Index::exists(root, kind) && !overwrite {
            report.skipped.push(name);
            continue;
        }
        Index::new(kind).save(root)?;
        report.created.push(name);
    }

    for kind in ResourceKind::ALL {
        let dir = root.join(kind.config_dir());
        if !dir.is_dir() {
            io::ensure_dir(&dir)?;
            report.created.push(format!("{}/", kind.config_dir()));
        }
    }

    let env_example = root.join(ENV_EXAMPLE_FILE);
    if env_example.exists() && !overwrite {
        report.skipped.push(ENV_EXAMPLE_FILE.to_string());
    } else {
        io::write_atomic(&env_example, ENV_EXAMPLE.as_bytes())?;
        report.created.push(ENV_EXAMPLE_FILE.to_string());
    }

    tracing::info!(root = %root, created = report.created.len(), "initialized project");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_project_gets_everything() {
        let dir = tempfile::tempdir().unwrap();
        let root = NormalizedPath::new(dir.path());

        let report = init_project(&root, false).unwrap();

        assert_eq!(
            report.created,
            [
                "agents.json",
                "tools.json",
                "tests.json",
                "agent_configs/",
                "tool_configs/",
                "test_configs/",
                ".env.example"
            ]
        );
        assert!(report.skipped.is_empty());
        let agents = std::fs::read_to_string(dir.path().join("agents.json")).unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(&agents).unwrap(), serde_json::json!({"agents": []}));
    }

    #[test]
    fn existing_files_are_kept_unless_overwriting() {
        let dir = tempfile::tempdir().unwrap();
        let root = NormalizedPath::new(dir.path());
        std::fs::write(dir.path().join("tools.json"), r#"{"tools": [{"config": "x.json"}]}"#).unwrap();

        let report = init_project(&root, false).unwrap();
        assert_eq!(report.skipped, ["tools.json"]);
        assert!(std::fs::read_to_string(dir.path().join("tools.json")).unwrap().contains("x.json"));

        let report = init_project(&root, true).unwrap();
        assert!(report.skipped.is_empty());
        assert!(!std::fs::read_to_string(dir.path().join("tools.json")).unwrap().contains("x.json"));
    }
}
