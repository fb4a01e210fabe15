use convai_fs::{ConfigStore, NormalizedPath, io};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_write_atomic_creates_parent_dirs() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("agent_configs/nested/a.json"));

    io::write_atomic(&path, b"{}").unwrap();

    assert_eq!(fs::read_to_string(path.to_native()).unwrap(), "{}");
}

#[test]
fn test_write_atomic_overwrites_and_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("agents.json");
    fs::write(&file_path, "original").unwrap();

    io::write_atomic(&NormalizedPath::new(&file_path), b"updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_write_json_keeps_key_order() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("a.json"));
    let value = json!({"zeta": 1, "alpha": 2});

    io::write_json(&path, &value).unwrap();

    let text = fs::read_to_string(path.to_native()).unwrap();
    assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    assert!(text.ends_with('\n'));
    assert_eq!(io::read_json(&path).unwrap(), value);
}

#[test]
fn test_read_json_reports_parse_errors() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("broken.json");
    fs::write(&file_path, "{ not json").unwrap();

    let err = io::read_json(&NormalizedPath::new(&file_path)).unwrap_err();
    assert!(matches!(err, convai_fs::Error::ConfigParse { .. }));
}

#[test]
fn test_read_text_missing_file_is_not_found() {
    let err = io::read_text(&NormalizedPath::new("/nonexistent/file.json")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_remove_file_is_idempotent() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("gone.json"));
    fs::write(path.to_native(), "{}").unwrap();

    assert!(io::remove_file(&path).unwrap());
    assert!(!io::remove_file(&path).unwrap());
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Settings {
    environment: String,
    page_size: u32,
}

#[test]
fn test_config_store_round_trips_toml_and_json() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::new();
    let settings = Settings {
        environment: "staging".into(),
        page_size: 50,
    };

    for name in ["convai.toml", "convai.json"] {
        let path = NormalizedPath::new(temp.path().join(name));
        store.save(&path, &settings).unwrap();
        let loaded: Settings = store.load(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}

#[test]
fn test_config_store_rejects_unknown_extension() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("convai.ini"));
    fs::write(path.to_native(), "x=1").unwrap();

    let err = ConfigStore::new().load::<Settings>(&path).unwrap_err();
    assert!(matches!(err, convai_fs::Error::UnsupportedFormat { .. }));
}

#[test]
fn test_config_store_optional_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("convai.toml"));

    let loaded: Option<Settings> = ConfigStore::new().load_optional(&path).unwrap();
    assert!(loaded.is_none());
}
