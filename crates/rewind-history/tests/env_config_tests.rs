//! Inline configuration through the environment.
//!
//! Kept in its own test binary: it sets a process-wide variable.

use rewind_history::{HistoryConfig, CONFIG_CONTENT_ENV};
use std::fs;
use tempfile::TempDir;

/// Test that inline config applies but a project file still wins per field.
#[tokio::test]
async fn test_env_content_layer() {
    let project = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        project.path().join("rewind.json"),
        r#"{ "max_entries": 9 }"#,
    )
    .expect("Failed to write config");

    std::env::set_var(
        CONFIG_CONTENT_ENV,
        r#"{ "max_entries": 4, "log_level": "error" }"#,
    );
    let loaded = HistoryConfig::load(Some(project.path())).await;
    std::env::remove_var(CONFIG_CONTENT_ENV);

    let (config, _) = loaded.expect("Failed to load config");
    assert_eq!(config.max_entries, Some(9));
    assert_eq!(config.log_level.as_deref(), Some("error"));
}
