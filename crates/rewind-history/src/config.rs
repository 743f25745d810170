//! History configuration.
//!
//! Configuration is loaded from multiple sources, later ones overriding
//! earlier ones field by field:
//! 1. Global config: `~/.config/rewind/rewind.json` (or `.jsonc`)
//! 2. `REWIND_CONFIG_CONTENT` environment variable
//! 3. Project config: `rewind.json` or `rewind.jsonc` in the project directory
//!
//! Files may contain `//` and `/* */` comments.

use crate::error::{ConfigError, HistoryResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable holding inline config content.
pub const CONFIG_CONTENT_ENV: &str = "REWIND_CONFIG_CONTENT";

const GLOBAL_FILE_NAMES: &[&str] = &["rewind.json", "rewind.jsonc"];
const PROJECT_FILE_NAMES: &[&str] = &["rewind.jsonc", "rewind.json"];

/// Configuration for a snapshot history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum number of snapshots retained. `None` keeps everything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,

    /// Default log level for the CLI (`trace`, `debug`, `info`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl HistoryConfig {
    /// Config with a retention limit.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
            ..Default::default()
        }
    }

    /// Merge another config into this one. Fields set in `other` win.
    pub fn merge(mut self, other: Self) -> Self {
        if other.max_entries.is_some() {
            self.max_entries = other.max_entries;
        }
        if other.log_level.is_some() {
            self.log_level = other.log_level;
        }
        self
    }

    /// Check the config for values a history cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == Some(0) {
            return Err(ConfigError::validation("max_entries must be at least 1"));
        }
        if let Some(level) = &self.log_level {
            if level.parse::<tracing::Level>().is_err() {
                return Err(ConfigError::validation(format!(
                    "unknown log_level '{level}'"
                )));
            }
        }
        Ok(())
    }

    /// Load configuration from all sources.
    ///
    /// Returns the merged config and the files it was read from. Only the
    /// merged result is validated, so a later layer may correct a value set
    /// by an earlier one.
    pub async fn load(project_dir: Option<&Path>) -> HistoryResult<(Self, Vec<PathBuf>)> {
        let global_dir = Self::global_config_dir();
        let inline = std::env::var(CONFIG_CONTENT_ENV).ok();
        Self::load_layers(global_dir.as_deref(), inline.as_deref(), project_dir).await
    }

    pub(crate) async fn load_layers(
        global_dir: Option<&Path>,
        inline: Option<&str>,
        project_dir: Option<&Path>,
    ) -> HistoryResult<(Self, Vec<PathBuf>)> {
        let mut config = HistoryConfig::default();
        let mut sources = Vec::new();

        if let Some(path) = global_dir.and_then(|dir| first_existing(dir, GLOBAL_FILE_NAMES)) {
            config = config.merge(Self::read_file(&path).await?);
            sources.push(path);
        }

        if let Some(content) = inline {
            config = config.merge(Self::parse_jsonc(content, "<env>")?);
        }

        if let Some(path) = project_dir.and_then(|dir| first_existing(dir, PROJECT_FILE_NAMES)) {
            config = config.merge(Self::read_file(&path).await?);
            sources.push(path);
        }

        config.validate()?;
        debug!(?sources, max_entries = ?config.max_entries, "Loaded history config");
        Ok((config, sources))
    }

    /// Load and validate configuration from a single file.
    pub async fn load_file(path: &Path) -> HistoryResult<Self> {
        let config = Self::read_file(path).await?;
        config.validate()?;
        Ok(config)
    }

    async fn read_file(path: &Path) -> HistoryResult<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse_jsonc(&content, &path.display().to_string())
    }

    /// Write this config as pretty JSON.
    pub async fn save(&self, path: &Path) -> HistoryResult<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        tracing::info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Get the global config directory.
    pub fn global_config_dir() -> Option<PathBuf> {
        #[cfg(unix)]
        {
            if let Some(home) = dirs::home_dir() {
                let xdg_config = home.join(".config").join("rewind");
                if xdg_config.exists() {
                    return Some(xdg_config);
                }
            }
        }

        dirs::config_dir().map(|d| d.join("rewind"))
    }

    /// Parse JSONC (JSON with comments).
    fn parse_jsonc(content: &str, source: &str) -> HistoryResult<Self> {
        let stripped = strip_comments(content);

        serde_json::from_str(&stripped).map_err(|e| {
            ConfigError::InvalidJson {
                path: source.to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

fn first_existing(dir: &Path, names: &[&str]) -> Option<PathBuf> {
    names.iter().map(|name| dir.join(name)).find(|p| p.exists())
}

/// Where the comment scanner is inside a JSONC document.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Json,
    Str,
    StrEscape,
    Slash,
    LineComment,
    BlockComment,
    BlockStar,
}

/// Strip `//` and `/* */` comments outside of string literals.
///
/// Newlines inside comments are kept so serde_json error positions still
/// point at the right line.
fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut scan = Scan::Json;

    for c in input.chars() {
        scan = match (scan, c) {
            (Scan::Json, '"') => {
                out.push(c);
                Scan::Str
            }
            (Scan::Json, '/') => Scan::Slash,
            (Scan::Json, _) => {
                out.push(c);
                Scan::Json
            }
            (Scan::Str, '\\') => {
                out.push(c);
                Scan::StrEscape
            }
            (Scan::Str, '"') => {
                out.push(c);
                Scan::Json
            }
            (Scan::Str | Scan::StrEscape, _) => {
                out.push(c);
                Scan::Str
            }
            (Scan::Slash, '/') => Scan::LineComment,
            (Scan::Slash, '*') => Scan::BlockComment,
            (Scan::Slash, '"') => {
                out.push('/');
                out.push(c);
                Scan::Str
            }
            (Scan::Slash, _) => {
                out.push('/');
                out.push(c);
                Scan::Json
            }
            (Scan::LineComment, '\n') => {
                out.push(c);
                Scan::Json
            }
            (Scan::LineComment, _) => Scan::LineComment,
            (Scan::BlockComment | Scan::BlockStar, '\n') => {
                out.push(c);
                Scan::BlockComment
            }
            (Scan::BlockComment | Scan::BlockStar, '*') => Scan::BlockStar,
            (Scan::BlockStar, '/') => Scan::Json,
            (Scan::BlockComment | Scan::BlockStar, _) => Scan::BlockComment,
        };
    }

    // A lone trailing slash is not a comment
    if scan == Scan::Slash {
        out.push('/');
    }

    out
}
