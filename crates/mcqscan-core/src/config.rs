//! mcqscan configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::rules::RulesConfig;

/// Name of the config file looked up in the current directory.
pub const CONFIG_FILE: &str = "mcqscan.toml";

/// Top-level mcqscan configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqscanConfig {
    /// Default input PDF.
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Default report path.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Default report format ("text" or "json").
    #[serde(default = "default_format")]
    pub format: String,
    /// Scan rules.
    #[serde(default)]
    pub rules: RulesConfig,
}

fn default_input() -> PathBuf {
    PathBuf::from("Class_9_Science_English_Medium-2024_Edition-www.tntextbooks.in.pdf")
}
fn default_output() -> PathBuf {
    PathBuf::from("extracted_mcqs.txt")
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for McqscanConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            format: default_format(),
            rules: RulesConfig::default(),
        }
    }
}

/// Parse a config from a TOML string.
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<McqscanConfig> {
    toml::from_str(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))
}

/// Load configuration from the current directory, or fall back to defaults.
pub fn load_config() -> Result<McqscanConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default location.
///
/// Search order:
/// 1. the explicit path, which must exist
/// 2. `mcqscan.toml` in the current directory
/// 3. built-in defaults
pub fn load_config_from(path: Option<&Path>) -> Result<McqscanConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from(CONFIG_FILE);
            local.exists().then_some(local)
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content, &path)?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(config)
        }
        None => Ok(McqscanConfig::default()),
    }
}
