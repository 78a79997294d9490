//! Optional user configuration.
//!
//! Read from `<config dir>/browser-copy-url/config.toml`. Every field has a
//! default, and a missing file means all defaults.

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings loaded once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Copy as markdown when neither `--markdown` nor `--plain` is given.
    #[serde(default)]
    pub markdown: bool,

    /// Show a message after each copy.
    #[serde(default = "default_notify")]
    pub notify: bool,

    /// Replaces the platform copy command used by the fallback path.
    #[serde(default)]
    pub fallback_command: Option<Vec<String>>,

    /// Where the fallback path writes its scratch file. Defaults to the OS
    /// temp directory.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

fn default_notify() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markdown: false,
            notify: default_notify(),
            fallback_command: None,
            scratch_dir: None,
        }
    }
}

/// Location of the config file.
///
/// Returns an error when the platform has no config directory.
pub fn get_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| anyhow!("Could not find config directory"))?;
    Ok(dir.join("browser-copy-url").join("config.toml"))
}

impl Config {
    /// Load from the default location, see [`get_config_path`].
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    /// Load from `path`. A missing file gives [`Config::default`]; an
    /// unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.markdown);
        assert!(config.notify);
        assert!(config.fallback_command.is_none());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
        markdown = true
        fallback_command = ["xsel", "--clipboard", "--input"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.markdown);
        assert!(config.notify);
        assert_eq!(
            config.fallback_command.as_deref(),
            Some(&["xsel".to_string(), "--clipboard".into(), "--input".into()][..])
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "notify = \"sometimes\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
