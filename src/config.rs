use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".tpotrc.json";

/// Delimiter tokens and file extensions recognized by the extractor.
///
/// Immutable once constructed. Embedding callers build one directly;
/// the CLI loads an optional `.tpotrc.json` and falls back to defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Token opening a template tag.
    #[serde(default = "default_left_delimiter")]
    pub left_delimiter: String,
    /// Token closing a template tag.
    #[serde(default = "default_right_delimiter")]
    pub right_delimiter: String,
    /// Command name of the translation tag.
    #[serde(default = "default_command")]
    pub command: String,
    /// Extensions of template files, used when scanning a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_left_delimiter() -> String {
    "{".to_string()
}

fn default_right_delimiter() -> String {
    "}".to_string()
}

fn default_command() -> String {
    "t".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["tpl".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            left_delimiter: default_left_delimiter(),
            right_delimiter: default_right_delimiter(),
            command: default_command(),
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any delimiter token or the command name is empty,
    /// or if the extension list is empty.
    pub fn validate(&self) -> Result<()> {
        if self.left_delimiter.is_empty() {
            bail!("'leftDelimiter' must not be empty");
        }
        if self.right_delimiter.is_empty() {
            bail!("'rightDelimiter' must not be empty");
        }
        if self.command.is_empty() {
            bail!("'command' must not be empty");
        }
        if self.extensions.iter().any(|e| e.is_empty()) {
            bail!("'extensions' must not contain empty entries");
        }
        Ok(())
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
