use std::path::{Path, PathBuf};

use anyhow::Context;
use dj_export::DEFAULT_OUTPUT_PATH;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "dj.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// The file `load` would read: the explicit path, or `dj.toml` when it
    /// exists in the working directory.
    pub fn locate(path: Option<&Path>) -> Option<PathBuf> {
        match path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        }
    }

    /// Reads `path`, or falls back to defaults when no path was given and the
    /// default file is absent.
    pub fn load(path: Option<&Path>) -> Result<Self, anyhow::Error> {
        match Self::locate(path) {
            Some(path) => {
                Self::from_file(&path).with_context(|| format!("reading {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub kind: InputKindConfig,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InputKindConfig {
    #[default]
    Sample,
    Csv,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub create_dirs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            create_dirs: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests;
