use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {}", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Cannot write config file {}: {}", .0.display(), .1)]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Invalid config file {}: {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub target: TargetConfig,
    pub probe: ProbeConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    pub base_url: String,
    pub host_marker: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
    pub preview_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub summary_file: PathBuf,
    pub client_file: PathBuf,
    pub client_class: String,
    pub user_agent: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "https://arkkies.com".to_string(),
            host_marker: "arkkies.com".to_string(),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            preview_chars: 500,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_file: PathBuf::from("arkkies_api_analysis.json"),
            client_file: PathBuf::from("ArkkiesRealAPI.js"),
            client_class: "ArkkiesRealAPI".to_string(),
            user_agent: "ArkkiesApp/1.0".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::Write(path.to_path_buf(), e))?;
        Ok(())
    }
}
