use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow, bail};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";

const APP_DIR: &str = "handbook-chat";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: String,
    pub single_in_flight: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            single_in_flight: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load the user's config file, falling back to defaults when absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply command-line / environment values on top of the file.
    pub fn with_overrides(
        mut self,
        server: Option<String>,
        log_file: Option<PathBuf>,
        single_in_flight: bool,
    ) -> Self {
        if let Some(server) = server {
            self.server = server;
        }
        if log_file.is_some() {
            self.log_file = log_file;
        }
        self.single_in_flight |= single_in_flight;
        self
    }

    /// Reject a server address that could never be reached.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.server)
            .with_context(|| format!("invalid server URL '{}'", self.server))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => bail!("unsupported scheme '{}' in server URL '{}'", other, self.server),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        if let Some(path) = &self.log_file {
            return path.clone();
        }
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
            .join("handbook-chat.log")
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join(APP_DIR).join("config.json"))
    }
}
