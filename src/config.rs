use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::generator::passage::DEFAULT_MAX_ATTEMPTS;
use crate::generator::wikipedia::DEFAULT_API_URL;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_word_count")]
    pub word_count: usize,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_extract_chars")]
    pub extract_chars: usize,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_word_count() -> usize {
    50
}
fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}
fn default_extract_chars() -> usize {
    1500
}
fn default_fetch_timeout_secs() -> u64 {
    10
}
fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_locale() -> String {
    "ar".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_count: default_word_count(),
            max_attempts: default_max_attempts(),
            extract_chars: default_extract_chars(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            api_url: default_api_url(),
            theme: default_theme(),
            locale: default_locale(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("raqim")
            .join("config.toml")
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Resets values that would make a build impossible (zero counts, an
    /// empty endpoint) back to their defaults.
    pub fn normalize(&mut self) {
        if self.word_count == 0 {
            self.word_count = default_word_count();
        }
        if self.max_attempts == 0 {
            self.max_attempts = default_max_attempts();
        }
        if self.extract_chars == 0 {
            self.extract_chars = default_extract_chars();
        }
        if self.fetch_timeout_secs == 0 {
            self.fetch_timeout_secs = default_fetch_timeout_secs();
        }
        if self.api_url.trim().is_empty() {
            self.api_url = default_api_url();
        }
        if !matches!(self.locale.as_str(), "ar" | "en") {
            self.locale = default_locale();
        }
    }
}
