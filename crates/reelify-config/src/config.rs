use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Response locale sent with every request
    #[serde(default = "default_language")]
    pub language: String,
    /// Region used to pick watch providers
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Pause before the scripted reply is shown
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Write logs to a daily-rotated file instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "tr-TR".to_string()
}

fn default_region() -> String {
    "TR".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_reply_delay_ms() -> u64 {
    500
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            region: default_region(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing file means defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.base_url cannot be empty"));
        }
        if self.tmdb.image_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.image_base_url cannot be empty"));
        }
        if self.tmdb.language.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.language cannot be empty"));
        }
        let region = self.tmdb.region.trim();
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(anyhow::anyhow!(
                "tmdb.region must be a 2-letter country code, got '{}'",
                self.tmdb.region
            ));
        }
        if self.tmdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("tmdb.timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}
