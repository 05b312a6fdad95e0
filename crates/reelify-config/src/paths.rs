use anyhow::Result;
use std::path::PathBuf;

/// Base directory override, read from `REELIFY_BASE_PATH`
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("REELIFY_BASE_PATH").ok().map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelify");

        Ok(Self::from_base(base_dir))
    }

    /// Config files at the base level, collection data under `data/`
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
        }
    }

    /// Directory holding the watchlist / watched / ratings slots
    pub fn collection_dir(&self) -> PathBuf {
        self.data_dir.join("collection")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(self.collection_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/reelify on Linux)
        Self::new().unwrap_or_else(|_| Self::from_base(".reelify"))
    }
}
