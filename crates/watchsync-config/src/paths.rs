use anyhow::Result;
use std::path::{Path, PathBuf};

/// Get the container base path from environment variable, defaulting to "/config"
pub fn container_base_path() -> PathBuf {
    std::env::var("WATCHSYNC_BASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/config"))
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("watchsync");

        Ok(Self::with_base(&base_dir))
    }

    pub fn from_docker_env() -> Self {
        Self::with_base(&container_base_path())
    }

    pub fn with_base(base: &Path) -> Self {
        Self {
            config_dir: base.to_path_buf(),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Operation log shown to users (bounded, newest first)
    pub fn operation_log_file(&self) -> PathBuf {
        self.config_dir.join("logs.json")
    }

    pub fn daemon_log_file(&self) -> PathBuf {
        self.log_dir.join("watchsync.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // The container image creates the base directory, so its presence means we run inside it
        let base = container_base_path();
        if base.exists() {
            return Self::from_docker_env();
        }

        Self::new().unwrap_or_else(|_| Self::from_docker_env())
    }
}
