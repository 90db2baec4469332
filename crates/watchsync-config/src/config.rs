use crate::error::{ConfigError, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::debug;

/// The user-editable sync settings.
///
/// Loaded fresh at the start of every pass, so edits take effect on the next sync.
/// Keys are camelCase on disk and on the control surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SyncConfig {
    #[serde(default)]
    pub source_list_url: String,
    #[serde(default)]
    pub remote_auth_token: String,
    #[serde(default)]
    pub catalog_api_key: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub allowed_provider_ids: BTreeSet<u32>,
}

fn default_region() -> String {
    "US".to_string()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_list_url: String::new(),
            remote_auth_token: String::new(),
            catalog_api_key: String::new(),
            region: default_region(),
            allowed_provider_ids: BTreeSet::new(),
        }
    }
}

impl SyncConfig {
    /// Names of the required fields that are blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.source_list_url.trim().is_empty() {
            missing.push("sourceListUrl");
        }
        if self.remote_auth_token.trim().is_empty() {
            missing.push("remoteAuthToken");
        }
        if self.catalog_api_key.trim().is_empty() {
            missing.push("catalogApiKey");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Incomplete { missing })
        }
    }

    /// Copy with secrets masked, for display
    pub fn masked(&self) -> Self {
        Self {
            remote_auth_token: mask(&self.remote_auth_token),
            catalog_api_key: mask(&self.catalog_api_key),
            ..self.clone()
        }
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let tail: String = secret
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("****{}", tail)
    }
}

/// Upper-case a region code and check it is two ASCII letters
pub fn normalize_region(region: &str) -> Result<String, ConfigError> {
    let region = region.trim().to_ascii_uppercase();
    if region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(region)
    } else {
        Err(ConfigError::InvalidRegion(region))
    }
}

/// Read/write access to the persisted config document.
///
/// `save` replaces the whole document; there is no field-level merge.
pub trait ConfigStore: Send + Sync {
    /// Returns the default record when nothing has been saved yet
    fn load(&self) -> Result<SyncConfig, StoreError>;
    fn save(&self, config: &SyncConfig) -> Result<(), StoreError>;
}

pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<SyncConfig, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Config file does not exist, using defaults");
            return Ok(SyncConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        let config: SyncConfig = toml::from_str(&content)?;
        Ok(config)
    }

    fn save(&self, config: &SyncConfig) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(config)?;
        // Write beside the target and rename so readers never see a half-written document
        let tmp_path = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryConfigStore {
    config: RwLock<Option<SyncConfig>>,
}

impl MemoryConfigStore {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config: RwLock::new(Some(config)),
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<SyncConfig, StoreError> {
        let guard = self.config.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, config: &SyncConfig) -> Result<(), StoreError> {
        let mut guard = self.config.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(config.clone());
        Ok(())
    }
}
