use crate::error::StoreError;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{debug, warn};
use watchsync_models::LogEntry;

/// Number of entries the operation log keeps; older ones are evicted silently
pub const MAX_LOG_ENTRIES: usize = 100;

/// Append-only store for operation log entries, newest first.
///
/// Implementations enforce the [`MAX_LOG_ENTRIES`] cap on every append.
pub trait LogStore: Send + Sync {
    fn append(&self, entry: LogEntry) -> Result<(), StoreError>;
    fn entries(&self) -> Result<Vec<LogEntry>, StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

fn prepend_capped(entries: &mut Vec<LogEntry>, entry: LogEntry) {
    entries.insert(0, entry);
    entries.truncate(MAX_LOG_ENTRIES);
}

/// JSON document on disk (`logs.json`)
pub struct FileLogStore {
    path: PathBuf,
}

impl FileLogStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, entries: &[LogEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Where an unreadable log document is moved before a fresh one is started
    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bad")
    }

    fn set_aside_unreadable(&self, error: &serde_json::Error) {
        let backup = self.backup_path();
        warn!(
            path = %self.path.display(),
            backup = %backup.display(),
            error = %error,
            "Log file is unreadable, starting a new one"
        );
        if let Err(e) = std::fs::rename(&self.path, &backup) {
            warn!(error = %e, "Failed to move unreadable log file aside");
        }
    }
}

impl LogStore for FileLogStore {
    fn append(&self, entry: LogEntry) -> Result<(), StoreError> {
        let mut entries = match self.entries() {
            Ok(entries) => entries,
            Err(StoreError::Json(e)) => {
                self.set_aside_unreadable(&e);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        prepend_capped(&mut entries, entry);
        self.write(&entries)
    }

    fn entries(&self) -> Result<Vec<LogEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            debug!(path = %self.path.display(), "Log file is empty");
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.write(&[])
    }
}

#[derive(Default)]
pub struct MemoryLogStore {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogStore for MemoryLogStore {
    fn append(&self, entry: LogEntry) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        prepend_capped(&mut entries, entry);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<LogEntry>, StoreError> {
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).clear();
        Ok(())
    }
}
