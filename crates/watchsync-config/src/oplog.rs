use crate::log_store::LogStore;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};
use watchsync_models::{LogEntry, Severity};

/// The single logging capability shared by every component.
///
/// Appends from the scheduler path and the manual-trigger path are serialized
/// through one writer lock, held only for the store's read-modify-write.
/// Each entry is mirrored to `tracing`. Store failures are reported through
/// `tracing` and never reach the caller.
#[derive(Clone)]
pub struct OperationLog {
    store: Arc<dyn LogStore>,
    writer: Arc<Mutex<()>>,
}

impl OperationLog {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        Self {
            store,
            writer: Arc::new(Mutex::new(())),
        }
    }

    pub fn append(&self, message: impl Into<String>, severity: Severity) {
        let entry = LogEntry::now(message, severity);
        match severity {
            Severity::Info | Severity::Success => info!(severity = %severity, "{}", entry.message),
            Severity::Warning => warn!("{}", entry.message),
            Severity::Error => error!("{}", entry.message),
        }

        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = self.store.append(entry) {
            warn!(error = %e, "Failed to persist operation log entry");
        }
    }

    pub fn info(&self, message: impl Into<String>) {
        self.append(message, Severity::Info);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.append(message, Severity::Success);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.append(message, Severity::Warning);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.append(message, Severity::Error);
    }

    /// Current entries, newest first. An unreadable store reads as empty.
    pub fn entries(&self) -> Vec<LogEntry> {
        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        self.store.entries().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read operation log");
            Vec::new()
        })
    }

    pub fn clear(&self) -> Result<(), crate::StoreError> {
        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        self.store.clear()
    }
}
