use chrono::Utc;
use std::sync::{Arc, RwLock};
use watchsync_models::{RunCounters, RunState, SyncStatus};

/// Shared view of the in-flight or most recent pass, read by the status endpoint.
///
/// Guards are never held across an await.
#[derive(Clone, Default)]
pub struct SyncProgress {
    inner: Arc<RwLock<SyncStatus>>,
}

impl SyncProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SyncStatus {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_running(&self) -> bool {
        self.snapshot().status == RunState::Running
    }

    /// Mark a pass as running with fresh counters. Returns the counters of the
    /// previous pass so an aborted pass can put them back.
    pub(crate) fn begin(&self) -> RunCounters {
        let mut status = self.inner.write().unwrap_or_else(|e| e.into_inner());
        status.status = RunState::Running;
        std::mem::take(&mut status.counters)
    }

    pub(crate) fn update(&self, counters: RunCounters) {
        self.inner.write().unwrap_or_else(|e| e.into_inner()).counters = counters;
    }

    /// `completed` is false when the pass stopped at the config guard
    pub(crate) fn finish(&self, counters: RunCounters, completed: bool) {
        let mut status = self.inner.write().unwrap_or_else(|e| e.into_inner());
        status.status = RunState::Idle;
        status.counters = counters;
        if completed {
            status.last_sync = Some(Utc::now());
        }
    }
}
