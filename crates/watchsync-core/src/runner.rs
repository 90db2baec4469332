use crate::error::SyncError;
use crate::status::SyncProgress;
use crate::sync::SyncOrchestrator;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;
use watchsync_config::OperationLog;
use watchsync_models::{RunCounters, SyncStatus};

const ALREADY_RUNNING: &str = "Sync already in progress, ignoring trigger";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Started,
    AlreadyRunning,
}

/// Entry point shared by the scheduler and the manual trigger.
///
/// At most one pass runs at a time. A trigger that arrives while a pass is in
/// flight is rejected rather than queued.
#[derive(Clone)]
pub struct SyncRunner {
    orchestrator: Arc<SyncOrchestrator>,
    gate: Arc<Mutex<()>>,
    progress: SyncProgress,
}

impl SyncRunner {
    pub fn new(orchestrator: SyncOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            gate: Arc::new(Mutex::new(())),
            progress: SyncProgress::new(),
        }
    }

    pub fn log(&self) -> &OperationLog {
        self.orchestrator.log()
    }

    pub fn status(&self) -> SyncStatus {
        self.progress.snapshot()
    }

    pub fn is_running(&self) -> bool {
        self.progress.is_running()
    }

    /// Take the gate. Yields the previous pass's counters along with the guard.
    fn acquire(&self) -> Option<(OwnedMutexGuard<()>, RunCounters)> {
        match self.gate.clone().try_lock_owned() {
            Ok(guard) => {
                let previous = self.progress.begin();
                Some((guard, previous))
            }
            Err(_) => {
                self.log().warning(ALREADY_RUNNING);
                None
            }
        }
    }

    async fn run_guarded(
        &self,
        _guard: OwnedMutexGuard<()>,
        previous: RunCounters,
    ) -> Result<RunCounters, SyncError> {
        let result = self.orchestrator.run(&self.progress).await;
        match &result {
            Ok(counters) => self.progress.finish(*counters, true),
            Err(e) => {
                debug!(error = %e, "Sync pass ended at the config guard");
                // Status keeps describing the last completed pass
                self.progress.finish(previous, false);
            }
        }
        result
    }

    /// Start a pass in the background and return immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn trigger(&self) -> TriggerOutcome {
        let Some((guard, previous)) = self.acquire() else {
            return TriggerOutcome::AlreadyRunning;
        };
        let runner = self.clone();
        tokio::spawn(async move {
            let _ = runner.run_guarded(guard, previous).await;
        });
        TriggerOutcome::Started
    }

    /// Run a pass to completion on the caller's task.
    ///
    /// Returns `None` when another pass already holds the gate.
    pub async fn run_exclusive(&self) -> Option<Result<RunCounters, SyncError>> {
        let (guard, previous) = self.acquire()?;
        Some(self.run_guarded(guard, previous).await)
    }
}
