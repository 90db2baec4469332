use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counters for a single orchestration pass
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunCounters {
    pub processed: usize,
    pub added: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Snapshot served by the status endpoint.
///
/// While a pass is in flight `counters` are live; otherwise they belong to the
/// most recent completed pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncStatus {
    pub status: RunState,
    pub last_sync: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub counters: RunCounters,
}
