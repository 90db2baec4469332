pub mod availability;
pub mod log_entry;
pub mod media;
pub mod status;

pub use availability::AvailabilityResult;
pub use log_entry::{LogEntry, Severity};
pub use media::{MediaKind, ResolvedItem, SourceItem};
pub use status::{RunCounters, RunState, SyncStatus};
