pub mod error;
pub mod rate_limit;
pub mod runner;
pub mod status;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use error::SyncError;
pub use rate_limit::RateLimit;
pub use runner::{SyncRunner, TriggerOutcome};
pub use status::SyncProgress;
pub use sync::{SyncComponents, SyncOrchestrator};
