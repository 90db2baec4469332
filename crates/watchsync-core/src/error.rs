use thiserror::Error;
use watchsync_config::{ConfigError, StoreError};

/// Reasons a pass ends before touching any upstream service.
/// Fatal to that pass only; item-level failures never surface here.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error("failed to load configuration: {0}")]
    ConfigUnavailable(#[from] StoreError),
}
