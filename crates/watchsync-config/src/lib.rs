pub mod config;
pub mod error;
pub mod log_store;
pub mod oplog;
pub mod paths;

pub use config::{ConfigStore, FileConfigStore, MemoryConfigStore, SyncConfig, normalize_region};
pub use error::{ConfigError, StoreError};
pub use log_store::{FileLogStore, LogStore, MemoryLogStore, MAX_LOG_ENTRIES};
pub use oplog::OperationLog;
pub use paths::{PathManager, container_base_path};
