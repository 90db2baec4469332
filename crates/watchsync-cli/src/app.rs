use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use std::time::Duration;
use watchsync_config::{ConfigStore, FileConfigStore, FileLogStore, OperationLog, PathManager};
use watchsync_core::{RateLimit, SyncComponents, SyncOrchestrator, SyncRunner};
use watchsync_sources::{ImdbListExtractor, PlexWatchlist, TmdbCatalog};

/// File-backed stores under the resolved base directory
pub struct AppContext {
    pub paths: PathManager,
    pub config_store: Arc<FileConfigStore>,
    pub log: OperationLog,
}

impl AppContext {
    pub fn open() -> Result<Self> {
        let paths = PathManager::default();
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;

        let config_store = Arc::new(FileConfigStore::new(paths.config_file()));
        let log = OperationLog::new(Arc::new(FileLogStore::new(paths.operation_log_file())));
        tracing::debug!(config_dir = %paths.config_dir().display(), "Opened stores");

        Ok(Self {
            paths,
            config_store,
            log,
        })
    }

    /// Wire the live IMDb, TMDB and Plex clients into a runner
    pub fn runner(&self, item_delay_ms: u64) -> Result<SyncRunner> {
        let catalog = Arc::new(TmdbCatalog::new(self.log.clone())?);
        let components = SyncComponents {
            extractor: Arc::new(ImdbListExtractor::new(self.log.clone())?),
            resolver: catalog.clone(),
            availability: catalog,
            writer: Arc::new(PlexWatchlist::new(self.log.clone())?),
        };

        let rate_limit = match item_delay_ms {
            0 => RateLimit::Unlimited,
            ms => RateLimit::FixedDelay(Duration::from_millis(ms)),
        };

        let config_store: Arc<dyn ConfigStore> = self.config_store.clone();
        let orchestrator =
            SyncOrchestrator::new(config_store, self.log.clone(), components).with_rate_limit(rate_limit);
        Ok(SyncRunner::new(orchestrator))
    }
}
