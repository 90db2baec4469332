use crate::error::SyncError;
use crate::rate_limit::RateLimit;
use crate::status::SyncProgress;
use std::sync::Arc;
use tracing::{debug, instrument};
use watchsync_config::{ConfigStore, OperationLog, SyncConfig};
use watchsync_models::{ResolvedItem, RunCounters, SourceItem};
use watchsync_sources::{AvailabilityChecker, IdentifierResolver, ListExtractor, WatchlistWriter};

const BANNER: &str = "==================================================";

/// The four collaborators one pass is composed of
#[derive(Clone)]
pub struct SyncComponents {
    pub extractor: Arc<dyn ListExtractor>,
    pub resolver: Arc<dyn IdentifierResolver>,
    pub availability: Arc<dyn AvailabilityChecker>,
    pub writer: Arc<dyn WatchlistWriter>,
}

/// Runs one reconciliation pass: extract, resolve, filter by availability, write.
///
/// Config is read from the store at the start of every pass. Items are handled
/// one at a time with the configured [`RateLimit`] between them; no item's
/// failure ends the pass.
pub struct SyncOrchestrator {
    config_store: Arc<dyn ConfigStore>,
    log: OperationLog,
    components: SyncComponents,
    rate_limit: RateLimit,
}

/// What happened to a single item
enum ItemOutcome {
    Unresolved,
    Skipped,
    Added,
    Failed,
}

impl SyncOrchestrator {
    pub fn new(config_store: Arc<dyn ConfigStore>, log: OperationLog, components: SyncComponents) -> Self {
        Self {
            config_store,
            log,
            components,
            rate_limit: RateLimit::default(),
        }
    }

    pub fn with_rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn log(&self) -> &OperationLog {
        &self.log
    }

    /// Load config and apply the entry guard. Logs exactly one error on failure.
    fn load_config(&self) -> Result<SyncConfig, SyncError> {
        let config = match self.config_store.load() {
            Ok(config) => config,
            Err(e) => {
                self.log.error(format!("Failed to load configuration: {}", e));
                return Err(SyncError::ConfigUnavailable(e));
            }
        };

        if let Err(e) = config.validate() {
            self.log.error(format!("{}. Please configure all settings.", capitalize(&e.to_string())));
            return Err(SyncError::InvalidConfig(e));
        }
        Ok(config)
    }

    #[instrument(skip(self, progress))]
    pub async fn run(&self, progress: &SyncProgress) -> Result<RunCounters, SyncError> {
        let config = self.load_config()?;

        self.log.info(BANNER);
        self.log.info("Starting sync process");
        self.log.info(format!("List URL: {}", config.source_list_url));
        self.log.info(format!("Region: {}", config.region));
        self.log.info(format!(
            "Streaming services: {} configured",
            config.allowed_provider_ids.len()
        ));
        self.log.info(BANNER);

        let items = self.components.extractor.extract(&config.source_list_url).await;
        if items.is_empty() {
            self.log.warning("No items found in list. Check if the list is public and has items.");
            return Ok(RunCounters::default());
        }
        self.log.info(format!("Found {} items in list", items.len()));

        let mut counters = RunCounters::default();
        let total = items.len();
        for (idx, item) in items.into_iter().enumerate() {
            if idx > 0 {
                self.rate_limit.pause().await;
            }
            counters.processed += 1;
            progress.update(counters);
            self.log.info(format!("Processing {}/{}: {}", idx + 1, total, item.title));

            match self.process_item(item, &config).await {
                ItemOutcome::Skipped => counters.skipped += 1,
                ItemOutcome::Added => counters.added += 1,
                ItemOutcome::Unresolved | ItemOutcome::Failed => {}
            }
            progress.update(counters);
        }

        self.log.info(BANNER);
        self.log.success(format!(
            "Sync complete: {} processed, {} added, {} skipped",
            counters.processed, counters.added, counters.skipped
        ));
        self.log.info(BANNER);
        Ok(counters)
    }

    async fn process_item(&self, item: SourceItem, config: &SyncConfig) -> ItemOutcome {
        let Some((target_id, media_kind)) = self
            .components
            .resolver
            .resolve(&item.external_id, &config.catalog_api_key)
            .await
        else {
            self.log.warning(format!("Could not find catalog ID for {}", item.title));
            return ItemOutcome::Unresolved;
        };
        let resolved = ResolvedItem { item, target_id, media_kind };
        debug!(external_id = %resolved.item.external_id, target_id, ?media_kind, "Resolved item");

        let availability = self
            .components
            .availability
            .check_availability(
                resolved.target_id,
                resolved.media_kind,
                &config.catalog_api_key,
                &config.region,
                &config.allowed_provider_ids,
            )
            .await;
        if availability.is_available {
            self.log.warning(format!(
                "Skipped '{}' - available on {}",
                resolved.item.title,
                availability.matched_providers.join(", ")
            ));
            return ItemOutcome::Skipped;
        }

        let added = self
            .components
            .writer
            .add_to_watchlist(&resolved.item.external_id, resolved.media_kind, &config.remote_auth_token)
            .await;
        if added {
            self.log.success(format!("Added '{}' to watchlist", resolved.item.title));
            ItemOutcome::Added
        } else {
            self.log.error(format!("Failed to add '{}' to watchlist", resolved.item.title));
            ItemOutcome::Failed
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{complete_config, Fakes};
    use std::time::Duration;
    use tokio::time::Instant;
    use watchsync_models::{MediaKind, Severity};

    #[tokio::test]
    async fn test_skips_available_and_adds_unavailable() {
        let fakes = Fakes::new()
            .with_item("Heat", "tt0113277", 949, MediaKind::Movie)
            .with_item("Game of Thrones", "tt0944947", 1399, MediaKind::Series)
            .available_on(949, &["Netflix"]);
        let orchestrator = fakes.orchestrator(complete_config());

        let counters = orchestrator.run(&SyncProgress::new()).await.unwrap();

        assert_eq!(counters, RunCounters { processed: 2, added: 1, skipped: 1 });
        assert_eq!(fakes.writer.written(), vec![("tt0944947".to_string(), MediaKind::Series)]);

        let entries = fakes.log.entries();
        assert!(entries
            .iter()
            .any(|e| e.severity == Severity::Warning && e.message == "Skipped 'Heat' - available on Netflix"));
        assert!(entries
            .iter()
            .any(|e| e.severity == Severity::Success && e.message == "Added 'Game of Thrones' to watchlist"));
        assert_eq!(entries[1].message, "Sync complete: 2 processed, 1 added, 1 skipped");
    }

    #[tokio::test]
    async fn test_missing_api_key_makes_no_calls() {
        let fakes = Fakes::new().with_item("Heat", "tt0113277", 949, MediaKind::Movie);
        let config = SyncConfig {
            catalog_api_key: String::new(),
            ..complete_config()
        };
        let orchestrator = fakes.orchestrator(config);

        let result = orchestrator.run(&SyncProgress::new()).await;

        assert!(matches!(result, Err(SyncError::InvalidConfig(_))));
        assert_eq!(fakes.total_calls(), 0);
        let entries = fakes.log.entries();
        assert_eq!(entries.iter().filter(|e| e.severity == Severity::Error).count(), 1);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].message.contains("catalogApiKey"));
    }

    #[tokio::test]
    async fn test_unresolved_counts_as_processed_only() {
        let fakes = Fakes::new()
            .with_unresolved_item("Obscure Short", "tt0000001")
            .with_item("Heat", "tt0113277", 949, MediaKind::Movie);
        let orchestrator = fakes.orchestrator(complete_config());

        let counters = orchestrator.run(&SyncProgress::new()).await.unwrap();

        assert_eq!(counters, RunCounters { processed: 2, added: 1, skipped: 0 });
        assert_eq!(fakes.availability.calls(), 1);
        assert!(fakes
            .log
            .entries()
            .iter()
            .any(|e| e.severity == Severity::Warning && e.message == "Could not find catalog ID for Obscure Short"));
    }

    #[tokio::test]
    async fn test_write_failure_does_not_abort_batch() {
        let fakes = Fakes::new()
            .with_item("Heat", "tt0113277", 949, MediaKind::Movie)
            .with_item("Ronin", "tt0122690", 8195, MediaKind::Movie)
            .failing_writes_for("tt0113277");
        let orchestrator = fakes.orchestrator(complete_config());

        let counters = orchestrator.run(&SyncProgress::new()).await.unwrap();

        assert_eq!(counters, RunCounters { processed: 2, added: 1, skipped: 0 });
        assert_eq!(fakes.writer.calls(), 2);
        assert!(fakes
            .log
            .entries()
            .iter()
            .any(|e| e.severity == Severity::Error && e.message == "Failed to add 'Heat' to watchlist"));
    }

    #[tokio::test]
    async fn test_empty_list_ends_pass_with_warning() {
        let fakes = Fakes::new();
        let orchestrator = fakes.orchestrator(complete_config());

        let counters = orchestrator.run(&SyncProgress::new()).await.unwrap();

        assert_eq!(counters, RunCounters::default());
        assert_eq!(fakes.extractor.calls(), 1);
        assert_eq!(fakes.resolver.calls(), 0);
        let newest = &fakes.log.entries()[0];
        assert_eq!(newest.severity, Severity::Warning);
        assert!(newest.message.starts_with("No items found in list"));
    }

    #[tokio::test]
    async fn test_config_is_read_fresh_each_pass() {
        let fakes = Fakes::new().with_item("Heat", "tt0113277", 949, MediaKind::Movie);
        let orchestrator = fakes.orchestrator(SyncConfig::default());
        assert!(orchestrator.run(&SyncProgress::new()).await.is_err());

        fakes.config_store.save(&complete_config()).unwrap();
        let counters = orchestrator.run(&SyncProgress::new()).await.unwrap();
        assert_eq!(counters.added, 1);
        assert_eq!(fakes.extractor.last_url().as_deref(), Some("https://www.imdb.com/list/ls000000001/"));
    }

    #[tokio::test]
    async fn test_progress_reports_live_counters() {
        let fakes = Fakes::new()
            .with_item("Heat", "tt0113277", 949, MediaKind::Movie)
            .with_item("Ronin", "tt0122690", 8195, MediaKind::Movie);
        let orchestrator = fakes.orchestrator(complete_config());
        let progress = SyncProgress::new();

        orchestrator.run(&progress).await.unwrap();

        assert_eq!(progress.snapshot().counters, RunCounters { processed: 2, added: 2, skipped: 0 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_items_are_paced_by_fixed_delay() {
        let delay = Duration::from_millis(500);
        let fakes = Fakes::new()
            .with_item("Heat", "tt0113277", 949, MediaKind::Movie)
            .with_item("Ronin", "tt0122690", 8195, MediaKind::Movie)
            .with_item("Collateral", "tt0369339", 1538, MediaKind::Movie);
        let orchestrator = fakes
            .orchestrator(complete_config())
            .with_rate_limit(RateLimit::FixedDelay(delay));

        let start = Instant::now();
        let counters = orchestrator.run(&SyncProgress::new()).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(counters.processed, 3);
        // One pause between each pair of items, none before the first
        assert!(elapsed >= delay * 2, "elapsed {:?}", elapsed);
        assert!(elapsed < delay * 3, "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_item_pass_does_not_pause() {
        let delay = Duration::from_millis(500);
        let fakes = Fakes::new().with_item("Heat", "tt0113277", 949, MediaKind::Movie);
        let orchestrator = fakes
            .orchestrator(complete_config())
            .with_rate_limit(RateLimit::FixedDelay(delay));

        let start = Instant::now();
        orchestrator.run(&SyncProgress::new()).await.unwrap();
        assert!(start.elapsed() < delay);
    }
}
