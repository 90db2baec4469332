use crate::rate_limit::RateLimit;
use crate::sync::{SyncComponents, SyncOrchestrator};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use watchsync_config::{ConfigStore, MemoryConfigStore, MemoryLogStore, OperationLog, SyncConfig};
use watchsync_models::{AvailabilityResult, MediaKind, SourceItem};
use watchsync_sources::{AvailabilityChecker, IdentifierResolver, ListExtractor, WatchlistWriter};

pub fn complete_config() -> SyncConfig {
    SyncConfig {
        source_list_url: "https://www.imdb.com/list/ls000000001/".to_string(),
        remote_auth_token: "plex-token".to_string(),
        catalog_api_key: "tmdb-key".to_string(),
        region: "US".to_string(),
        allowed_provider_ids: [8, 337].into_iter().collect(),
    }
}

#[derive(Default)]
pub struct FakeExtractor {
    items: Mutex<Vec<SourceItem>>,
    last_url: Mutex<Option<String>>,
    hold: Mutex<Option<Arc<Notify>>>,
    calls: AtomicUsize,
}

impl FakeExtractor {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_url(&self) -> Option<String> {
        self.last_url.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListExtractor for FakeExtractor {
    async fn extract(&self, page_url: &str) -> Vec<SourceItem> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_url.lock().unwrap() = Some(page_url.to_string());
        let hold = self.hold.lock().unwrap().clone();
        if let Some(hold) = hold {
            hold.notified().await;
        }
        self.items.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct FakeResolver {
    ids: Mutex<HashMap<String, (u64, MediaKind)>>,
    calls: AtomicUsize,
}

impl FakeResolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentifierResolver for FakeResolver {
    async fn resolve(&self, external_id: &str, _api_key: &str) -> Option<(u64, MediaKind)> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ids.lock().unwrap().get(external_id).copied()
    }
}

#[derive(Default)]
pub struct FakeAvailability {
    providers: Mutex<HashMap<u64, Vec<String>>>,
    calls: AtomicUsize,
}

impl FakeAvailability {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AvailabilityChecker for FakeAvailability {
    async fn check_availability(
        &self,
        target_id: u64,
        _media_kind: MediaKind,
        _api_key: &str,
        _region: &str,
        _allowed_provider_ids: &BTreeSet<u32>,
    ) -> AvailabilityResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.providers.lock().unwrap().get(&target_id) {
            Some(names) => AvailabilityResult::from_matches(names.clone()),
            None => AvailabilityResult::unavailable(),
        }
    }
}

#[derive(Default)]
pub struct FakeWriter {
    failing: Mutex<HashSet<String>>,
    written: Mutex<Vec<(String, MediaKind)>>,
    calls: AtomicUsize,
}

impl FakeWriter {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn written(&self) -> Vec<(String, MediaKind)> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl WatchlistWriter for FakeWriter {
    async fn add_to_watchlist(&self, external_id: &str, media_kind: MediaKind, _auth_token: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.lock().unwrap().contains(external_id) {
            return false;
        }
        self.written
            .lock()
            .unwrap()
            .push((external_id.to_string(), media_kind));
        true
    }
}

/// In-memory collaborators with call counters
pub struct Fakes {
    pub extractor: Arc<FakeExtractor>,
    pub resolver: Arc<FakeResolver>,
    pub availability: Arc<FakeAvailability>,
    pub writer: Arc<FakeWriter>,
    pub config_store: Arc<MemoryConfigStore>,
    pub log: OperationLog,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            extractor: Arc::default(),
            resolver: Arc::default(),
            availability: Arc::default(),
            writer: Arc::default(),
            config_store: Arc::default(),
            log: OperationLog::new(Arc::new(MemoryLogStore::new())),
        }
    }

    pub fn with_item(self, title: &str, external_id: &str, target_id: u64, kind: MediaKind) -> Self {
        self.resolver
            .ids
            .lock()
            .unwrap()
            .insert(external_id.to_string(), (target_id, kind));
        self.with_unresolved_item(title, external_id)
    }

    pub fn with_unresolved_item(self, title: &str, external_id: &str) -> Self {
        self.extractor
            .items
            .lock()
            .unwrap()
            .push(SourceItem::new(title, external_id));
        self
    }

    pub fn available_on(self, target_id: u64, providers: &[&str]) -> Self {
        self.availability
            .providers
            .lock()
            .unwrap()
            .insert(target_id, providers.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn failing_writes_for(self, external_id: &str) -> Self {
        self.writer.failing.lock().unwrap().insert(external_id.to_string());
        self
    }

    /// Extraction blocks until the returned handle is notified
    pub fn holding_extraction(self) -> (Self, Arc<Notify>) {
        let notify = Arc::new(Notify::new());
        *self.extractor.hold.lock().unwrap() = Some(notify.clone());
        (self, notify)
    }

    pub fn total_calls(&self) -> usize {
        self.extractor.calls() + self.resolver.calls() + self.availability.calls() + self.writer.calls()
    }

    pub fn orchestrator(&self, config: SyncConfig) -> SyncOrchestrator {
        self.config_store.save(&config).unwrap();
        let components = SyncComponents {
            extractor: self.extractor.clone(),
            resolver: self.resolver.clone(),
            availability: self.availability.clone(),
            writer: self.writer.clone(),
        };
        SyncOrchestrator::new(self.config_store.clone(), self.log.clone(), components)
            .with_rate_limit(RateLimit::Unlimited)
    }
}
