use async_trait::async_trait;
use std::collections::BTreeSet;
use watchsync_models::{AvailabilityResult, MediaKind, SourceItem};

// Every operation here fails softly: failures are written to the operation
// log and come back as an empty / absent / false outcome.

#[async_trait]
pub trait ListExtractor: Send + Sync {
    /// Deduplicated items in first-discovery order; empty on any failure
    async fn extract(&self, page_url: &str) -> Vec<SourceItem>;
}

#[async_trait]
pub trait IdentifierResolver: Send + Sync {
    /// Catalog id and kind for an external id. Movies win over series.
    async fn resolve(&self, external_id: &str, api_key: &str) -> Option<(u64, MediaKind)>;
}

#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    async fn check_availability(
        &self,
        target_id: u64,
        media_kind: MediaKind,
        api_key: &str,
        region: &str,
        allowed_provider_ids: &BTreeSet<u32>,
    ) -> AvailabilityResult;
}

#[async_trait]
pub trait WatchlistWriter: Send + Sync {
    /// Idempotent add. `media_kind` selects the record type used for guid matching.
    async fn add_to_watchlist(&self, external_id: &str, media_kind: MediaKind, auth_token: &str) -> bool;
}
