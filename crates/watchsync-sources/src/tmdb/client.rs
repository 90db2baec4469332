use crate::error::SourceError;
use crate::tmdb::api::TmdbHttpClient;
use crate::traits::{AvailabilityChecker, IdentifierResolver};
use async_trait::async_trait;
use std::collections::BTreeSet;
use watchsync_config::OperationLog;
use watchsync_models::{AvailabilityResult, MediaKind};

/// Identifier resolution and availability checks against the metadata catalog
pub struct TmdbCatalog {
    api: TmdbHttpClient,
    log: OperationLog,
}

impl TmdbCatalog {
    pub fn new(log: OperationLog) -> Result<Self, SourceError> {
        Ok(Self {
            api: TmdbHttpClient::new()?,
            log,
        })
    }

    pub fn with_base_url(base_url: String, log: OperationLog) -> Result<Self, SourceError> {
        Ok(Self {
            api: TmdbHttpClient::with_base_url(base_url)?,
            log,
        })
    }
}

#[async_trait]
impl IdentifierResolver for TmdbCatalog {
    async fn resolve(&self, external_id: &str, api_key: &str) -> Option<(u64, MediaKind)> {
        match self.api.find_by_imdb_id(external_id, api_key).await {
            Ok(response) => response.best_match(),
            Err(e) => {
                self.log.warning(format!("Error converting {} to catalog ID: {}", external_id, e));
                None
            }
        }
    }
}

#[async_trait]
impl AvailabilityChecker for TmdbCatalog {
    async fn check_availability(
        &self,
        target_id: u64,
        media_kind: MediaKind,
        api_key: &str,
        region: &str,
        allowed_provider_ids: &BTreeSet<u32>,
    ) -> AvailabilityResult {
        match self.api.watch_providers(target_id, media_kind, api_key).await {
            Ok(response) => response.availability(region, allowed_provider_ids),
            Err(e) => {
                self.log.warning(format!("Error checking streaming availability: {}", e));
                AvailabilityResult::unavailable()
            }
        }
    }
}
