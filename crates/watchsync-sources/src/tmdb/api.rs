use crate::error::SourceError;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::debug;
use watchsync_models::{AvailabilityResult, MediaKind};

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
pub struct FindResult {
    pub id: u64,
}

/// `GET /find/{external_id}` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FindResponse {
    #[serde(default)]
    pub movie_results: Vec<FindResult>,
    #[serde(default)]
    pub tv_results: Vec<FindResult>,
}

impl FindResponse {
    /// First movie match, else first series match
    pub fn best_match(&self) -> Option<(u64, MediaKind)> {
        self.movie_results
            .first()
            .map(|m| (m.id, MediaKind::Movie))
            .or_else(|| self.tv_results.first().map(|t| (t.id, MediaKind::Series)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Provider {
    pub provider_id: u32,
    pub provider_name: String,
}

/// Providers for one region. Only subscription (`flatrate`) offers count;
/// rent and buy listings are left undecoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub flatrate: Vec<Provider>,
}

/// `GET /{movie|tv}/{id}/watch/providers` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

impl WatchProvidersResponse {
    /// Match the region's subscription providers against the allow-list.
    ///
    /// Rental and purchase offers never count. A missing region is unavailable.
    pub fn availability(&self, region: &str, allowed_provider_ids: &BTreeSet<u32>) -> AvailabilityResult {
        let Some(providers) = self.results.get(&region.to_ascii_uppercase()) else {
            return AvailabilityResult::unavailable();
        };
        let matched = providers
            .flatrate
            .iter()
            .filter(|p| allowed_provider_ids.contains(&p.provider_id))
            .map(|p| p.provider_name.clone())
            .collect();
        AvailabilityResult::from_matches(matched)
    }
}

/// Thin HTTP client for the catalog metadata API
pub struct TmdbHttpClient {
    client: Client,
    base_url: String,
}

impl TmdbHttpClient {
    pub fn new() -> Result<Self, SourceError> {
        Self::with_base_url(TMDB_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(TMDB_TIMEOUT)
            .build()
            .map_err(|e| SourceError::Setup(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn find_by_imdb_id(&self, imdb_id: &str, api_key: &str) -> Result<FindResponse, SourceError> {
        let url = format!("{}/find/{}", self.base_url, imdb_id);
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key), ("external_source", "imdb_id")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { endpoint: "catalog find", status });
        }
        let body: FindResponse = response.json().await?;
        debug!(
            imdb_id,
            movies = body.movie_results.len(),
            series = body.tv_results.len(),
            "Catalog find response"
        );
        Ok(body)
    }

    pub async fn watch_providers(
        &self,
        target_id: u64,
        media_kind: MediaKind,
        api_key: &str,
    ) -> Result<WatchProvidersResponse, SourceError> {
        let url = format!(
            "{}/{}/{}/watch/providers",
            self.base_url,
            media_kind.catalog_path(),
            target_id
        );
        let response = self
            .client
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { endpoint: "catalog watch providers", status });
        }
        let body: WatchProvidersResponse = response.json().await?;
        debug!(target_id, regions = body.results.len(), "Catalog watch providers response");
        Ok(body)
    }
}
