use crate::error::SourceError;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use watchsync_models::MediaKind;

const METADATA_BASE_URL: &str = "https://metadata.provider.plex.tv";
const PLEX_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct MatchResponse {
    #[serde(rename = "MediaContainer", default)]
    media_container: MatchContainer,
}

#[derive(Debug, Default, Deserialize)]
struct MatchContainer {
    #[serde(rename = "Metadata", default)]
    metadata: Vec<MatchMetadata>,
}

#[derive(Debug, Deserialize)]
struct MatchMetadata {
    #[serde(rename = "ratingKey")]
    rating_key: RatingKey,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RatingKey {
    Text(String),
    Number(u64),
}

impl RatingKey {
    fn into_string(self) -> String {
        match self {
            RatingKey::Text(key) => key,
            RatingKey::Number(key) => key.to_string(),
        }
    }
}

/// Plex metadata-provider type code used by the matcher
fn plex_type(media_kind: MediaKind) -> &'static str {
    match media_kind {
        MediaKind::Movie => "1",
        MediaKind::Series => "2",
    }
}

pub struct PlexHttpClient {
    client: Client,
    base_url: String,
}

impl PlexHttpClient {
    pub fn new() -> Result<Self, SourceError> {
        Self::with_base_url(METADATA_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(PLEX_TIMEOUT)
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers.insert(
                    reqwest::header::HeaderName::from_static("x-plex-client-identifier"),
                    reqwest::header::HeaderValue::from_static("watchsync"),
                );
                headers
            })
            .build()
            .map_err(|e| SourceError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up the record key for an IMDb id via guid matching. `None` when nothing matches.
    pub async fn match_rating_key(
        &self,
        imdb_id: &str,
        media_kind: MediaKind,
        token: &str,
    ) -> Result<Option<String>, SourceError> {
        let url = format!("{}/library/metadata/matches", self.base_url);
        let guid = format!("imdb://{}", imdb_id);
        let response = self
            .client
            .get(&url)
            .header("X-Plex-Token", token)
            .query(&[("type", plex_type(media_kind)), ("guid", guid.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status { endpoint: "watchlist match", status });
        }
        let body: MatchResponse = response.json().await?;
        debug!(imdb_id, matches = body.media_container.metadata.len(), "Plex guid match response");

        Ok(body
            .media_container
            .metadata
            .into_iter()
            .next()
            .map(|m| m.rating_key.into_string()))
    }

    pub async fn add_to_watchlist(&self, rating_key: &str, token: &str) -> Result<(), SourceError> {
        let url = format!("{}/actions/addToWatchlist", self.base_url);
        let response = self
            .client
            .put(&url)
            .header("X-Plex-Token", token)
            .query(&[("ratingKey", rating_key)])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SourceError::Status { endpoint: "watchlist add", status })
        }
    }
}
