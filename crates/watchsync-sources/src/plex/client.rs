use crate::error::SourceError;
use crate::plex::api::PlexHttpClient;
use crate::traits::WatchlistWriter;
use async_trait::async_trait;
use watchsync_config::OperationLog;
use watchsync_models::MediaKind;

/// Adds titles to the user's Plex watchlist
pub struct PlexWatchlist {
    api: PlexHttpClient,
    log: OperationLog,
}

impl PlexWatchlist {
    pub fn new(log: OperationLog) -> Result<Self, SourceError> {
        Ok(Self {
            api: PlexHttpClient::new()?,
            log,
        })
    }

    pub fn with_base_url(base_url: String, log: OperationLog) -> Result<Self, SourceError> {
        Ok(Self {
            api: PlexHttpClient::with_base_url(base_url)?,
            log,
        })
    }
}

#[async_trait]
impl WatchlistWriter for PlexWatchlist {
    async fn add_to_watchlist(&self, external_id: &str, media_kind: MediaKind, auth_token: &str) -> bool {
        let rating_key = match self.api.match_rating_key(external_id, media_kind, auth_token).await {
            Ok(Some(key)) => key,
            Ok(None) => {
                self.log.warning(format!("No watchlist record matches {}", external_id));
                return false;
            }
            Err(e) => {
                self.log.error(format!("Error adding to watchlist: {}", e));
                return false;
            }
        };

        match self.api.add_to_watchlist(&rating_key, auth_token).await {
            Ok(()) => true,
            Err(e) => {
                self.log.error(format!("Error adding to watchlist: {}", e));
                false
            }
        }
    }
}
