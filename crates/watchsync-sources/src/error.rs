use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Network failure or timeout. The request URL is stripped so query-string keys never reach the logs.
    #[error("request failed: {0}")]
    Transport(reqwest::Error),
    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },
    #[error("malformed {0} response")]
    Parse(&'static str),
    #[error("HTTP client setup failed: {0}")]
    Setup(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return SourceError::Parse("JSON");
        }
        SourceError::Transport(e.without_url())
    }
}
