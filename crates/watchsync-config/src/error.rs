use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config document: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("failed to serialize config document: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("failed to read or write log document: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("configuration incomplete, missing: {}", missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
    #[error("invalid region '{0}': expected a two-letter country code")]
    InvalidRegion(String),
}
