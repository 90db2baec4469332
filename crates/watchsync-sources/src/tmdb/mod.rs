pub mod api;
pub mod client;

pub use api::{FindResponse, TmdbHttpClient, WatchProvidersResponse};
pub use client::TmdbCatalog;
