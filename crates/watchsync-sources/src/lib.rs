pub mod error;
pub mod imdb;
pub mod plex;
pub mod tmdb;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::SourceError;
pub use imdb::ImdbListExtractor;
pub use plex::PlexWatchlist;
pub use tmdb::TmdbCatalog;
pub use traits::{AvailabilityChecker, IdentifierResolver, ListExtractor, WatchlistWriter};
