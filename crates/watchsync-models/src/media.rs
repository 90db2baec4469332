use serde::{Deserialize, Serialize};

/// A title discovered on the source list page.
///
/// Identity is `external_id` (always a lowercase `tt` + digits token).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceItem {
    pub title: String,
    pub external_id: String,
    pub source_url: String,
}

impl SourceItem {
    pub fn new(title: impl Into<String>, external_id: impl Into<String>) -> Self {
        let external_id = external_id.into();
        Self {
            title: title.into(),
            source_url: format!("https://www.imdb.com/title/{}/", external_id),
            external_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Path segment the catalog uses for this kind ("movie" / "tv")
    pub fn catalog_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

/// A source item cross-referenced into the secondary catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedItem {
    pub item: SourceItem,
    pub target_id: u64,
    pub media_kind: MediaKind,
}
