/// A candidate song for the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Album cover reference (URL or empty when unknown).
    pub album_art: String,
    /// Preview audio reference: an http(s) URL or a local file path.
    pub preview: String,
}

impl Track {
    /// A track can be used in a round only when it has a preview to play.
    pub fn is_playable(&self) -> bool {
        !self.preview.trim().is_empty()
    }
}

/// Source of the track pool.
///
/// Implementations return only playable tracks and an empty list on any
/// error; an empty pool is how callers learn that nothing can be played.
pub trait CatalogFetcher {
    fn fetch_pool(&self, language: &str, category: &str) -> Vec<Track>;
}
