use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no playlist configured for {language} / {category}")]
    UnknownPlaylist { language: String, category: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed playlist response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("music directory {0} does not exist")]
    MissingDirectory(std::path::PathBuf),
}
