use std::time::Duration;

use serde::Deserialize;

use crate::config::CatalogSettings;

use super::error::CatalogError;
use super::model::{CatalogFetcher, Track};

#[derive(Debug, Deserialize)]
struct PlaylistTracks {
    #[serde(default)]
    data: Vec<DeezerTrack>,
}

#[derive(Debug, Deserialize)]
struct DeezerTrack {
    id: u64,
    title: String,
    #[serde(default)]
    preview: String,
    artist: DeezerArtist,
    album: DeezerAlbum,
}

#[derive(Debug, Deserialize)]
struct DeezerArtist {
    name: String,
}

#[derive(Debug, Deserialize)]
struct DeezerAlbum {
    #[serde(default)]
    cover_medium: String,
}

impl From<DeezerTrack> for Track {
    fn from(t: DeezerTrack) -> Self {
        Self {
            id: t.id.to_string(),
            title: t.title,
            artist: t.artist.name,
            album_art: t.album.cover_medium,
            preview: t.preview,
        }
    }
}

/// Fetches playlist tracks from the Deezer public API.
pub struct DeezerCatalog {
    settings: CatalogSettings,
}

impl DeezerCatalog {
    pub fn new(settings: CatalogSettings) -> Self {
        Self { settings }
    }

    fn playlist_url(&self, playlist_id: &str) -> String {
        format!(
            "{}/playlist/{}/tracks?index=0&limit={}",
            self.settings.api_base.trim_end_matches('/'),
            playlist_id,
            self.settings.limit
        )
    }

    fn try_fetch(&self, language: &str, category: &str) -> Result<Vec<Track>, CatalogError> {
        let playlist_id = self
            .settings
            .playlist_id(language, category)
            .ok_or_else(|| CatalogError::UnknownPlaylist {
                language: language.to_string(),
                category: category.to_string(),
            })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.settings.timeout_secs))
            .build()?;

        let url = self.playlist_url(playlist_id);
        log::debug!("fetching playlist {url}");
        let body = client.get(&url).send()?.error_for_status()?.bytes()?;
        parse_playlist(&body)
    }
}

/// Decode a playlist response, keeping only tracks with a preview.
pub(super) fn parse_playlist(body: &[u8]) -> Result<Vec<Track>, CatalogError> {
    let response: PlaylistTracks = serde_json::from_slice(body)?;
    Ok(response
        .data
        .into_iter()
        .map(Track::from)
        .filter(Track::is_playable)
        .collect())
}

impl CatalogFetcher for DeezerCatalog {
    fn fetch_pool(&self, language: &str, category: &str) -> Vec<Track> {
        match self.try_fetch(language, category) {
            Ok(tracks) => {
                if tracks.is_empty() {
                    log::warn!("playlist {language} / {category} has no playable previews");
                } else {
                    log::info!(
                        "fetched {} playable tracks for {language} / {category}",
                        tracks.len()
                    );
                }
                tracks
            }
            Err(e) => {
                log::warn!("catalog fetch failed: {e}");
                Vec::new()
            }
        }
    }
}
