use std::path::{Path, PathBuf};

use lofty::prelude::{Accessor, TaggedFileExt};
use walkdir::WalkDir;

use crate::config::CatalogSettings;

use super::error::CatalogError;
use super::model::{CatalogFetcher, Track};

fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    let exts: Vec<String> = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read title and artist tags; missing tags fall back to the file stem and "Unknown".
fn read_tags(path: &Path) -> (String, String) {
    let mut title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    let mut artist = "Unknown".to_string();

    if let Ok(tagged) = lofty::read_from_path(path) {
        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.title() {
                if !v.trim().is_empty() {
                    title = v.trim().to_string();
                }
            }
            if let Some(v) = tag.artist() {
                if !v.trim().is_empty() {
                    artist = v.trim().to_string();
                }
            }
        }
    }

    (title, artist)
}

/// Scan `dir` recursively for audio files and turn each into a `Track` whose
/// preview reference is the file path.
pub fn scan(dir: &Path, extensions: &[String]) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, extensions) {
            let (title, artist) = read_tags(path);
            let preview = path.to_string_lossy().into_owned();
            tracks.push(Track {
                id: preview.clone(),
                title,
                artist,
                album_art: String::new(),
                preview,
            });
        }
    }

    tracks.sort_by_key(|t| format!("{} - {}", t.artist, t.title).to_lowercase());
    tracks
}

/// Builds the pool from a directory of audio files. Language and category are
/// ignored; the directory is the whole catalog.
pub struct LocalCatalog {
    dir: PathBuf,
    extensions: Vec<String>,
}

impl LocalCatalog {
    pub fn new(dir: PathBuf, settings: &CatalogSettings) -> Self {
        Self {
            dir,
            extensions: settings.extensions.clone(),
        }
    }

    fn try_scan(&self) -> Result<Vec<Track>, CatalogError> {
        if !self.dir.is_dir() {
            return Err(CatalogError::MissingDirectory(self.dir.clone()));
        }
        Ok(scan(&self.dir, &self.extensions))
    }
}

impl CatalogFetcher for LocalCatalog {
    fn fetch_pool(&self, _language: &str, _category: &str) -> Vec<Track> {
        match self.try_scan() {
            Ok(tracks) => {
                log::info!("found {} tracks under {}", tracks.len(), self.dir.display());
                tracks
            }
            Err(e) => {
                log::warn!("local catalog unavailable: {e}");
                Vec::new()
            }
        }
    }
}
