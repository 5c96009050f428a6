use std::env;
use std::path::PathBuf;

use crate::catalog::{CatalogFetcher, DeezerCatalog, LocalCatalog};
use crate::config::{self, CatalogSource, HighScoreSettings, Settings};
use crate::game::{FileHighScore, HighScoreStore, MemoryHighScore};

/// Pick the track source. A directory given on the command line always wins;
/// otherwise `catalog.source` decides.
pub fn open_catalog(settings: &Settings, arg: Option<String>) -> Box<dyn CatalogFetcher> {
    if let Some(dir) = arg.map(PathBuf::from).filter(|p| p.is_dir()) {
        log::info!("using local catalog at {}", dir.display());
        return Box::new(LocalCatalog::new(dir, &settings.catalog));
    }

    match settings.catalog.source {
        CatalogSource::Deezer => {
            log::info!(
                "using deezer catalog: {} / {}",
                settings.catalog.language,
                settings.catalog.category
            );
            Box::new(DeezerCatalog::new(settings.catalog.clone()))
        }
        CatalogSource::Local => {
            let dir = settings
                .catalog
                .music_dir
                .clone()
                .or_else(|| env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from("Music"));
            log::info!("using local catalog at {}", dir.display());
            Box::new(LocalCatalog::new(dir, &settings.catalog))
        }
    }
}

/// Open the persisted high score, or keep it in memory when there is no
/// place to store it.
pub fn open_high_score(settings: &HighScoreSettings) -> Box<dyn HighScoreStore> {
    match settings
        .path
        .clone()
        .or_else(|| config::default_data_path("highscore.toml"))
    {
        Some(path) => Box::new(FileHighScore::open(path)),
        None => {
            log::warn!("no data directory, high score will not be saved");
            Box::new(MemoryHighScore::default())
        }
    }
}
