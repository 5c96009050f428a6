use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/muffle/config.toml` or `~/.config/muffle/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUFFLE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameSettings,
    pub audio: AudioSettings,
    pub catalog: CatalogSettings,
    pub ui: UiSettings,
    pub log: LogSettings,
    pub high_score: HighScoreSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Number of rounds in one quiz.
    pub rounds: usize,
    /// Wrong options offered next to the correct one.
    pub distractors: usize,
    /// Countdown length of a round, in seconds.
    pub round_seconds: u32,
    /// Points per remaining second for a correct answer.
    pub points_per_second: u32,
    /// Selection stays locked this long after a round starts (milliseconds).
    pub settle_ms: u64,
    /// Pause between rounds while the next one is prepared (milliseconds).
    pub transition_ms: u64,
    /// How long the correct answer stays revealed after a timeout (milliseconds).
    pub reveal_dwell_ms: u64,
    /// How long the result stays on screen after a selection (milliseconds).
    pub result_dwell_ms: u64,
    /// What `restart` does with the rounds of the finished quiz.
    pub restart: RestartPolicy,
    /// Fixed RNG seed; random when unset.
    pub seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rounds: 5,
            distractors: 3,
            round_seconds: 30,
            points_per_second: 10,
            settle_ms: 1000,
            transition_ms: 600,
            reveal_dwell_ms: 2000,
            result_dwell_ms: 3000,
            restart: RestartPolicy::ReuseRounds,
            seed: None,
        }
    }
}

impl GameSettings {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn reveal_dwell(&self) -> Duration {
        Duration::from_millis(self.reveal_dwell_ms)
    }

    pub fn result_dwell(&self) -> Duration {
        Duration::from_millis(self.result_dwell_ms)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestartPolicy {
    /// Replay the same rounds in the same order.
    #[serde(alias = "reuse", alias = "reuse_rounds")]
    ReuseRounds,
    /// Build a fresh set of rounds from the already fetched pool.
    #[serde(alias = "rebuild", alias = "rebuild_rounds")]
    RebuildRounds,
    /// Fetch a new pool from the catalog and build rounds from it.
    Refetch,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Set to false to play rounds silently (no output device is opened).
    pub enabled: bool,
    /// Playback volume during a round.
    pub volume: f32,
    /// Playback volume while the result of a selection is displayed.
    pub result_volume: f32,
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Timeout for downloading a preview (seconds).
    pub fetch_timeout_secs: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 1.0,
            result_volume: 0.8,
            quit_fade_out_ms: 300,
            fetch_timeout_secs: 15,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogSource {
    Deezer,
    #[serde(alias = "dir", alias = "directory")]
    Local,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub source: CatalogSource,
    pub language: String,
    pub category: String,
    pub api_base: String,
    /// Maximum number of playlist entries requested.
    pub limit: usize,
    pub timeout_secs: u64,
    /// language -> category -> playlist id. Keys are matched case-insensitively.
    pub playlists: HashMap<String, HashMap<String, String>>,
    /// Directory scanned when `source = "local"`.
    pub music_dir: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        let playlist = |pairs: &[(&str, &str)]| -> HashMap<String, String> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        let mut playlists = HashMap::new();
        playlists.insert(
            "turkish".to_string(),
            playlist(&[
                ("pop", "14482387503"),
                ("rap", "14482449143"),
                ("rock", "14482438883"),
            ]),
        );
        playlists.insert(
            "english".to_string(),
            playlist(&[
                ("pop", "14482459723"),
                ("rap", "14482469083"),
                ("rock", "14482472563"),
            ]),
        );

        Self {
            source: CatalogSource::Deezer,
            language: "English".to_string(),
            category: "Pop".to_string(),
            api_base: "https://api.deezer.com".to_string(),
            limit: 200,
            timeout_secs: 10,
            playlists,
            music_dir: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
        }
    }
}

impl CatalogSettings {
    /// Look up the playlist id for a language/category pair.
    pub fn playlist_id(&self, language: &str, category: &str) -> Option<&str> {
        let language = language.trim().to_lowercase();
        let category = category.trim().to_lowercase();
        self.playlists
            .iter()
            .find(|(k, _)| k.to_lowercase() == language)
            .and_then(|(_, cats)| cats.iter().find(|(k, _)| k.to_lowercase() == category))
            .map(|(_, id)| id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Show the (obscured) album art reference above the options.
    pub show_art_reference: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Name that muffled tune ~ ".to_string(),
            show_art_reference: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default filter when `RUST_LOG` is not set (e.g. "info", "muffle=debug").
    pub level: String,
    /// Log file; defaults to `$XDG_STATE_HOME/muffle/muffle.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HighScoreSettings {
    /// High-score file; defaults to `$XDG_DATA_HOME/muffle/highscore.toml`.
    pub path: Option<PathBuf>,
}
