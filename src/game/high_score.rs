use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persisted best score.
pub trait HighScoreStore {
    fn get(&self) -> u32;
    /// Store `candidate` only if it beats the current value.
    fn set_if_greater(&mut self, candidate: u32);
}

impl<T: HighScoreStore + ?Sized> HighScoreStore for Box<T> {
    fn get(&self) -> u32 {
        (**self).get()
    }

    fn set_if_greater(&mut self, candidate: u32) {
        (**self).set_if_greater(candidate)
    }
}

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high score file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt high score file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot encode high score: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(default)]
    high_score: u32,
}

/// High score kept in a small TOML file.
///
/// A missing file reads as 0. A corrupt or unreadable one also reads as 0
/// and is overwritten on the next improvement.
#[derive(Debug)]
pub struct FileHighScore {
    path: PathBuf,
    value: u32,
}

impl FileHighScore {
    pub fn open(path: PathBuf) -> Self {
        let value = match Self::read(&path) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("ignoring high score at {}: {e}", path.display());
                0
            }
        };
        Self { path, value }
    }

    fn read(path: &Path) -> Result<u32, HighScoreError> {
        if !path.exists() {
            return Ok(0);
        }
        let text = fs::read_to_string(path)?;
        let file: HighScoreFile = toml::from_str(&text)?;
        Ok(file.high_score)
    }

    fn write(&self) -> Result<(), HighScoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let text = toml::to_string(&HighScoreFile {
            high_score: self.value,
        })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl HighScoreStore for FileHighScore {
    fn get(&self) -> u32 {
        self.value
    }

    fn set_if_greater(&mut self, candidate: u32) {
        if candidate <= self.value {
            return;
        }
        self.value = candidate;
        match self.write() {
            Ok(()) => log::info!("new high score {candidate}"),
            Err(e) => log::warn!("could not save high score: {e}"),
        }
    }
}

/// In-process high score, lost on exit.
#[derive(Debug, Default, Clone)]
pub struct MemoryHighScore {
    value: u32,
}

impl MemoryHighScore {
    #[cfg(test)]
    pub fn with_value(value: u32) -> Self {
        Self { value }
    }
}

impl HighScoreStore for MemoryHighScore {
    fn get(&self) -> u32 {
        self.value
    }

    fn set_if_greater(&mut self, candidate: u32) {
        self.value = self.value.max(candidate);
    }
}
