//! Log setup.
//!
//! The terminal belongs to the UI, so records go to a file. `RUST_LOG`
//! overrides the configured level.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

use crate::config::{self, LogSettings};

fn log_path(settings: &LogSettings) -> Option<PathBuf> {
    settings
        .file
        .clone()
        .or_else(|| config::default_state_path("muffle.log"))
}

/// Install the global logger. Failing to open the log file leaves logging
/// disabled; the game itself does not depend on it.
pub fn init(settings: &LogSettings) {
    let Some(path) = log_path(settings) else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = Builder::from_env(Env::default().default_filter_or(settings.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();

    log::info!("logging to {}", path.display());
}
