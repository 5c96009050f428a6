//! Audio-related small types: commands, decoded clips and load results.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::modulation::ModulationSample;

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Replace the active graph with one playing `clip` from the beginning.
    Start(AudioClip),
    /// Update pitch, rate and cutoff of the active graph.
    Modulate(ModulationSample),
    /// Set playback volume (0.0..=1.0).
    SetVolume(f32),
    /// Stop playback and drop the active graph.
    Stop,
    /// Quit the audio thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

/// Encoded preview audio that is known to decode.
#[derive(Clone)]
pub struct AudioClip {
    pub reference: String,
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioClip")
            .field("reference", &self.reference)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum AudioLoadError {
    #[error("empty audio reference")]
    EmptyReference,

    #[error("download failed: {0}")]
    Http(String),

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot decode audio: {0}")]
    Decode(String),
}

/// Result of a background load, tagged with the generation it was requested for.
#[derive(Debug)]
pub struct LoadCompletion {
    pub generation: u64,
    pub result: Result<AudioClip, AudioLoadError>,
}
