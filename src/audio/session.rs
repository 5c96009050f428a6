use super::modulation::ModulationSample;
use super::types::AudioClip;

/// Playback capability the game controller drives.
///
/// All methods must return promptly: `load` only starts the work and the
/// outcome arrives later as a `LoadCompletion` carrying the same generation.
pub trait AudioSession {
    /// Begin resolving `reference` in the background.
    fn load(&mut self, generation: u64, reference: &str);
    /// Play `clip` from the beginning with the round-start modulation,
    /// replacing whatever was playing.
    fn start(&mut self, clip: AudioClip);
    fn apply_modulation(&mut self, sample: ModulationSample);
    fn set_volume(&mut self, level: f32);
    /// Halt playback and release the graph. Safe to call repeatedly.
    fn stop(&mut self);
}

/// A call observed by `NullSession`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCall {
    Load { generation: u64, reference: String },
    Start { reference: String },
    Modulate(ModulationSample),
    SetVolume(f32),
    Stop,
}

/// Silent session: plays nothing and records what it was asked to do.
///
/// Used when audio is disabled in the settings, and by tests. Loads never
/// complete on their own.
#[derive(Debug, Default)]
pub struct NullSession {
    pub calls: Vec<SessionCall>,
}

impl NullSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generation of the most recent load request.
    #[cfg(test)]
    pub fn last_load(&self) -> Option<u64> {
        self.calls.iter().rev().find_map(|c| match c {
            SessionCall::Load { generation, .. } => Some(*generation),
            _ => None,
        })
    }
}

impl AudioSession for NullSession {
    fn load(&mut self, generation: u64, reference: &str) {
        self.calls.push(SessionCall::Load {
            generation,
            reference: reference.to_string(),
        });
    }

    fn start(&mut self, clip: AudioClip) {
        self.calls.push(SessionCall::Start {
            reference: clip.reference,
        });
    }

    fn apply_modulation(&mut self, sample: ModulationSample) {
        self.calls.push(SessionCall::Modulate(sample));
    }

    fn set_volume(&mut self, level: f32) {
        self.calls.push(SessionCall::SetVolume(level));
    }

    fn stop(&mut self) {
        // repeated stops collapse into one entry
        if self.calls.last() != Some(&SessionCall::Stop) {
            self.calls.push(SessionCall::Stop);
        }
    }
}
