use std::sync::Mutex;
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::loader::{LoadRequest, spawn_loader};
use super::modulation::ModulationSample;
use super::session::AudioSession;
use super::thread::spawn_audio_thread;
use super::types::{AudioClip, AudioCmd, LoadCompletion};

/// `AudioSession` backed by rodio.
///
/// Commands are queued to the audio thread; loads go to the loader thread and
/// come back on the `completions` channel handed to `new`. Dropping the
/// session fades out and joins the audio thread.
pub struct RodioSession {
    tx: Sender<AudioCmd>,
    loader: Sender<LoadRequest>,
    join: Mutex<Option<JoinHandle<()>>>,
    quit_fade_out: Duration,
}

impl RodioSession {
    pub fn new(settings: &AudioSettings, completions: Sender<LoadCompletion>) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let audio_handle = spawn_audio_thread(rx, settings.volume);
        let loader = spawn_loader(
            completions,
            Duration::from_secs(settings.fetch_timeout_secs),
        );

        Self {
            tx,
            loader,
            join: Mutex::new(Some(audio_handle)),
            quit_fade_out: Duration::from_millis(settings.quit_fade_out_ms),
        }
    }

    fn send(&self, cmd: AudioCmd) {
        if self.tx.send(cmd).is_err() {
            log::debug!("audio thread is gone, command dropped");
        }
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.tx.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl AudioSession for RodioSession {
    fn load(&mut self, generation: u64, reference: &str) {
        let req = LoadRequest {
            generation,
            reference: reference.to_string(),
        };
        if self.loader.send(req).is_err() {
            log::warn!("audio loader is gone, load {generation} dropped");
        }
    }

    fn start(&mut self, clip: AudioClip) {
        self.send(AudioCmd::Start(clip));
    }

    fn apply_modulation(&mut self, sample: ModulationSample) {
        self.send(AudioCmd::Modulate(sample));
    }

    fn set_volume(&mut self, level: f32) {
        self.send(AudioCmd::SetVolume(level));
    }

    fn stop(&mut self) {
        self.send(AudioCmd::Stop);
    }
}

impl Drop for RodioSession {
    fn drop(&mut self) {
        self.quit_softly(self.quit_fade_out);
    }
}
