use std::io::Cursor;
use std::sync::mpsc::Receiver;
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};

use super::filter::{CutoffHandle, DynamicLowPass};
use super::modulation::{self, ModulationSample};
use super::types::{AudioClip, AudioCmd};

/// The active playback graph: one sink fed by a filtered decoder.
struct Graph {
    sink: Sink,
    cutoff: CutoffHandle,
}

impl Graph {
    fn build(stream: &OutputStream, clip: &AudioClip, volume: f32) -> Option<Self> {
        let decoder = match Decoder::new(Cursor::new(clip.bytes.clone())) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("cannot decode {}: {e}", clip.reference);
                return None;
            }
        };

        let start = modulation::sample(1.0);
        let cutoff = CutoffHandle::new(start.cutoff_hz);
        let sink = Sink::connect_new(stream.mixer());
        sink.append(DynamicLowPass::new(decoder, cutoff.clone()));
        sink.set_speed(start.speed());
        sink.set_volume(volume);
        Some(Self { sink, cutoff })
    }

    fn modulate(&self, sample: ModulationSample) {
        self.cutoff.set(sample.cutoff_hz);
        self.sink.set_speed(sample.speed());
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(rx: Receiver<AudioCmd>, initial_volume: f32) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("no audio output device, rounds will be silent: {e}");
                drain_silently(rx);
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut volume = initial_volume;
        let mut graph: Option<Graph> = None;

        while let Ok(cmd) = rx.recv() {
            match cmd {
                AudioCmd::Start(clip) => {
                    // at most one graph plays at a time
                    if let Some(old) = graph.take() {
                        old.sink.stop();
                    }
                    graph = Graph::build(&stream, &clip, volume);
                    if let Some(g) = graph.as_ref() {
                        g.sink.play();
                        log::debug!("playing {}", clip.reference);
                    }
                }
                AudioCmd::Modulate(sample) => {
                    if let Some(g) = graph.as_ref() {
                        g.modulate(sample);
                    }
                }
                AudioCmd::SetVolume(level) => {
                    volume = level.clamp(0.0, 1.0);
                    if let Some(g) = graph.as_ref() {
                        g.sink.set_volume(volume);
                    }
                }
                AudioCmd::Stop => {
                    if let Some(old) = graph.take() {
                        old.sink.stop();
                    }
                }
                AudioCmd::Quit { fade_out_ms } => {
                    if let Some(g) = graph.take() {
                        fade_out_sink(&g.sink, volume, fade_out_ms);
                        g.sink.stop();
                    }
                    break;
                }
            }
        }
    })
}

fn drain_silently(rx: Receiver<AudioCmd>) {
    while let Ok(cmd) = rx.recv() {
        if let AudioCmd::Quit { .. } = cmd {
            break;
        }
    }
}
