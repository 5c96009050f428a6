//! Low-pass stage whose cutoff can be moved while audio is playing.
//!
//! RBJ cookbook biquad in Direct Form II Transposed, one state pair per
//! channel. The cutoff lives in an atomic so the audio thread can retune it
//! without touching the mixer; coefficients are refreshed every
//! `REFRESH_FRAMES` frames.

use std::f64::consts::PI;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use rodio::{ChannelCount, Sample, SampleRate, Source};

const REFRESH_FRAMES: usize = 256;
const Q_BUTTERWORTH: f64 = std::f64::consts::FRAC_1_SQRT_2;

/// Shared, lock-free cutoff frequency.
#[derive(Debug, Clone)]
pub(super) struct CutoffHandle(Arc<AtomicU32>);

impl CutoffHandle {
    pub(super) fn new(hz: f32) -> Self {
        Self(Arc::new(AtomicU32::new(hz.to_bits())))
    }

    pub(super) fn set(&self, hz: f32) {
        self.0.store(hz.to_bits(), Ordering::Relaxed);
    }

    pub(super) fn get(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Coefficients {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

impl Coefficients {
    fn low_pass(cutoff_hz: f64, sample_rate: f64) -> Self {
        // Keep the cutoff strictly below Nyquist; above it the filter is a no-op anyway.
        let nyquist = sample_rate / 2.0;
        let freq = cutoff_hz.clamp(10.0, nyquist * 0.99);

        let w0 = 2.0 * PI * freq / sample_rate;
        let cos_w0 = w0.cos();
        let alpha = w0.sin() / (2.0 * Q_BUTTERWORTH);

        let b1 = 1.0 - cos_w0;
        let b0 = b1 / 2.0;
        let a0 = 1.0 + alpha;

        Self {
            b0: b0 / a0,
            b1: b1 / a0,
            b2: b0 / a0,
            a1: (-2.0 * cos_w0) / a0,
            a2: (1.0 - alpha) / a0,
        }
    }
}

pub(super) struct DynamicLowPass<S> {
    input: S,
    cutoff: CutoffHandle,
    applied_hz: f32,
    applied_rate: SampleRate,
    coeffs: Coefficients,
    // (z1, z2) per channel
    state: Vec<(f64, f64)>,
    channel: usize,
    frames_until_refresh: usize,
}

impl<S: Source> DynamicLowPass<S> {
    pub(super) fn new(input: S, cutoff: CutoffHandle) -> Self {
        let hz = cutoff.get();
        let rate = input.sample_rate();
        let channels = (input.channels() as usize).max(1);
        Self {
            coeffs: Coefficients::low_pass(hz as f64, rate as f64),
            input,
            cutoff,
            applied_hz: hz,
            applied_rate: rate,
            state: vec![(0.0, 0.0); channels],
            channel: 0,
            frames_until_refresh: REFRESH_FRAMES,
        }
    }

    fn refresh(&mut self) {
        let channels = (self.input.channels() as usize).max(1);
        if channels != self.state.len() {
            self.state = vec![(0.0, 0.0); channels];
        }

        let hz = self.cutoff.get();
        let rate = self.input.sample_rate();
        if hz != self.applied_hz || rate != self.applied_rate {
            self.coeffs = Coefficients::low_pass(hz as f64, rate as f64);
            self.applied_hz = hz;
            self.applied_rate = rate;
        }
    }
}

impl<S: Source> Iterator for DynamicLowPass<S> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.channel == 0 {
            if self.frames_until_refresh == 0 {
                self.refresh();
                self.frames_until_refresh = REFRESH_FRAMES;
            } else {
                self.frames_until_refresh -= 1;
            }
        }

        let input = self.input.next()? as f64;
        let c = self.coeffs;
        let (z1, z2) = &mut self.state[self.channel];

        let output = c.b0 * input + *z1;
        *z1 = c.b1 * input - c.a1 * output + *z2;
        *z2 = c.b2 * input - c.a2 * output;

        self.channel = (self.channel + 1) % self.state.len();
        Some(output as Sample)
    }
}

impl<S: Source> Source for DynamicLowPass<S> {
    fn current_span_len(&self) -> Option<usize> {
        self.input.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.input.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.input.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.input.total_duration()
    }
}
