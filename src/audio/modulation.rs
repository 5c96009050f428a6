//! Time-to-distortion curve.
//!
//! Every channel is a straight line in the fraction of time left: at the
//! start of a round the preview is pitched down, slowed and muffled, and it
//! reaches its natural sound exactly when the countdown hits zero.

/// Audio parameters for one point of the countdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulationSample {
    /// Pitch shift in cents (negative = lower).
    pub pitch_cents: f32,
    /// Playback rate factor (1.0 = natural tempo).
    pub rate: f32,
    /// Low-pass cutoff in Hz.
    pub cutoff_hz: f32,
}

const PITCH_AT_START: f32 = -500.0;
const RATE_AT_START: f32 = 0.85;
const CUTOFF_AT_START: f32 = 400.0;
const CUTOFF_SPAN: f32 = 16_000.0;

impl ModulationSample {
    /// Undistorted playback, applied while a selection result is shown.
    pub const CLEAR: Self = Self {
        pitch_cents: 0.0,
        rate: 1.0,
        cutoff_hz: 18_000.0,
    };

    /// Resampling speed that realises both pitch and rate.
    ///
    /// rodio has no independent time-stretch, so both are folded into a
    /// single varispeed factor.
    pub fn speed(&self) -> f32 {
        self.rate * 2f32.powf(self.pitch_cents / 1200.0)
    }
}

/// Sample the curve at `fraction` = remaining / total (1.0 = round start,
/// 0.0 = expiry). Out-of-range input is clamped.
pub fn sample(fraction: f32) -> ModulationSample {
    let fraction = if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    };
    let elapsed = 1.0 - fraction;

    ModulationSample {
        pitch_cents: PITCH_AT_START * fraction,
        rate: RATE_AT_START + (1.0 - RATE_AT_START) * elapsed,
        cutoff_hz: CUTOFF_AT_START + CUTOFF_SPAN * elapsed,
    }
}
