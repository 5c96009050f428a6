use std::sync::Arc;

use rodio::buffer::SamplesBuffer;

use super::filter::{CutoffHandle, DynamicLowPass};
use super::loader::{load_clip, probe};
use super::*;

#[test]
fn curve_boundaries_are_exact() {
    assert_eq!(
        sample(1.0),
        ModulationSample {
            pitch_cents: -500.0,
            rate: 0.85,
            cutoff_hz: 400.0
        }
    );
    assert_eq!(
        sample(0.0),
        ModulationSample {
            pitch_cents: 0.0,
            rate: 1.0,
            cutoff_hz: 16_400.0
        }
    );
}

#[test]
fn curve_is_monotonic_towards_clarity() {
    let mut prev = sample(1.0);
    for step in (0..30).rev() {
        let s = sample(step as f32 / 30.0);
        assert!(s.pitch_cents > prev.pitch_cents);
        assert!(s.rate > prev.rate);
        assert!(s.cutoff_hz > prev.cutoff_hz);
        prev = s;
    }
}

#[test]
fn curve_midpoint_is_linear() {
    let s = sample(0.5);
    assert!((s.pitch_cents + 250.0).abs() < 1e-3);
    assert!((s.rate - 0.925).abs() < 1e-6);
    assert!((s.cutoff_hz - 8_400.0).abs() < 1e-2);
}

#[test]
fn curve_clamps_out_of_range_fractions() {
    assert_eq!(sample(1.7), sample(1.0));
    assert_eq!(sample(-0.3), sample(0.0));
    assert_eq!(sample(f32::NAN), sample(0.0));
}

#[test]
fn speed_folds_pitch_into_rate() {
    assert_eq!(ModulationSample::CLEAR.speed(), 1.0);
    let start = sample(1.0);
    let expected = 0.85 * 2f32.powf(-500.0 / 1200.0);
    assert!((start.speed() - expected).abs() < 1e-6);
}

fn settle_peak(samples: Vec<f32>) -> f32 {
    samples[samples.len() / 2..]
        .iter()
        .fold(0.0f32, |acc, s| acc.max(s.abs()))
}

#[test]
fn low_pass_keeps_dc_and_kills_nyquist() {
    let dc = SamplesBuffer::new(1, 44_100, vec![1.0f32; 4096]);
    let out: Vec<f32> = DynamicLowPass::new(dc, CutoffHandle::new(400.0)).collect();
    assert!((out[out.len() - 1] - 1.0).abs() < 1e-3);

    let nyquist: Vec<f32> = (0..4096)
        .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
        .collect();
    let buf = SamplesBuffer::new(1, 44_100, nyquist);
    let out: Vec<f32> = DynamicLowPass::new(buf, CutoffHandle::new(400.0)).collect();
    assert!(settle_peak(out) < 0.01);
}

#[test]
fn low_pass_follows_cutoff_changes() {
    // 5 kHz tone: muffled at 400 Hz, passes once the cutoff opens up.
    let tone: Vec<f32> = (0..44_100)
        .map(|i| (2.0 * std::f32::consts::PI * 5_000.0 * i as f32 / 44_100.0).sin())
        .collect();

    let closed = SamplesBuffer::new(1, 44_100, tone.clone());
    let muffled = settle_peak(DynamicLowPass::new(closed, CutoffHandle::new(400.0)).collect());

    let cutoff = CutoffHandle::new(400.0);
    cutoff.set(16_400.0);
    let open = SamplesBuffer::new(1, 44_100, tone);
    let clear = settle_peak(DynamicLowPass::new(open, cutoff).collect());

    assert!(muffled < 0.05, "muffled peak {muffled}");
    assert!(clear > 0.9, "clear peak {clear}");
}

#[test]
fn low_pass_preserves_length_and_format() {
    let stereo = SamplesBuffer::new(2, 22_050, vec![0.5f32; 1000]);
    let filtered = DynamicLowPass::new(stereo, CutoffHandle::new(1_000.0));
    assert_eq!(rodio::Source::channels(&filtered), 2);
    assert_eq!(rodio::Source::sample_rate(&filtered), 22_050);
    assert_eq!(filtered.count(), 1000);
}

#[test]
fn load_rejects_empty_and_missing_references() {
    assert!(matches!(
        load_clip(None, "   "),
        Err(AudioLoadError::EmptyReference)
    ));
    assert!(matches!(
        load_clip(None, "/definitely/not/here.mp3"),
        Err(AudioLoadError::Io(_))
    ));
    assert!(matches!(
        load_clip(None, "https://example.invalid/a.mp3"),
        Err(AudioLoadError::Http(_))
    ));
}

#[test]
fn load_rejects_undecodable_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.mp3");
    std::fs::write(&path, b"definitely not audio").unwrap();

    let bytes: Arc<[u8]> = std::fs::read(&path).unwrap().into();
    assert!(matches!(probe(&bytes), Err(AudioLoadError::Decode(_))));
    assert!(matches!(
        load_clip(None, path.to_str().unwrap()),
        Err(AudioLoadError::Decode(_))
    ));
}

#[test]
fn null_session_records_calls() {
    let mut s = NullSession::new();
    s.load(3, "a.mp3");
    s.start(AudioClip {
        reference: "a.mp3".into(),
        bytes: Arc::from(Vec::new()),
    });
    s.apply_modulation(sample(0.5));
    s.stop();
    s.stop();

    assert_eq!(s.last_load(), Some(3));
    assert_eq!(
        s.calls,
        vec![
            SessionCall::Load {
                generation: 3,
                reference: "a.mp3".into()
            },
            SessionCall::Start {
                reference: "a.mp3".into()
            },
            SessionCall::Modulate(sample(0.5)),
            SessionCall::Stop,
        ]
    );
}
