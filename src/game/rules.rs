use std::time::Duration;

use crate::config::{RestartPolicy, Settings};

/// Fixed parameters of a quiz session.
#[derive(Debug, Clone)]
pub struct GameRules {
    pub rounds: usize,
    pub distractors: usize,
    pub round_seconds: u32,
    pub points_per_second: u32,
    pub settle: Duration,
    pub transition: Duration,
    pub reveal_dwell: Duration,
    pub result_dwell: Duration,
    pub restart: RestartPolicy,
    pub seed: Option<u64>,
    pub volume: f32,
    pub result_volume: f32,
}

impl GameRules {
    pub fn from_settings(settings: &Settings) -> Self {
        let game = &settings.game;
        Self {
            rounds: game.rounds,
            distractors: game.distractors,
            round_seconds: game.round_seconds,
            points_per_second: game.points_per_second,
            settle: game.settle(),
            transition: game.transition(),
            reveal_dwell: game.reveal_dwell(),
            result_dwell: game.result_dwell(),
            restart: game.restart,
            seed: game.seed,
            volume: settings.audio.volume,
            result_volume: settings.audio.result_volume,
        }
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Points for a selection: the seconds still on the clock times
/// `points_per_second` when correct, nothing otherwise.
pub fn points_for(is_correct: bool, remaining: u32, points_per_second: u32) -> u32 {
    if is_correct {
        remaining.saturating_mul(points_per_second)
    } else {
        0
    }
}
