use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::audio::{self, AudioSession, LoadCompletion, ModulationSample};
use crate::catalog::Track;
use crate::config::RestartPolicy;
use crate::quiz::{self, Round};

use super::high_score::HighScoreStore;
use super::rules::{GameRules, points_for};
use super::schedule::{Schedule, TimerHandle};
use super::snapshot::{GameSnapshot, Phase};
use super::timer::{RoundTimer, TimerEvent};

/// Deferred controller work.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pending {
    /// Leave the transition and start the next round (or end the game).
    EnterRound,
    /// Accept selections once the round has settled.
    Unlock,
    /// Timeout reveal is over.
    FinishReveal,
    /// Selection result is over.
    FinishResult,
}

/// Per-round state, replaced wholesale when the next round starts.
#[derive(Debug)]
struct RoundState {
    remaining: u32,
    selected: Option<usize>,
    revealed: Option<usize>,
    locked: bool,
}

impl RoundState {
    fn new(total: u32) -> Self {
        Self {
            remaining: total,
            selected: None,
            revealed: None,
            locked: true,
        }
    }
}

pub struct GameController<S, H> {
    rules: GameRules,
    audio: S,
    high_scores: H,
    rng: StdRng,

    pool: Vec<Track>,
    rounds: Vec<Round>,
    /// Rounds entered so far; the current round is `rounds[index - 1]`.
    index: usize,
    score: u32,
    last_gain: Option<u32>,
    high_score: u32,

    phase: Phase,
    transitioning: bool,
    blur: f32,
    round: Option<RoundState>,

    timer: RoundTimer,
    schedule: Schedule<Pending>,
    unlock: Option<TimerHandle>,
    /// Bumped whenever a pending audio load must no longer take effect.
    generation: u64,
    torn_down: bool,

    subscribers: Vec<Sender<GameSnapshot>>,
}

impl<S: AudioSession, H: HighScoreStore> GameController<S, H> {
    pub fn new(rules: GameRules, audio: S, high_scores: H) -> Self {
        let seed = rules.seed.unwrap_or_else(rand::random);
        let high_score = high_scores.get();
        Self {
            rules,
            audio,
            high_scores,
            rng: StdRng::seed_from_u64(seed),
            pool: Vec::new(),
            rounds: Vec::new(),
            index: 0,
            score: 0,
            last_gain: None,
            high_score,
            phase: Phase::Loading,
            transitioning: false,
            blur: 0.0,
            round: None,
            timer: RoundTimer::new(),
            schedule: Schedule::new(),
            unlock: None,
            generation: 0,
            torn_down: false,
            subscribers: Vec::new(),
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Receive a snapshot now and after every state change.
    pub fn subscribe(&mut self) -> Receiver<GameSnapshot> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(self.snapshot());
        self.subscribers.push(tx);
        rx
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let current = self.current_round();
        let total = self.rules.round_seconds;
        let (remaining, selected, revealed, locked) = match &self.round {
            Some(r) => (r.remaining, r.selected, r.revealed, r.locked),
            None => (0, None, None, true),
        };

        GameSnapshot {
            phase: self.phase,
            remaining,
            total,
            progress: if total == 0 {
                0.0
            } else {
                remaining as f32 / total as f32
            },
            blur: self.blur,
            score: self.score,
            last_gain: self.last_gain,
            round: self.index,
            total_rounds: self.rounds.len(),
            options: current.map(|r| r.options.clone()).unwrap_or_default(),
            album_art: current.map(|r| r.album_art.clone()).unwrap_or_default(),
            selected,
            revealed,
            locked,
            transitioning: self.transitioning,
            ended: self.phase == Phase::Ended,
            high_score: self.high_score,
        }
    }

    /// Build rounds from `pool` and start a fresh session. A pool that cannot
    /// fill a single round ends the session immediately with score 0.
    pub fn load_session(&mut self, pool: Vec<Track>, now: Instant) {
        self.reset_round_machinery();
        self.torn_down = false;
        self.pool = pool;
        self.rounds = self.build_rounds();
        self.begin(now);
        self.publish();
    }

    /// Start over. Depending on `GameRules::restart` the finished rounds are
    /// replayed or rebuilt from the pool. `Refetch` is the caller's job (fetch
    /// and `load_session`); called directly it rebuilds from the pool.
    pub fn restart(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }
        self.reset_round_machinery();
        match self.rules.restart {
            RestartPolicy::ReuseRounds => {}
            RestartPolicy::RebuildRounds | RestartPolicy::Refetch => {
                self.rounds = self.build_rounds();
            }
        }
        log::info!("restarting with {} rounds", self.rounds.len());
        self.begin(now);
        self.publish();
    }

    /// Leave the current round: lock input, show the transition, and enter
    /// the next round (or end the game) once it is over.
    pub fn advance_round(&mut self, now: Instant) {
        if self.torn_down || self.phase == Phase::Ended {
            return;
        }
        self.schedule_next_round(now);
        self.publish();
    }

    /// Pick option `choice` of the current round.
    ///
    /// Returns false and changes nothing when input is locked: during the
    /// settle delay, after the round was already resolved (by an earlier
    /// selection or by the countdown), or between rounds. Timer events due
    /// at `now` fire first, so a pick made at or after the expiry loses.
    pub fn select(&mut self, choice: usize, now: Instant) -> bool {
        if self.torn_down {
            return false;
        }
        self.poll(now);
        if self.phase != Phase::Playing {
            return false;
        }
        let Some(current) = self.current_round() else {
            return false;
        };
        let Some(option) = current.options.get(choice) else {
            return false;
        };
        let is_correct = option.is_correct;
        let correct_index = current.correct_index();

        let Some(round) = self.round.as_mut() else {
            return false;
        };
        if round.locked {
            log::debug!("selection {choice} ignored, round is locked");
            return false;
        }

        round.locked = true;
        round.selected = Some(choice);
        self.timer.cancel();
        if let Some(h) = self.unlock.take() {
            self.schedule.cancel(h);
        }

        let gain = points_for(is_correct, round.remaining, self.rules.points_per_second);
        if !is_correct {
            round.revealed = correct_index;
        }
        self.score = self.score.saturating_add(gain);
        self.last_gain = Some(gain);
        log::info!(
            "round {}: picked option {choice} with {}s left, {} (+{gain})",
            self.index,
            round.remaining,
            if is_correct { "correct" } else { "wrong" }
        );

        self.blur = 0.0;
        self.phase = Phase::Resolving;
        self.audio.apply_modulation(ModulationSample::CLEAR);
        self.audio.set_volume(self.rules.result_volume);
        self.schedule
            .insert(now + self.rules.result_dwell, Pending::FinishResult);

        self.publish();
        true
    }

    /// Fire every timer event due at `now`, oldest first.
    pub fn poll(&mut self, now: Instant) {
        if self.torn_down {
            return;
        }

        let mut changed = false;
        loop {
            let timer_due = self.timer.next_deadline().filter(|at| *at <= now);
            let action_due = self.schedule.next_deadline().filter(|at| *at <= now);

            let timer_first = match (timer_due, action_due) {
                (None, None) => break,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (Some(t), Some(a)) => t <= a,
            };

            if timer_first {
                let Some(at) = timer_due else { break };
                match self.timer.poll(now) {
                    Some(TimerEvent::Tick(remaining)) => self.on_tick(remaining),
                    Some(TimerEvent::Expired) => self.on_expire(at),
                    None => break,
                }
            } else {
                let Some((at, action)) = self.schedule.pop_due(now) else {
                    break;
                };
                self.run_pending(action, at);
            }
            changed = true;
        }

        if changed {
            self.publish();
        }
    }

    /// Hand a finished background load to the controller. Completions for an
    /// earlier round, or arriving after the round was resolved, are dropped.
    pub fn on_audio_loaded(&mut self, completion: LoadCompletion) {
        if self.torn_down || completion.generation != self.generation {
            log::debug!(
                "discarding stale audio load (generation {}, current {})",
                completion.generation,
                self.generation
            );
            return;
        }
        if self.phase != Phase::Playing {
            log::debug!("round {} already resolved, not starting audio", self.index);
            return;
        }

        match completion.result {
            Ok(clip) => {
                self.audio.start(clip);
                let remaining = self
                    .round
                    .as_ref()
                    .map_or(self.rules.round_seconds, |r| r.remaining);
                self.audio.apply_modulation(self.curve_at(remaining));
            }
            Err(e) => {
                log::warn!("round {} continues without audio: {e}", self.index);
            }
        }
    }

    /// Cancel every timer and silence audio. Nothing fires afterwards until a
    /// new `load_session`.
    pub fn teardown(&mut self) {
        self.reset_round_machinery();
        self.torn_down = true;
    }

    fn current_round(&self) -> Option<&Round> {
        self.index.checked_sub(1).and_then(|i| self.rounds.get(i))
    }

    fn curve_at(&self, remaining: u32) -> ModulationSample {
        let total = self.rules.round_seconds.max(1);
        audio::sample(remaining as f32 / total as f32)
    }

    fn build_rounds(&mut self) -> Vec<Round> {
        match quiz::build(
            &self.pool,
            self.rules.rounds,
            self.rules.distractors,
            &mut self.rng,
        ) {
            Ok(rounds) => {
                if rounds.len() < self.rules.rounds {
                    log::info!(
                        "pool only covers {} of {} rounds",
                        rounds.len(),
                        self.rules.rounds
                    );
                }
                rounds
            }
            Err(e) => {
                log::warn!("no playable quiz: {e}");
                Vec::new()
            }
        }
    }

    fn reset_round_machinery(&mut self) {
        self.timer.cancel();
        self.schedule.cancel_all();
        self.unlock = None;
        self.audio.stop();
        self.generation += 1;
    }

    fn begin(&mut self, now: Instant) {
        self.index = 0;
        self.score = 0;
        self.last_gain = None;
        self.blur = 0.0;
        self.round = None;
        self.transitioning = false;
        self.phase = Phase::Loading;

        if self.rounds.is_empty() {
            self.end_game();
        } else {
            self.schedule_next_round(now);
        }
    }

    fn schedule_next_round(&mut self, now: Instant) {
        self.timer.cancel();
        self.schedule.cancel_all();
        self.unlock = None;
        if self.phase == Phase::Playing {
            // skipped mid-round: silence it and drop its pending load
            self.audio.stop();
            self.generation += 1;
        }
        if let Some(r) = self.round.as_mut() {
            r.locked = true;
        }
        self.transitioning = true;
        self.phase = Phase::Loading;
        self.schedule
            .insert(now + self.rules.transition, Pending::EnterRound);
    }

    fn enter_round(&mut self, now: Instant) {
        self.transitioning = false;
        if self.index >= self.rounds.len() {
            self.end_game();
            return;
        }

        let reference = self.rounds[self.index].audio.clone();
        self.index += 1;
        self.generation += 1;

        let total = self.rules.round_seconds;
        self.round = Some(RoundState::new(total));
        self.last_gain = None;
        self.blur = total as f32;
        self.phase = Phase::Playing;

        self.audio.stop();
        self.audio.set_volume(self.rules.volume);
        self.audio.load(self.generation, &reference);
        self.timer.start(total, now);
        self.unlock = Some(self.schedule.insert(now + self.rules.settle, Pending::Unlock));

        log::info!("round {}/{} started", self.index, self.rounds.len());
    }

    fn on_tick(&mut self, remaining: u32) {
        if let Some(r) = self.round.as_mut() {
            r.remaining = remaining;
        }
        self.blur = remaining as f32;
        let sample = self.curve_at(remaining);
        self.audio.apply_modulation(sample);
    }

    fn on_expire(&mut self, at: Instant) {
        let correct_index = self.current_round().and_then(Round::correct_index);
        let Some(round) = self.round.as_mut() else {
            return;
        };

        round.remaining = 0;
        round.locked = true;
        round.revealed = correct_index;
        if let Some(h) = self.unlock.take() {
            self.schedule.cancel(h);
        }

        self.blur = 0.0;
        self.phase = Phase::Resolving;
        self.audio.stop();
        self.schedule
            .insert(at + self.rules.reveal_dwell, Pending::FinishReveal);
        log::info!("round {} timed out", self.index);
    }

    fn run_pending(&mut self, action: Pending, at: Instant) {
        match action {
            Pending::EnterRound => self.enter_round(at),
            Pending::Unlock => {
                self.unlock = None;
                if self.phase == Phase::Playing {
                    if let Some(r) = self.round.as_mut() {
                        r.locked = false;
                    }
                }
            }
            Pending::FinishReveal => {
                if let Some(r) = self.round.as_mut() {
                    r.revealed = None;
                }
                self.schedule_next_round(at);
            }
            Pending::FinishResult => {
                self.last_gain = None;
                if let Some(r) = self.round.as_mut() {
                    r.selected = None;
                    r.revealed = None;
                }
                self.schedule_next_round(at);
            }
        }
    }

    fn end_game(&mut self) {
        self.timer.cancel();
        self.schedule.cancel_all();
        self.unlock = None;
        self.audio.stop();
        self.generation += 1;
        self.round = None;
        self.transitioning = false;

        self.high_scores.set_if_greater(self.score);
        self.high_score = self.high_scores.get();
        self.phase = Phase::Ended;
        log::info!(
            "game over after {} rounds: score {}, best {}",
            self.index,
            self.score,
            self.high_score
        );
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

/// Inspection for tests.
#[cfg(test)]
impl<S, H> GameController<S, H> {
    pub fn audio(&self) -> &S {
        &self.audio
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the round countdown is running.
    pub fn is_counting_down(&self) -> bool {
        self.timer.is_running()
    }

    /// True while a reveal, result or transition is waiting to fire.
    pub fn has_pending_dwell(&self) -> bool {
        !self.schedule.is_empty() && self.unlock.is_none()
    }
}
