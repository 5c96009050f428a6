use std::sync::Arc;
use std::time::{Duration, Instant};

use super::rules::points_for;
use super::schedule::Schedule;
use super::timer::{RoundTimer, TimerEvent, TimerState};
use super::*;
use crate::audio::{
    self, AudioClip, AudioLoadError, LoadCompletion, ModulationSample, NullSession, SessionCall,
};
use crate::catalog::Track;
use crate::config::RestartPolicy;

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

fn pool(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| Track {
            id: i.to_string(),
            title: format!("Song {i}"),
            artist: format!("Artist {i}"),
            album_art: format!("https://img/{i}.jpg"),
            preview: format!("https://cdn/{i}.mp3"),
        })
        .collect()
}

fn rules() -> GameRules {
    GameRules {
        seed: Some(42),
        ..GameRules::default()
    }
}

/// Drives a controller with a fake clock in 100ms steps.
struct Harness {
    game: GameController<NullSession, MemoryHighScore>,
    start: Instant,
    elapsed: u64,
}

impl Harness {
    fn new(rules: GameRules, tracks: Vec<Track>, prior: u32) -> Self {
        let start = Instant::now();
        let mut game = GameController::new(
            rules,
            NullSession::new(),
            MemoryHighScore::with_value(prior),
        );
        game.load_session(tracks, start);
        Self {
            game,
            start,
            elapsed: 0,
        }
    }

    fn now(&self) -> Instant {
        self.start + Duration::from_millis(self.elapsed)
    }

    /// Move the clock to `ms` after the session was loaded.
    fn advance_to(&mut self, ms: u64) {
        while self.elapsed < ms {
            self.elapsed = (self.elapsed + 100).min(ms);
            self.game.poll(self.now());
            assert!(
                !(self.game.is_counting_down() && self.game.has_pending_dwell()),
                "countdown and dwell overlap at {}ms",
                self.elapsed
            );
        }
    }

    fn advance_by(&mut self, ms: u64) {
        self.advance_to(self.elapsed + ms);
    }

    fn select(&mut self, choice: usize) -> bool {
        let now = self.now();
        self.game.select(choice, now)
    }

    fn correct(&self) -> usize {
        let snap = self.game.snapshot();
        snap.options
            .iter()
            .position(|o| o.is_correct)
            .expect("round has a correct option")
    }

    fn wrong(&self) -> usize {
        (self.correct() + 1) % self.game.snapshot().options.len()
    }

    /// Step until the current round accepts input.
    fn advance_until_unlocked(&mut self) {
        for _ in 0..1_000 {
            let snap = self.game.snapshot();
            if snap.phase == Phase::Playing && !snap.locked {
                return;
            }
            assert!(!snap.ended, "game ended while waiting for a round");
            self.advance_by(100);
        }
        panic!("round never unlocked");
    }

    fn calls(&self) -> &[SessionCall] {
        &self.game.audio().calls
    }
}

fn clip(name: &str) -> AudioClip {
    AudioClip {
        reference: name.to_string(),
        bytes: Arc::from(&[0u8, 1, 2, 3][..]),
    }
}

// ---- timer ----

#[test]
fn timer_ticks_down_and_expires_once() {
    let t0 = Instant::now();
    let mut timer = RoundTimer::new();
    timer.start(30, t0);
    assert_eq!(timer.state(), TimerState::Running);

    let mut ticks = Vec::new();
    let mut expired = 0;
    for s in 1..=35 {
        match timer.poll(t0 + secs(s)) {
            Some(TimerEvent::Tick(r)) => ticks.push(r),
            Some(TimerEvent::Expired) => expired += 1,
            None => {}
        }
    }

    assert_eq!(ticks, (1..=29).rev().collect::<Vec<u32>>());
    assert_eq!(expired, 1);
    assert_eq!(timer.state(), TimerState::Expired);
    assert_eq!(timer.remaining(), 0);
    assert_eq!(timer.next_deadline(), None);
}

#[test]
fn timer_emits_one_event_per_poll_after_a_stall() {
    let t0 = Instant::now();
    let mut timer = RoundTimer::new();
    timer.start(3, t0);

    let late = t0 + secs(10);
    assert_eq!(timer.poll(late), Some(TimerEvent::Tick(2)));
    assert_eq!(timer.poll(late), Some(TimerEvent::Tick(1)));
    assert_eq!(timer.poll(late), Some(TimerEvent::Expired));
    assert_eq!(timer.poll(late), None);
}

#[test]
fn cancelled_timer_never_fires() {
    let t0 = Instant::now();
    let mut timer = RoundTimer::new();
    timer.start(30, t0);
    for s in 1..=5 {
        timer.poll(t0 + secs(s));
    }
    timer.cancel();

    assert_eq!(timer.state(), TimerState::Cancelled);
    assert_eq!(timer.remaining(), 25);
    assert_eq!(timer.poll(t0 + secs(60)), None);
}

#[test]
fn restarting_the_timer_resets_the_countdown() {
    let t0 = Instant::now();
    let mut timer = RoundTimer::new();
    timer.start(30, t0);
    timer.poll(t0 + secs(1));
    timer.poll(t0 + secs(2));

    let t1 = t0 + secs(2);
    timer.start(10, t1);
    assert_eq!(timer.remaining(), 10);
    assert_eq!(timer.total(), 10);
    assert_eq!(timer.next_deadline(), Some(t1 + secs(1)));
}

// ---- schedule ----

#[test]
fn schedule_pops_earliest_first_and_ties_in_insertion_order() {
    let t0 = Instant::now();
    let mut s = Schedule::new();
    s.insert(t0 + secs(2), "late");
    s.insert(t0 + secs(1), "first");
    s.insert(t0 + secs(1), "second");

    assert_eq!(s.next_deadline(), Some(t0 + secs(1)));
    assert_eq!(s.pop_due(t0), None);

    let now = t0 + secs(5);
    assert_eq!(s.pop_due(now).map(|(_, a)| a), Some("first"));
    assert_eq!(s.pop_due(now).map(|(_, a)| a), Some("second"));
    assert_eq!(s.pop_due(now), Some((t0 + secs(2), "late")));
    assert!(s.is_empty());
}

#[test]
fn cancelled_entries_do_not_fire() {
    let t0 = Instant::now();
    let mut s = Schedule::new();
    let a = s.insert(t0 + secs(1), 1);
    s.insert(t0 + secs(2), 2);

    assert!(s.cancel(a));
    assert!(!s.cancel(a), "second cancel is a no-op");
    assert_eq!(s.len(), 1);
    assert_eq!(s.pop_due(t0 + secs(3)).map(|(_, v)| v), Some(2));

    s.insert(t0, 3);
    s.cancel_all();
    assert_eq!(s.pop_due(t0 + secs(3)), None);
}

// ---- scoring ----

#[test]
fn points_scale_with_remaining_seconds() {
    assert_eq!(points_for(true, 20, 10), 200);
    assert_eq!(points_for(true, 30, 10), 300);
    assert_eq!(points_for(true, 0, 10), 0);
    assert_eq!(points_for(false, 20, 10), 0);
}

// ---- controller ----

#[test]
fn empty_pool_ends_immediately() {
    let h = Harness::new(rules(), Vec::new(), 7);
    let snap = h.game.snapshot();

    assert_eq!(snap.phase, Phase::Ended);
    assert!(snap.ended);
    assert_eq!(snap.score, 0);
    assert_eq!(snap.total_rounds, 0);
    assert_eq!(snap.high_score, 7);
    assert!(!h.game.is_counting_down());
}

#[test]
fn pool_too_small_for_the_options_ends_immediately() {
    let h = Harness::new(rules(), pool(3), 0);
    assert_eq!(h.game.phase(), Phase::Ended);
    assert!(
        !h.calls()
            .iter()
            .any(|c| matches!(c, SessionCall::Load { .. }))
    );
}

#[test]
fn first_round_starts_after_the_transition_and_unlocks_after_settling() {
    let mut h = Harness::new(rules(), pool(10), 0);
    let snap = h.game.snapshot();
    assert_eq!(snap.phase, Phase::Loading);
    assert!(snap.transitioning);
    assert_eq!(snap.round, 0);
    assert_eq!(snap.total_rounds, 5);

    h.advance_to(500);
    assert_eq!(h.game.phase(), Phase::Loading);

    h.advance_to(600);
    let snap = h.game.snapshot();
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.round, 1);
    assert_eq!(snap.remaining, 30);
    assert_eq!(snap.progress, 1.0);
    assert_eq!(snap.blur, 30.0);
    assert_eq!(snap.options.len(), 4);
    assert!(snap.locked);
    assert!(!snap.transitioning);
    assert!(h.game.is_counting_down());

    // the preview of the correct track is requested for this round
    let id = snap.options[h.correct()].title.replace("Song ", "");
    assert_eq!(snap.album_art, format!("https://img/{id}.jpg"));
    let calls = h.calls();
    let n = calls.len();
    assert_eq!(calls[n - 1], SessionCall::Load {
        generation: h.game.generation(),
        reference: format!("https://cdn/{id}.mp3"),
    });
    assert_eq!(calls[n - 2], SessionCall::SetVolume(1.0));

    h.advance_to(1_500);
    assert!(h.game.snapshot().locked);
    h.advance_to(1_600);
    let snap = h.game.snapshot();
    assert!(!snap.locked);
    assert_eq!(snap.remaining, 29);
}

#[test]
fn selection_during_settle_is_ignored() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(1_000);

    let correct = h.correct();
    assert!(!h.select(correct));
    assert_eq!(h.game.snapshot().score, 0);
    assert!(h.game.is_counting_down());
}

#[test]
fn correct_pick_scores_remaining_seconds_and_clears_audio() {
    let mut h = Harness::new(rules(), pool(10), 0);
    // round starts at 600ms; the tenth tick leaves 20s
    h.advance_to(10_600);
    assert_eq!(h.game.snapshot().remaining, 20);

    let correct = h.correct();
    assert!(h.select(correct));

    let snap = h.game.snapshot();
    assert_eq!(snap.phase, Phase::Resolving);
    assert_eq!(snap.score, 200);
    assert_eq!(snap.last_gain, Some(200));
    assert_eq!(snap.selected, Some(correct));
    assert_eq!(snap.revealed, None);
    assert!(snap.locked);
    assert_eq!(snap.blur, 0.0);
    assert!(!h.game.is_counting_down());

    let calls = h.calls();
    let n = calls.len();
    assert_eq!(calls[n - 2], SessionCall::Modulate(ModulationSample::CLEAR));
    assert_eq!(calls[n - 1], SessionCall::SetVolume(0.8));
}

#[test]
fn wrong_pick_reveals_the_correct_option() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_until_unlocked();

    let correct = h.correct();
    let wrong = h.wrong();
    assert!(h.select(wrong));

    let snap = h.game.snapshot();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.last_gain, Some(0));
    assert_eq!(snap.selected, Some(wrong));
    assert_eq!(snap.revealed, Some(correct));
}

#[test]
fn second_selection_in_a_round_is_ignored() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_until_unlocked();

    let wrong = h.wrong();
    let correct = h.correct();
    assert!(h.select(wrong));
    assert!(!h.select(correct));
    assert_eq!(h.game.snapshot().score, 0);
    assert_eq!(h.game.snapshot().selected, Some(wrong));
}

#[test]
fn out_of_range_selection_is_ignored() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_until_unlocked();
    assert!(!h.select(9));
    assert!(!h.game.snapshot().locked);
}

#[test]
fn selection_handled_before_expiry_wins_the_race() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(30_500);
    assert_eq!(h.game.snapshot().remaining, 1);

    // expiry is due at 30.6s; the selection lands just before it
    h.elapsed = 30_550;
    let correct = h.correct();
    assert!(h.select(correct));
    h.elapsed = 30_600;
    h.game.poll(h.now());

    let snap = h.game.snapshot();
    assert_eq!(snap.phase, Phase::Resolving);
    assert_eq!(snap.score, 10);
    assert_eq!(snap.selected, Some(correct));
    assert_eq!(snap.remaining, 1);
}

#[test]
fn expiry_handled_before_selection_wins_the_race() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(30_500);

    h.advance_to(30_600);
    let correct = h.correct();
    assert!(!h.select(correct));

    let snap = h.game.snapshot();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.selected, None);
    assert_eq!(snap.revealed, Some(correct));
}

#[test]
fn selection_at_the_expiry_instant_is_ignored() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(30_500);

    h.elapsed = 30_600;
    let correct = h.correct();
    assert!(!h.select(correct));
    assert_eq!(h.game.snapshot().score, 0);
    assert_eq!(h.game.snapshot().revealed, Some(correct));
}

#[test]
fn selection_after_a_stalled_loop_cannot_score_an_expired_round() {
    // a long reveal keeps the expired round on screen through the stall
    let rules = GameRules {
        reveal_dwell: secs(10),
        ..rules()
    };
    let mut h = Harness::new(rules, pool(10), 0);
    h.advance_to(30_500);
    assert_eq!(h.game.snapshot().remaining, 1);

    // nothing polled the controller for five seconds
    h.elapsed = 35_600;
    let correct = h.correct();
    assert!(!h.select(correct));

    let snap = h.game.snapshot();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.last_gain, None);
    assert_eq!(snap.selected, None);
    assert_eq!(snap.remaining, 0);
    assert_eq!(snap.round, 1);
    assert_eq!(snap.phase, Phase::Resolving);
    assert_eq!(snap.revealed, Some(correct));
}

#[test]
fn timeout_reveals_then_moves_on_after_dwell_and_transition() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(30_600);

    let correct = h.correct();
    let snap = h.game.snapshot();
    assert_eq!(snap.phase, Phase::Resolving);
    assert_eq!(snap.remaining, 0);
    assert_eq!(snap.revealed, Some(correct));
    assert!(snap.locked);
    assert_eq!(snap.score, 0);
    assert_eq!(h.calls().last(), Some(&SessionCall::Stop));

    h.advance_to(32_500);
    assert_eq!(h.game.phase(), Phase::Resolving);
    h.advance_to(32_600);
    let snap = h.game.snapshot();
    assert!(snap.transitioning);
    assert_eq!(snap.revealed, None);

    h.advance_to(33_200);
    let snap = h.game.snapshot();
    assert_eq!(snap.phase, Phase::Playing);
    assert_eq!(snap.round, 2);
    assert_eq!(snap.remaining, 30);
}

#[test]
fn ticks_follow_the_modulation_curve() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(15_600);
    assert_eq!(h.game.snapshot().remaining, 15);
    assert_eq!(h.game.snapshot().blur, 15.0);

    assert_eq!(
        h.calls().last(),
        Some(&SessionCall::Modulate(audio::sample(0.5)))
    );
}

#[test]
fn stale_audio_completion_is_discarded() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(600);
    let current = h.game.audio().last_load().expect("round requested audio");

    h.game.on_audio_loaded(LoadCompletion {
        generation: current - 1,
        result: Ok(clip("old")),
    });
    assert!(
        !h.calls()
            .iter()
            .any(|c| matches!(c, SessionCall::Start { .. }))
    );

    h.game.on_audio_loaded(LoadCompletion {
        generation: current,
        result: Ok(clip("new")),
    });
    let calls = h.calls();
    let n = calls.len();
    assert_eq!(calls[n - 2], SessionCall::Start {
        reference: "new".to_string()
    });
    assert_eq!(calls[n - 1], SessionCall::Modulate(audio::sample(1.0)));
}

#[test]
fn completion_after_resolution_does_not_start_audio() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_until_unlocked();
    let current = h.game.audio().last_load().expect("round requested audio");
    let correct = h.correct();
    h.select(correct);

    h.game.on_audio_loaded(LoadCompletion {
        generation: current,
        result: Ok(clip("late")),
    });
    assert!(
        !h.calls()
            .iter()
            .any(|c| matches!(c, SessionCall::Start { .. }))
    );
}

#[test]
fn round_runs_without_audio_when_loading_fails() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(600);
    let current = h.game.audio().last_load().expect("round requested audio");
    h.game.on_audio_loaded(LoadCompletion {
        generation: current,
        result: Err(AudioLoadError::EmptyReference),
    });

    h.advance_to(1_600);
    assert!(h.game.is_counting_down());
    let correct = h.correct();
    assert!(h.select(correct));
    assert_eq!(h.game.snapshot().score, 290);
}

#[test]
fn full_game_scores_every_round_and_updates_high_score() {
    let mut h = Harness::new(rules(), pool(10), 100);

    for round in 1..=5 {
        h.advance_until_unlocked();
        assert_eq!(h.game.snapshot().round, round);
        let correct = h.correct();
        assert!(h.select(correct));
        assert_eq!(h.game.snapshot().last_gain, Some(290));
    }

    h.advance_by(3_600);
    let snap = h.game.snapshot();
    assert!(snap.ended);
    assert_eq!(snap.phase, Phase::Ended);
    assert_eq!(snap.round, 5);
    assert_eq!(snap.score, 1_450);
    assert_eq!(snap.high_score, 1_450);
    assert!(!h.game.is_counting_down());
    assert!(!h.game.has_pending_dwell());
}

#[test]
fn lower_score_keeps_the_high_score() {
    let mut h = Harness::new(rules(), pool(10), 5_000);
    for _ in 1..=5 {
        h.advance_until_unlocked();
        let correct = h.correct();
        h.select(correct);
    }
    h.advance_by(3_600);

    let snap = h.game.snapshot();
    assert!(snap.ended);
    assert_eq!(snap.score, 1_450);
    assert_eq!(snap.high_score, 5_000);
}

#[test]
fn pool_smaller_than_round_count_plays_fewer_rounds() {
    let mut h = Harness::new(rules(), pool(4), 0);
    assert_eq!(h.game.snapshot().total_rounds, 4);

    for _ in 1..=4 {
        h.advance_until_unlocked();
        let correct = h.correct();
        h.select(correct);
    }
    h.advance_by(3_600);
    assert!(h.game.snapshot().ended);
    assert_eq!(h.game.snapshot().round, 4);
}

#[test]
fn advance_round_skips_to_the_next_round_after_the_transition() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_until_unlocked();

    let now = h.now();
    h.game.advance_round(now);
    let snap = h.game.snapshot();
    assert!(snap.transitioning);
    assert!(snap.locked);
    assert!(!h.game.is_counting_down());

    h.advance_by(600);
    let snap = h.game.snapshot();
    assert_eq!(snap.round, 2);
    assert_eq!(snap.phase, Phase::Playing);
}

#[test]
fn skipping_a_round_silences_it_and_drops_its_load() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_until_unlocked();
    let skipped = h.game.audio().last_load().expect("round requested audio");

    let now = h.now();
    h.game.advance_round(now);
    assert_eq!(h.calls().last(), Some(&SessionCall::Stop));
    assert!(h.game.generation() > skipped);

    h.game.on_audio_loaded(LoadCompletion {
        generation: skipped,
        result: Ok(clip("skipped")),
    });
    assert!(
        !h.calls()
            .iter()
            .any(|c| matches!(c, SessionCall::Start { .. }))
    );
}

#[test]
fn advance_round_past_the_last_round_ends_the_game() {
    let mut h = Harness::new(rules(), pool(10), 0);
    for _ in 0..5 {
        h.advance_to(h.elapsed + 600);
        let now = h.now();
        h.game.advance_round(now);
    }
    h.advance_by(600);
    assert!(h.game.snapshot().ended);

    // no-op once ended
    let now = h.now();
    h.game.advance_round(now);
    assert!(!h.game.snapshot().transitioning);
}

#[test]
fn restart_reusing_rounds_replays_the_same_questions() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_until_unlocked();
    let first = h.game.snapshot().options;
    let correct = h.correct();
    h.select(correct);
    assert_eq!(h.game.snapshot().score, 290);

    let now = h.now();
    h.game.restart(now);
    let snap = h.game.snapshot();
    assert_eq!(snap.score, 0);
    assert_eq!(snap.round, 0);
    assert_eq!(snap.last_gain, None);
    assert!(snap.transitioning);

    h.advance_by(600);
    let snap = h.game.snapshot();
    assert_eq!(snap.round, 1);
    assert_eq!(snap.options, first);
}

#[test]
fn restart_rebuilding_rounds_starts_a_fresh_session() {
    let mut h = Harness::new(
        GameRules {
            restart: RestartPolicy::RebuildRounds,
            ..rules()
        },
        pool(10),
        0,
    );
    h.advance_until_unlocked();
    let before = h.game.generation();

    let now = h.now();
    h.game.restart(now);
    assert!(h.game.generation() > before);
    assert!(!h.game.is_counting_down());

    h.advance_by(600);
    let snap = h.game.snapshot();
    assert_eq!(snap.round, 1);
    assert_eq!(snap.total_rounds, 5);
    assert_eq!(snap.phase, Phase::Playing);
}

#[test]
fn restart_from_the_results_screen_plays_again() {
    let mut h = Harness::new(rules(), pool(4), 0);
    for _ in 0..4 {
        h.advance_until_unlocked();
        let correct = h.correct();
        h.select(correct);
    }
    h.advance_by(3_600);
    assert!(h.game.snapshot().ended);

    let now = h.now();
    h.game.restart(now);
    h.advance_until_unlocked();
    assert_eq!(h.game.snapshot().round, 1);
    assert_eq!(h.game.snapshot().high_score, 4 * 290);
}

#[test]
fn teardown_silences_audio_and_stops_all_timers() {
    let mut h = Harness::new(rules(), pool(10), 0);
    h.advance_to(5_600);
    h.game.teardown();

    assert_eq!(h.calls().last(), Some(&SessionCall::Stop));
    assert!(!h.game.is_counting_down());
    let calls_after_teardown = h.calls().len();
    let snap = h.game.snapshot();

    h.advance_by(60_000);
    assert_eq!(h.calls().len(), calls_after_teardown);
    assert_eq!(h.game.snapshot(), snap);

    let correct = h.correct();
    assert!(!h.select(correct));
    let now = h.now();
    h.game.restart(now);
    assert_eq!(h.game.snapshot(), snap);
}

#[test]
fn subscribers_receive_snapshots_on_change() {
    let start = Instant::now();
    let mut game = GameController::new(rules(), NullSession::new(), MemoryHighScore::default());
    let rx = game.subscribe();
    assert_eq!(rx.recv().map(|s| s.phase), Ok(Phase::Loading));

    game.load_session(pool(10), start);
    game.poll(start + Duration::from_millis(600));

    let latest = rx.try_iter().last().expect("published after entering round");
    assert_eq!(latest.phase, Phase::Playing);
    assert_eq!(latest.round, 1);

    // quiet polls publish nothing
    game.poll(start + Duration::from_millis(700));
    assert!(rx.try_iter().next().is_none());
}

#[test]
fn dropped_subscribers_are_pruned() {
    let start = Instant::now();
    let mut game = GameController::new(rules(), NullSession::new(), MemoryHighScore::default());
    drop(game.subscribe());
    let rx = game.subscribe();

    game.load_session(pool(10), start);
    assert!(rx.try_iter().count() >= 2);
}

// ---- high score store ----

#[test]
fn file_high_score_missing_file_reads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileHighScore::open(dir.path().join("none.toml"));
    assert_eq!(store.get(), 0);
}

#[test]
fn file_high_score_corrupt_file_reads_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("highscore.toml");
    std::fs::write(&path, "high_score = \"lots\"").unwrap();

    let mut store = FileHighScore::open(path.clone());
    assert_eq!(store.get(), 0);

    store.set_if_greater(10);
    assert_eq!(FileHighScore::open(path).get(), 10);
}

#[test]
fn file_high_score_persists_only_improvements() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("highscore.toml");

    let mut store = FileHighScore::open(path.clone());
    store.set_if_greater(1_450);
    store.set_if_greater(300);
    assert_eq!(store.get(), 1_450);

    let reopened = FileHighScore::open(path);
    assert_eq!(reopened.get(), 1_450);
}

#[test]
fn memory_high_score_keeps_the_maximum() {
    let mut store = MemoryHighScore::with_value(50);
    store.set_if_greater(20);
    assert_eq!(store.get(), 50);
    store.set_if_greater(80);
    assert_eq!(store.get(), 80);
}
