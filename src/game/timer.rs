//! Round countdown.
//!
//! The timer never reads the clock itself: the owner feeds it `now` and it
//! hands back at most one event per `poll`, so a cancel issued while handling
//! an event takes effect before the next one could fire.

use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    Expired,
    Cancelled,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// One second elapsed; carries the seconds still left (> 0).
    Tick(u32),
    /// The countdown reached zero. Emitted once per run.
    Expired,
}

#[derive(Debug)]
pub struct RoundTimer {
    state: TimerState,
    total: u32,
    remaining: u32,
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Default for RoundTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundTimer {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_secs(1))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            state: TimerState::Idle,
            total: 0,
            remaining: 0,
            interval,
            next_tick: None,
        }
    }

    /// Start counting down from `total` seconds. Any run in progress is
    /// cancelled first.
    pub fn start(&mut self, total: u32, now: Instant) {
        self.cancel();
        self.state = TimerState::Running;
        self.total = total;
        self.remaining = total;
        self.next_tick = Some(now + self.interval);
    }

    /// Stop a running countdown; its pending ticks and expiry never fire.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Cancelled;
        }
        self.next_tick = None;
    }

    #[cfg(test)]
    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    #[cfg(test)]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[cfg(test)]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// When the next event is due, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        if self.is_running() {
            self.next_tick
        } else {
            None
        }
    }

    /// Fire the next due event, if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<TimerEvent> {
        let due = self.next_deadline().filter(|at| *at <= now)?;

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            self.next_tick = Some(due + self.interval);
            Some(TimerEvent::Tick(self.remaining))
        } else {
            self.state = TimerState::Expired;
            self.next_tick = None;
            Some(TimerEvent::Expired)
        }
    }
}
