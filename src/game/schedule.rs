//! One-shot deadlines owned by the controller.

use std::time::Instant;

/// Identifies a scheduled action so it can be cancelled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<A> {
    handle: TimerHandle,
    at: Instant,
    action: A,
}

#[derive(Debug)]
pub struct Schedule<A> {
    next_id: u64,
    entries: Vec<Entry<A>>,
}

impl<A> Default for Schedule<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Schedule<A> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, at: Instant, action: A) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { handle, at, action });
        handle
    }

    /// Returns false when the handle already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.at).min()
    }

    /// Remove and return the earliest action due at `now`. Ties go to the
    /// one scheduled first.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, A)> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.at <= now)
            .min_by_key(|(_, e)| (e.at, e.handle.0))
            .map(|(i, _)| i)?;
        let entry = self.entries.remove(pos);
        Some((entry.at, entry.action))
    }
}
