//! Game state machine: round countdown, resolution and scoring.
//!
//! `GameController` owns the session and is the only thing that mutates it.
//! It is driven by three kinds of input: `poll(now)` for elapsed time, user
//! commands (`select`, `restart`) and audio load completions. The UI only
//! sees `GameSnapshot`s.

mod controller;
mod high_score;
mod rules;
mod schedule;
mod snapshot;
mod timer;

pub use controller::GameController;
pub use high_score::{FileHighScore, HighScoreStore, MemoryHighScore};
pub use rules::GameRules;
pub use snapshot::{GameSnapshot, Phase};

#[cfg(test)]
mod tests;
