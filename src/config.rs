//! Configuration loader and schema types.
//!
//! This module exposes the settings schema that drives the quiz rules, the
//! audio engine and the song catalog, plus helpers to load it from disk.

mod load;
mod schema;

pub use load::{default_data_path, default_state_path};
pub use schema::*;
