//! Audio engine: the modulation curve, the `AudioSession` capability and its
//! rodio-backed implementation.
//!
//! The playback graph is decoder -> low-pass -> varispeed sink -> mixer and
//! lives on a dedicated audio thread; previews are fetched and probe-decoded
//! on a separate loader thread so round timing never waits on I/O.

mod filter;
mod loader;
mod modulation;
mod player;
mod session;
mod thread;
mod types;

pub use modulation::{ModulationSample, sample};
pub use player::RodioSession;
pub use session::{AudioSession, NullSession};
pub use types::LoadCompletion;

#[cfg(test)]
pub use session::SessionCall;
#[cfg(test)]
pub use types::{AudioClip, AudioLoadError};

#[cfg(test)]
mod tests;
