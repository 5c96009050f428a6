//! Quiz rounds and the builder that deals them out of a track pool.

mod builder;
mod model;

pub use builder::build;
pub use model::{QuizOption, Round};
