use crate::quiz::QuizOption;

/// Where the controller is in the session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    /// No rounds yet, or between rounds while the next one is prepared.
    #[default]
    Loading,
    /// A round is being played.
    Playing,
    /// The round is decided; its result is on screen.
    Resolving,
    /// All rounds are over.
    Ended,
}

/// Immutable view of the game published to the UI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub remaining: u32,
    pub total: u32,
    /// remaining / total, 1.0 at round start.
    pub progress: f32,
    /// Visual obscuring amount; equals `remaining` while counting down.
    pub blur: f32,
    pub score: u32,
    /// Points won by the last selection, while its result is shown.
    pub last_gain: Option<u32>,
    /// 1-based number of the current round; 0 before the first.
    pub round: usize,
    pub total_rounds: usize,
    pub options: Vec<QuizOption>,
    pub album_art: String,
    pub selected: Option<usize>,
    /// Correct option shown after a wrong pick or a timeout.
    pub revealed: Option<usize>,
    pub locked: bool,
    pub transitioning: bool,
    pub ended: bool,
    pub high_score: u32,
}
