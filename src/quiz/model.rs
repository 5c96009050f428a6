/// One answer button. Identity is its position within the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOption {
    pub title: String,
    pub artist: String,
    pub is_correct: bool,
}

/// One playable question: the correct track's media plus shuffled options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub album_art: String,
    pub audio: String,
    pub options: Vec<QuizOption>,
}

impl Round {
    /// Position of the correct option.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| o.is_correct)
    }
}
