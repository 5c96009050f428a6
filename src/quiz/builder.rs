use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::catalog::Track;

use super::model::{QuizOption, Round};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("need at least {needed} distinct playable tracks, pool has {available}")]
    NoEligibleTracks { needed: usize, available: usize },
}

fn option_for(track: &Track, is_correct: bool) -> QuizOption {
    QuizOption {
        title: track.title.clone(),
        artist: track.artist.clone(),
        is_correct,
    }
}

/// Deal `round_count` rounds out of `pool`.
///
/// Listings sharing an `id` count as one song. Correct tracks are drawn
/// without replacement, so a pool smaller than `round_count` yields a
/// shorter quiz. Each round gets `distractors` other
/// tracks drawn independently per round; the same wrong track may show up in
/// several rounds, but no song appears twice among one round's options.
/// Options are shuffled uniformly. Only the random source decides the
/// outcome, so a seeded `rng` gives a reproducible quiz.
pub fn build<R: Rng + ?Sized>(
    pool: &[Track],
    round_count: usize,
    distractors: usize,
    rng: &mut R,
) -> Result<Vec<Round>, QuizError> {
    // playlists can list the same song twice; only its first listing counts
    let mut seen: HashSet<&str> = HashSet::new();
    let eligible: Vec<&Track> = pool
        .iter()
        .filter(|t| t.is_playable() && seen.insert(t.id.as_str()))
        .collect();
    if eligible.len() < distractors + 1 {
        return Err(QuizError::NoEligibleTracks {
            needed: distractors + 1,
            available: eligible.len(),
        });
    }

    let mut order: Vec<usize> = (0..eligible.len()).collect();
    order.shuffle(rng);
    order.truncate(round_count);

    let mut rounds = Vec::with_capacity(order.len());
    for correct in order {
        let mut others: Vec<usize> = (0..eligible.len()).filter(|&i| i != correct).collect();
        others.shuffle(rng);

        let mut options = Vec::with_capacity(distractors + 1);
        options.push(option_for(eligible[correct], true));
        options.extend(
            others
                .iter()
                .take(distractors)
                .map(|&i| option_for(eligible[i], false)),
        );
        options.shuffle(rng);

        rounds.push(Round {
            album_art: eligible[correct].album_art.clone(),
            audio: eligible[correct].preview.clone(),
            options,
        });
    }

    Ok(rounds)
}
