use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{LoadCompletion, NullSession, RodioSession};
use crate::game::{GameController, GameRules};
use crate::logging;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, note) = settings::load_settings();
    logging::init(&settings.log);
    if let Some(note) = note {
        eprintln!("muffle: {note}");
        log::warn!("{note}");
    }

    let catalog = startup::open_catalog(&settings, env::args().nth(1));
    let high_scores = startup::open_high_score(&settings.high_score);
    let rules = GameRules::from_settings(&settings);
    let (completions_tx, completions_rx) = mpsc::channel::<LoadCompletion>();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = if settings.audio.enabled {
        let audio = RodioSession::new(&settings.audio, completions_tx);
        let mut game = GameController::new(rules, audio, high_scores);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut game,
            catalog.as_ref(),
            &completions_rx,
        )
    } else {
        log::info!("audio disabled, playing silently");
        drop(completions_tx);
        let mut game = GameController::new(rules, NullSession::new(), high_scores);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut game,
            catalog.as_ref(),
            &completions_rx,
        )
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
