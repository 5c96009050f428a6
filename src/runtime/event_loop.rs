use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::{AudioSession, LoadCompletion};
use crate::catalog::CatalogFetcher;
use crate::config::{self, RestartPolicy};
use crate::game::{GameController, GameSnapshot, HighScoreStore, Phase};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Latest snapshot published by the controller.
    pub snapshot: GameSnapshot,
    /// Option highlighted for `enter`.
    pub cursor: usize,
}

impl EventLoopState {
    pub fn new(snapshot: GameSnapshot) -> Self {
        Self {
            snapshot,
            cursor: 0,
        }
    }

    /// Take a newer snapshot; a new round puts the cursor back on top.
    fn accept(&mut self, snapshot: GameSnapshot) {
        if snapshot.round != self.snapshot.round || snapshot.phase == Phase::Ended {
            self.cursor = 0;
        }
        self.snapshot = snapshot;
    }

    fn move_cursor(&mut self, down: bool) {
        let len = self.snapshot.options.len();
        if len == 0 {
            return;
        }
        self.cursor = if down {
            (self.cursor + 1) % len
        } else {
            (self.cursor + len - 1) % len
        };
    }
}

/// Main terminal event loop: feeds time, input and audio completions to the
/// controller and redraws from its snapshots. Returns `Ok(())` when the
/// player quits.
pub fn run<S: AudioSession, H: HighScoreStore>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    game: &mut GameController<S, H>,
    catalog: &dyn CatalogFetcher,
    completions: &Receiver<LoadCompletion>,
) -> Result<(), Box<dyn std::error::Error>> {
    let updates = game.subscribe();
    let mut state = EventLoopState::new(game.snapshot());

    // The fetch blocks; show the loading screen while it runs.
    terminal.draw(|f| ui::draw(f, &state.snapshot, state.cursor, &settings.ui))?;
    start_session(game, catalog, settings);

    loop {
        while let Ok(done) = completions.try_recv() {
            game.on_audio_loaded(done);
        }
        game.poll(Instant::now());

        if let Some(snapshot) = updates.try_iter().last() {
            state.accept(snapshot);
        }

        terminal.draw(|f| ui::draw(f, &state.snapshot, state.cursor, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, terminal, settings, game, catalog, &mut state)? {
                    break;
                }
            }
        }
    }

    game.teardown();
    Ok(())
}

fn start_session<S: AudioSession, H: HighScoreStore>(
    game: &mut GameController<S, H>,
    catalog: &dyn CatalogFetcher,
    settings: &config::Settings,
) {
    let pool = catalog.fetch_pool(&settings.catalog.language, &settings.catalog.category);
    game.load_session(pool, Instant::now());
}

fn select<S: AudioSession, H: HighScoreStore>(game: &mut GameController<S, H>, choice: usize) {
    if !game.select(choice, Instant::now()) {
        log::debug!("selection {choice} not accepted");
    }
}

fn handle_key_event<S: AudioSession, H: HighScoreStore>(
    key: KeyEvent,
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    game: &mut GameController<S, H>,
    catalog: &dyn CatalogFetcher,
    state: &mut EventLoopState,
) -> Result<bool, Box<dyn std::error::Error>> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Char(c @ '1'..='9') => {
            let choice = c as usize - '1' as usize;
            if choice < state.snapshot.options.len() {
                state.cursor = choice;
            }
            select(game, choice);
        }
        KeyCode::Char('j') | KeyCode::Down => state.move_cursor(true),
        KeyCode::Char('k') | KeyCode::Up => state.move_cursor(false),
        KeyCode::Enter => select(game, state.cursor),
        KeyCode::Char('n') => {
            if state.snapshot.phase == Phase::Playing {
                game.advance_round(Instant::now());
            }
        }
        KeyCode::Char('r') => {
            if state.snapshot.ended {
                // an empty catalog has nothing to replay; ask the source again
                let refetch = game.rules().restart == RestartPolicy::Refetch
                    || state.snapshot.total_rounds == 0;
                if refetch {
                    let mut loading = state.snapshot.clone();
                    loading.phase = Phase::Loading;
                    loading.ended = false;
                    terminal.draw(|f| ui::draw(f, &loading, 0, &settings.ui))?;
                    start_session(game, catalog, settings);
                } else {
                    game.restart(Instant::now());
                }
            }
        }
        _ => {}
    }

    Ok(false)
}
