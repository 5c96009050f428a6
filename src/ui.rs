//! UI rendering helpers for the terminal user interface.
//!
//! Everything drawn here comes from a `GameSnapshot`; the UI never talks to
//! the controller directly.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::config::UiSettings;
use crate::game::{GameSnapshot, Phase};
use crate::quiz::QuizOption;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("1-9", "pick option");
    map.insert("j/k", "up/down");
    map.insert("enter", "pick highlighted");
    map.insert("n", "skip round");
    map.insert("r", "play again");
    map.insert("q", "quit");
    map
});

/// Render the controls help text.
fn controls_text() -> String {
    let order = ["1-9", "j/k", "enter", "n", "r", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// How clearly the preview can be heard, 0.0 (fully muffled) to 1.0.
pub(crate) fn clarity(snapshot: &GameSnapshot) -> f64 {
    if snapshot.total == 0 {
        return 1.0;
    }
    (1.0 - f64::from(snapshot.blur) / f64::from(snapshot.total)).clamp(0.0, 1.0)
}

/// Mask the tail of `text`, leaving a share proportional to `clarity` readable.
pub(crate) fn obscure(text: &str, clarity: f64) -> String {
    let len = text.chars().count();
    let visible = (len as f64 * clarity.clamp(0.0, 1.0)).round() as usize;
    text.chars()
        .enumerate()
        .map(|(i, c)| if i < visible { c } else { '░' })
        .collect()
}

/// Label for option `index`, marked once the round is resolved.
pub(crate) fn option_label(index: usize, option: &QuizOption, snapshot: &GameSnapshot) -> String {
    let mark = if snapshot.selected == Some(index) {
        if option.is_correct { "✓ " } else { "✗ " }
    } else if snapshot.revealed == Some(index) {
        "→ "
    } else {
        "  "
    };
    format!("{}{}. {} - {}", mark, index + 1, option.title, option.artist)
}

fn option_style(index: usize, option: &QuizOption, snapshot: &GameSnapshot) -> Style {
    let picked = snapshot.selected == Some(index);
    if (picked && option.is_correct) || snapshot.revealed == Some(index) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if picked {
        Style::default().fg(Color::Red)
    } else if snapshot.locked {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}

fn status_text(snapshot: &GameSnapshot) -> String {
    let mut parts: Vec<String> = Vec::new();

    if snapshot.total_rounds > 0 {
        parts.push(format!(
            " ROUND: {}/{}",
            snapshot.round.max(1),
            snapshot.total_rounds
        ));
    }
    parts.push(format!("SCORE: {}", snapshot.score));
    parts.push(format!("BEST: {}", snapshot.high_score));
    if let Some(gain) = snapshot.last_gain {
        parts.push(format!("+{gain}"));
    }

    let phase = match snapshot.phase {
        Phase::Loading if snapshot.transitioning => "Next round...",
        Phase::Loading => "Loading",
        Phase::Playing if snapshot.locked => "Get ready",
        Phase::Playing => "Guess!",
        Phase::Resolving => match (snapshot.selected, snapshot.revealed) {
            (None, _) => "Time's up",
            (Some(_), None) => "Correct",
            (Some(_), Some(_)) => "Wrong",
        },
        Phase::Ended => "Game over",
    };
    parts.push(phase.to_string());

    parts.join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn results_text(snapshot: &GameSnapshot) -> String {
    if snapshot.total_rounds == 0 {
        return "No playable tracks found.\n\nCheck the catalog settings or pass a music directory.\n\n[r] try again  [q] quit".to_string();
    }
    let mut text = format!(
        "Final score: {}\nBest: {}",
        snapshot.score, snapshot.high_score
    );
    if snapshot.score > 0 && snapshot.score == snapshot.high_score {
        text.push_str("\nNew high score!");
    }
    text.push_str("\n\n[r] play again  [q] quit");
    text
}

/// Render the entire UI into the provided `frame` from `snapshot`.
pub fn draw(frame: &mut Frame, snapshot: &GameSnapshot, cursor: usize, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" muffle ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(snapshot))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Countdown and clarity
    {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        let countdown = Gauge::default()
            .block(Block::bordered().title(" time "))
            .gauge_style(Style::default().fg(Color::Yellow))
            .ratio(f64::from(snapshot.progress).clamp(0.0, 1.0))
            .label(format!("{}s", snapshot.remaining));
        frame.render_widget(countdown, halves[0]);

        let clear = clarity(snapshot);
        let clarity_gauge = Gauge::default()
            .block(Block::bordered().title(" clarity "))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(clear)
            .label(format!("{:.0}%", clear * 100.0));
        frame.render_widget(clarity_gauge, halves[1]);
    }

    // Options
    {
        let area = chunks[3];
        let mut block = Block::default().borders(Borders::ALL).title(" options ");
        if ui_settings.show_art_reference && !snapshot.album_art.is_empty() {
            block = block.title_bottom(format!(
                " art: {} ",
                obscure(&snapshot.album_art, clarity(snapshot))
            ));
        }

        if snapshot.options.is_empty() {
            let text = match snapshot.phase {
                Phase::Ended => "",
                _ if snapshot.transitioning => "Get ready...",
                _ => "Fetching tracks...",
            };
            let waiting = Paragraph::new(text)
                .alignment(Alignment::Center)
                .slow_blink()
                .block(block);
            frame.render_widget(waiting, area);
        } else {
            let items: Vec<ListItem> = snapshot
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| {
                    ListItem::new(option_label(i, o, snapshot)).style(option_style(i, o, snapshot))
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ratatui::widgets::ListState::default();
            if snapshot.phase == Phase::Playing && !snapshot.locked {
                state.select(Some(cursor.min(snapshot.options.len() - 1)));
            }
            frame.render_stateful_widget(list, area, &mut state);
        }

        if snapshot.ended {
            let popup_area = centered_rect_sized(60, 9, area);
            frame.render_widget(Clear, popup_area);
            let results = Paragraph::new(results_text(snapshot))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" results "))
                .wrap(Wrap { trim: true });
            frame.render_widget(results, popup_area);
        }
    }

    let footer = Paragraph::new(controls_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
