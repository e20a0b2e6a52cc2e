//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`, plus
//! the time formatting used for progress display.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, PromptKind};
use crate::config::{ControlsSettings, UiSettings};
use crate::player::RepeatMode;

/// Format a number of seconds as `M:SS`.
///
/// Unknown durations (NaN, infinities) render as the `--:--` placeholder.
/// Minutes are not zero-padded: `65.0` is `1:05`, `5.0` is `0:05`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "--:--".to_string();
    }
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// `format_time` over an optional `Duration`, `None` being unknown.
pub fn format_duration(duration: Option<Duration>) -> String {
    match duration {
        Some(d) => format_time(d.as_secs_f64()),
        None => "--:--".to_string(),
    }
}

fn controls_text(scrub_seconds: u64) -> String {
    [
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] scrub -/+{}s", scrub_seconds),
        "[0-9] jump to %".to_string(),
        "[-/+] volume".to_string(),
        "[s] shuffle".to_string(),
        "[r] repeat".to_string(),
        "[/] filter".to_string(),
        "[o] local folder".to_string(),
        "[g] GitHub".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

fn repeat_text(mode: RepeatMode) -> &'static str {
    match mode {
        RepeatMode::Off => "REPEAT: off",
        RepeatMode::All => "REPEAT: all",
        RepeatMode::One => "REPEAT: one",
    }
}

/// The one-line summary of the selected/playing track.
fn now_playing_text(app: &App) -> String {
    match app.player.playlist.current_track() {
        Some(track) => {
            let art = if track.has_cover { " [art]" } else { "" };
            format!("{} - {}{}", track.title, track.artist, art)
        }
        None => "Nothing loaded".to_string(),
    }
}

/// Render the entire UI into the provided `frame` using `app` state.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    visible: &[usize],
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vivace ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Now playing / status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!("Song: {}", now_playing_text(app)));
        parts.push(if app.player.playing { "Playing" } else { "Paused" }.to_string());

        parts.push(if app.player.shuffle {
            "SHUFFLE: on".to_string()
        } else {
            "SHUFFLE: off".to_string()
        });
        parts.push(repeat_text(app.player.repeat).to_string());
        parts.push(format!("Vol: {:.0}%", app.player.volume() * 100.0));

        let q = app.filter_query.trim();
        if app.filter_mode || !q.is_empty() {
            parts.push(format!("FILTER: {q}"));
        }
        if app.loading {
            parts.push("Loading from GitHub...".to_string());
        }
        if let Some(message) = &app.status {
            parts.push(message.clone());
        }

        parts.join(" | ")
    };
    let status_par = Paragraph::new(status)
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

    // Progress bar
    {
        let position = app.player.position.as_secs_f64();
        let ratio = match app.player.duration {
            Some(total) if total > Duration::ZERO => {
                (position / total.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };
        let label = format!(
            "{} / {}",
            format_time(position),
            format_duration(app.player.duration)
        );
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" progress "))
            .ratio(ratio)
            .label(label);
        frame.render_widget(gauge, chunks[2]);
    }

    // Playlist
    {
        let title = format!(" {} ", app.playlist_label);
        let block = Block::default().borders(Borders::ALL).title(title);

        if !app.has_tracks() {
            let message = if app.loading {
                "Loading from GitHub..."
            } else {
                "No songs loaded. Press o (local folder) or g (GitHub path)."
            };
            let empty = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, chunks[3]);
        } else if visible.is_empty() {
            let empty = Paragraph::new("No matching songs.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, chunks[3]);
        } else {
            // Window the list around the cursor so long playlists stay
            // centered without allocating items off-screen.
            let total = visible.len();
            let list_height = chunks[3].height.saturating_sub(2) as usize;
            let sel_pos = visible.iter().position(|&i| i == app.selected).unwrap_or(0);
            let (start, end, selected_in_window) = if total <= list_height || list_height == 0 {
                (0, total, sel_pos)
            } else {
                let half = list_height / 2;
                let mut start = sel_pos.saturating_sub(half);
                if start + list_height > total {
                    start = total - list_height;
                }
                (start, start + list_height, sel_pos - start)
            };

            let current = app.player.playlist.current();
            let items: Vec<ListItem> = visible[start..end]
                .iter()
                .map(|&i| {
                    let track = &app.player.playlist.tracks()[i];
                    let marker = if Some(i) == current { "▶ " } else { "  " };
                    let line = format!(
                        "{}{} - {}  [{}]",
                        marker,
                        track.title,
                        track.artist,
                        format_duration(track.duration)
                    );
                    ListItem::new(line)
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ratatui::widgets::ListState::default();
            state.select(Some(selected_in_window));
            frame.render_stateful_widget(list, chunks[3], &mut state);
        }
    }

    // Footer: prompt input when open, otherwise the controls help.
    let footer_text = match &app.prompt {
        Some(prompt) => {
            let label = match prompt.kind {
                PromptKind::RemotePath => "GitHub path (user/repo/path)",
                PromptKind::LocalDir => "Local folder",
            };
            format!("{label}: {}_  (enter to load, esc to cancel)", prompt.input)
        }
        None => controls_text(controls_settings.scrub_seconds),
    };
    let footer = Paragraph::new(footer_text)
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
