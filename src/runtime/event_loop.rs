use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, PromptKind};
use crate::audio::AudioSink;
use crate::config::{PersistedState, Settings};
use crate::metadata::{self, TagOutcome};
use crate::player::SinkEvent;
use crate::remote::{self, FetchOutcome};
use crate::runtime::startup;
use crate::ui;

/// Default suggestion for the GitHub path prompt when nothing was saved yet.
const DEFAULT_REMOTE_PATH: &str = "ryyReid/music/likedsongs";

/// Main terminal event loop: drains worker completions, feeds sink events to
/// the controller, draws and handles input. Returns when quit is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &Settings,
    app: &mut App,
    audio: &mut AudioSink,
    sink_events: &Receiver<SinkEvent>,
    fetch_rx: &Receiver<FetchOutcome>,
    fetch_tx: &Sender<FetchOutcome>,
    tags_rx: &Receiver<TagOutcome>,
    tags_tx: &Sender<TagOutcome>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(outcome) = fetch_rx.try_recv() {
            apply_fetch_outcome(app, audio, outcome);
        }

        while let Ok(outcome) = tags_rx.try_recv() {
            apply_tag_outcome(app, outcome);
        }

        while let Ok(event) = sink_events.try_recv() {
            if let Some(message) = app.player.handle_sink_event(event, audio) {
                app.set_status(message);
            }
        }

        request_tags_for_current(app, tags_tx);

        let visible = app.visible_indices();
        terminal.draw(|f| ui::draw(f, app, &visible, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio, fetch_tx)? {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Replace the playlist from a finished remote fetch, or surface its error.
fn apply_fetch_outcome(app: &mut App, audio: &mut AudioSink, outcome: FetchOutcome) {
    app.loading = false;
    match outcome.result {
        Ok(seeds) => {
            if seeds.is_empty() {
                app.player.replace(Vec::new(), audio);
                app.playlist_label = "Songs".to_string();
                app.set_status("No songs found in repository.");
            } else {
                app.player.replace(seeds, audio);
                app.playlist_label = "Songs (GitHub)".to_string();
                app.clear_status();
            }
            app.selected = 0;
            app.clear_filter();
        }
        // Failed fetches leave the current playlist untouched.
        Err(e) => app.set_status(e.to_string()),
    }
}

/// Merge resolved tags into the playlist. Failed lookups keep the
/// placeholders; stale ids are dropped inside `update_metadata`.
fn apply_tag_outcome(app: &mut App, outcome: TagOutcome) {
    let Some(tags) = outcome.tags else {
        return;
    };
    let _ = app.player.playlist.update_metadata(
        outcome.id,
        tags.title.as_deref(),
        tags.artist.as_deref(),
        tags.has_cover,
    );
}

/// Kick off the tag lookup for the current track, once, if it is local.
/// Remote tracks never resolve tags.
fn request_tags_for_current(app: &mut App, tags_tx: &Sender<TagOutcome>) {
    let Some(index) = app.player.playlist.current() else {
        return;
    };
    let Ok(track) = app.player.playlist.get(index) else {
        return;
    };
    if track.tags_requested {
        return;
    }
    let Some(path) = track.local_path().cloned() else {
        return;
    };
    let id = track.id;
    app.player.playlist.mark_tags_requested(index);
    metadata::spawn_resolve(id, path, tags_tx.clone());
}

fn submit_prompt(
    app: &mut App,
    audio: &mut AudioSink,
    settings: &Settings,
    fetch_tx: &Sender<FetchOutcome>,
) {
    let Some(prompt) = app.take_prompt() else {
        return;
    };
    let input = prompt.input.trim().to_string();
    if input.is_empty() {
        return;
    }

    match prompt.kind {
        PromptKind::RemotePath => {
            // Remember the path so the next start can reload it.
            PersistedState {
                remote_path: Some(input.clone()),
            }
            .store();
            app.loading = true;
            app.clear_status();
            remote::spawn_fetch(input, settings.library.extensions.clone(), fetch_tx.clone());
        }
        PromptKind::LocalDir => {
            startup::load_local(app, audio, settings, std::path::Path::new(&input));
        }
    }
}

fn play_selected(app: &mut App, audio: &mut AudioSink) {
    if app.visible_indices().is_empty() {
        return;
    }
    if app.player.select(app.selected, audio).is_ok() {
        app.player.play(audio);
        app.clear_status();
    }
}

/// Handle one key press. Returns `Ok(true)` when the app should quit.
fn handle_key_event(
    key: KeyEvent,
    settings: &Settings,
    app: &mut App,
    audio: &mut AudioSink,
    fetch_tx: &Sender<FetchOutcome>,
) -> Result<bool, Box<dyn std::error::Error>> {
    // An open prompt captures all input.
    if app.prompt.is_some() {
        match key.code {
            KeyCode::Esc => {
                app.take_prompt();
            }
            KeyCode::Backspace => app.pop_prompt_char(),
            KeyCode::Enter => submit_prompt(app, audio, settings, fetch_tx),
            KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
            _ => {}
        }
        return Ok(false);
    }

    if app.filter_mode {
        match key.code {
            KeyCode::Esc => app.clear_filter(),
            KeyCode::Backspace => app.pop_filter_char(),
            KeyCode::Down => app.next(),
            KeyCode::Up => app.prev(),
            KeyCode::Enter => {
                app.exit_filter_mode();
                play_selected(app, audio);
            }
            KeyCode::Char(c) if !c.is_control() => app.push_filter_char(c),
            _ => {}
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => return Ok(true),
        KeyCode::Char('/') => app.enter_filter_mode(),
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Enter => play_selected(app, audio),
        KeyCode::Char(' ') | KeyCode::Char('p') => app.player.toggle(audio),
        KeyCode::Char('l') => app.player.advance(audio),
        KeyCode::Char('h') => app.player.retreat(audio),
        KeyCode::Char('L') => {
            app.player
                .seek_relative(settings.controls.scrub_seconds as i64, audio);
        }
        KeyCode::Char('H') => {
            app.player
                .seek_relative(-(settings.controls.scrub_seconds as i64), audio);
        }
        KeyCode::Char('s') => app.player.toggle_shuffle(),
        KeyCode::Char('r') => app.player.cycle_repeat(),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.player.adjust_volume(settings.controls.volume_step, audio);
        }
        KeyCode::Char('-') => {
            app.player
                .adjust_volume(-settings.controls.volume_step, audio);
        }
        KeyCode::Char(c @ '0'..='9') => {
            let fraction = (c as u8 - b'0') as f64 / 10.0;
            app.player.seek_to_fraction(fraction, audio);
        }
        KeyCode::Char('g') => {
            let initial = PersistedState::load()
                .remote_path
                .unwrap_or_else(|| DEFAULT_REMOTE_PATH.to_string());
            app.open_prompt(PromptKind::RemotePath, initial);
        }
        KeyCode::Char('o') => app.open_prompt(PromptKind::LocalDir, String::new()),
        _ => {}
    }

    Ok(false)
}
