//! Runtime wiring: terminal setup, worker channels and the event loop.

use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioSink;
use crate::metadata::TagOutcome;
use crate::player::Player;
use crate::remote::FetchOutcome;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let (mut audio, sink_events) = AudioSink::spawn();
    let (fetch_tx, fetch_rx) = mpsc::channel::<FetchOutcome>();
    let (tags_tx, tags_rx) = mpsc::channel::<TagOutcome>();

    let player = Player::new(
        settings.playback.shuffle,
        settings.playback.repeat.into(),
        settings.playback.volume,
    );
    let mut app = App::new(player);

    startup::apply_startup(&mut app, &mut audio, &settings, &fetch_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut audio,
        &sink_events,
        &fetch_rx,
        &fetch_tx,
        &tags_rx,
        &tags_tx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    audio.quit();

    run_result
}
