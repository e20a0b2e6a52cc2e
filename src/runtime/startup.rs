use std::env;
use std::path::Path;
use std::sync::mpsc::Sender;

use crate::app::App;
use crate::config::{PersistedState, Settings};
use crate::library;
use crate::player::Sink;
use crate::remote::{self, FetchOutcome};

/// Apply playback defaults and kick off the initial load: a directory given
/// on the command line wins, otherwise the remembered remote path (if any)
/// is fetched in the background.
pub fn apply_startup(
    app: &mut App,
    audio: &mut impl Sink,
    settings: &Settings,
    fetch_tx: &Sender<FetchOutcome>,
) {
    let volume = settings.playback.volume;
    app.player.set_volume(volume, audio);

    if let Some(dir) = env::args().nth(1) {
        load_local(app, audio, settings, Path::new(&dir));
        return;
    }

    if let Some(path) = PersistedState::load().remote_path {
        app.loading = true;
        remote::spawn_fetch(path, settings.library.extensions.clone(), fetch_tx.clone());
    }
}

/// Scan a local directory and replace the playlist with its audio files.
pub fn load_local(app: &mut App, audio: &mut impl Sink, settings: &Settings, dir: &Path) {
    let seeds = library::scan(dir, &settings.library);
    if seeds.is_empty() {
        app.player.replace(Vec::new(), audio);
        app.playlist_label = "Songs".to_string();
        app.set_status("No audio files found.");
    } else {
        app.player.replace(seeds, audio);
        app.playlist_label = "Songs (Local)".to_string();
        app.clear_status();
    }
    app.selected = 0;
    app.clear_filter();
}
