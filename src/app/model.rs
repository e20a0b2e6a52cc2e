//! Application model types: `App`, `Prompt` and `PromptKind`.

use crate::player::Player;
use crate::playlist::Track;

/// Which input the text prompt is collecting.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// A `user/repo/path` for a GitHub load.
    RemotePath,
    /// A local directory to scan.
    LocalDir,
}

/// An open one-line text prompt.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// The main application model.
pub struct App {
    pub player: Player,
    /// Cursor position in the playlist (an index into the full track list).
    pub selected: usize,

    pub filter_mode: bool,
    pub filter_query: String,

    pub prompt: Option<Prompt>,
    /// Transient message shown in the status box (errors, hints).
    pub status: Option<String>,
    /// Heading over the playlist, e.g. "Songs (GitHub)".
    pub playlist_label: String,
    /// True while a remote fetch is in flight.
    pub loading: bool,
}

impl App {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            selected: 0,
            filter_mode: false,
            filter_query: String::new(),
            prompt: None,
            status: None,
            playlist_label: "Songs".to_string(),
            loading: false,
        }
    }

    pub fn has_tracks(&self) -> bool {
        !self.player.playlist.is_empty()
    }

    /// Indices of tracks matching the filter, in playlist order.
    ///
    /// The filter is a case-insensitive substring match over title and
    /// artist; a blank query shows everything.
    pub fn visible_indices(&self) -> Vec<usize> {
        let query = self.filter_query.trim().to_lowercase();
        self.player
            .playlist
            .tracks()
            .iter()
            .enumerate()
            .filter(|(_, t)| query.is_empty() || matches_filter(t, &query))
            .map(|(i, _)| i)
            .collect()
    }

    /// Move the cursor to the next visible track, wrapping around.
    pub fn next(&mut self) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }
        self.selected = match visible.iter().position(|&i| i == self.selected) {
            Some(pos) => visible[(pos + 1) % visible.len()],
            None => visible[0],
        };
    }

    /// Move the cursor to the previous visible track, wrapping around.
    pub fn prev(&mut self) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            return;
        }
        self.selected = match visible.iter().position(|&i| i == self.selected) {
            Some(0) | None => visible[visible.len() - 1],
            Some(pos) => visible[pos - 1],
        };
    }

    /// Keep the cursor inside the current visible set.
    pub fn ensure_selected_visible(&mut self) {
        let visible = self.visible_indices();
        if visible.is_empty() {
            self.selected = 0;
            return;
        }
        if !visible.contains(&self.selected) {
            self.selected = visible[0];
        }
    }

    pub fn enter_filter_mode(&mut self) {
        self.filter_mode = true;
    }

    pub fn exit_filter_mode(&mut self) {
        self.filter_mode = false;
    }

    pub fn clear_filter(&mut self) {
        self.filter_query.clear();
        self.filter_mode = false;
        self.ensure_selected_visible();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_query.push(c);
        self.ensure_selected_visible();
    }

    pub fn pop_filter_char(&mut self) {
        self.filter_query.pop();
        self.ensure_selected_visible();
    }

    /// Open a text prompt pre-filled with `initial`.
    pub fn open_prompt(&mut self, kind: PromptKind, initial: String) {
        self.prompt = Some(Prompt {
            kind,
            input: initial,
        });
    }

    /// Close the prompt, returning its contents.
    pub fn take_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }

    pub fn push_prompt_char(&mut self, c: char) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.push(c);
        }
    }

    pub fn pop_prompt_char(&mut self) {
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.input.pop();
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

fn matches_filter(track: &Track, query_lower: &str) -> bool {
    track.title.to_lowercase().contains(query_lower)
        || track.artist.to_lowercase().contains(query_lower)
}
