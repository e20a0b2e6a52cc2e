//! The `Player` controller, the `Sink` seam and sink event types.

use std::time::Duration;

use rand::RngExt;

use crate::playlist::{Playlist, PlaylistError, TrackSeed, TrackSource};

/// What happens when the current track (or the whole list) runs out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RepeatMode {
    /// Stop at the end of the list.
    Off,
    /// Wrap around to the first track.
    All,
    /// Replay the current track when it ends.
    One,
}

impl Default for RepeatMode {
    fn default() -> Self {
        Self::Off
    }
}

impl RepeatMode {
    /// Cycle `Off -> All -> One -> Off`.
    pub fn cycled(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }
}

/// Commands the controller issues to the playback side.
///
/// Production is a channel into the rodio worker thread; tests record the
/// calls instead.
pub trait Sink {
    /// Begin loading a new source. The sink reports the duration with a
    /// [`SinkEvent::DurationKnown`] once decoding reveals it.
    fn load(&mut self, source: &TrackSource);
    fn play(&mut self);
    fn pause(&mut self);
    fn seek(&mut self, position: Duration);
    fn set_volume(&mut self, volume: f32);
}

/// Notifications the playback side delivers back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    Started,
    Paused,
    Position(Duration),
    DurationKnown(Duration),
    /// The current track played to its natural end.
    Completed,
    Failed(String),
}

/// The playback controller.
///
/// `playing` is flipped optimistically when a command is sent and reconciled
/// against `Started`/`Paused` sink events afterwards.
pub struct Player {
    pub playlist: Playlist,
    pub playing: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    volume: f32,
    pub position: Duration,
    pub duration: Option<Duration>,
}

impl Player {
    pub fn new(shuffle: bool, repeat: RepeatMode, volume: f32) -> Self {
        Self {
            playlist: Playlist::new(),
            playing: false,
            shuffle,
            repeat,
            volume: volume.clamp(0.0, 1.0),
            position: Duration::ZERO,
            duration: None,
        }
    }

    /// Replace the playlist contents and, when non-empty, load track 0
    /// without starting playback.
    pub fn replace(&mut self, seeds: Vec<TrackSeed>, sink: &mut impl Sink) {
        self.playlist.replace_all(seeds);
        self.playing = false;
        self.position = Duration::ZERO;
        self.duration = None;
        if !self.playlist.is_empty() {
            let _ = self.select(0, sink);
        }
    }

    /// Make the track at `index` current and hand its source to the sink.
    ///
    /// Progress resets here and stays unknown until the sink reports the new
    /// duration. The sink source and `current` are updated back to back on
    /// the caller's thread, so no observer can see them disagree.
    pub fn select(&mut self, index: usize, sink: &mut impl Sink) -> Result<(), PlaylistError> {
        let track = self.playlist.get(index)?;
        sink.load(&track.source);
        self.position = Duration::ZERO;
        self.duration = None;
        self.playlist.set_current(index);
        Ok(())
    }

    pub fn play(&mut self, sink: &mut impl Sink) {
        if self.playlist.current().is_some() {
            sink.play();
            self.playing = true;
        }
    }

    pub fn pause(&mut self, sink: &mut impl Sink) {
        if self.playing {
            sink.pause();
            self.playing = false;
        }
    }

    pub fn toggle(&mut self, sink: &mut impl Sink) {
        if self.playlist.current().is_none() {
            return;
        }
        if self.playing {
            self.pause(sink);
        } else {
            self.play(sink);
        }
    }

    /// Move to the next track: natural completion and the "next" command
    /// both land here.
    ///
    /// Decision order: repeat-one replays the current index; shuffle picks a
    /// different random index; otherwise the successor. Running past the end
    /// wraps under repeat-all, and otherwise parks on track 0 paused.
    pub fn advance(&mut self, sink: &mut impl Sink) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let Some(current) = self.playlist.current() else {
            let _ = self.select(0, sink);
            self.play(sink);
            return;
        };

        let target = if self.repeat == RepeatMode::One {
            current
        } else if self.shuffle {
            shuffle_target(current, len)
        } else {
            current + 1
        };

        if target >= len {
            if self.repeat == RepeatMode::All {
                let _ = self.select(0, sink);
                self.play(sink);
            } else {
                self.playing = false;
                sink.pause();
                let _ = self.select(0, sink);
            }
            return;
        }

        let _ = self.select(target, sink);
        self.play(sink);
    }

    /// Move to the previous track. Always wraps, regardless of repeat or
    /// shuffle mode.
    pub fn retreat(&mut self, sink: &mut impl Sink) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let current = self.playlist.current().unwrap_or(0);
        let target = (current + len - 1) % len;
        let _ = self.select(target, sink);
        self.play(sink);
    }

    pub fn toggle_shuffle(&mut self) {
        self.shuffle = !self.shuffle;
    }

    pub fn cycle_repeat(&mut self) {
        self.repeat = self.repeat.cycled();
    }

    /// Seek to a fraction of the track, `0.0` = start, `1.0` = end.
    /// A no-op until the duration is known.
    pub fn seek_to_fraction(&mut self, fraction: f64, sink: &mut impl Sink) {
        let Some(duration) = self.duration else {
            return;
        };
        let fraction = fraction.clamp(0.0, 1.0);
        let target = duration.mul_f64(fraction);
        sink.seek(target);
        self.position = target;
    }

    /// Seek forwards or backwards by `delta_seconds`, clamped to the track.
    pub fn seek_relative(&mut self, delta_seconds: i64, sink: &mut impl Sink) {
        if self.playlist.current().is_none() {
            return;
        }
        let current_secs = self.position.as_secs() as i64;
        let mut target_secs = (current_secs + delta_seconds).max(0);
        if let Some(duration) = self.duration {
            target_secs = target_secs.min(duration.as_secs() as i64);
        }
        let target = Duration::from_secs(target_secs as u64);
        sink.seek(target);
        self.position = target;
    }

    pub fn set_volume(&mut self, volume: f32, sink: &mut impl Sink) {
        self.volume = volume.clamp(0.0, 1.0);
        sink.set_volume(self.volume);
    }

    pub fn adjust_volume(&mut self, delta: f32, sink: &mut impl Sink) {
        self.set_volume(self.volume + delta, sink);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Single intake for sink notifications.
    ///
    /// Returns a user-visible message when the event warrants one (playback
    /// failures); all other events update state silently.
    pub fn handle_sink_event(&mut self, event: SinkEvent, sink: &mut impl Sink) -> Option<String> {
        match event {
            SinkEvent::Started => {
                self.playing = true;
                None
            }
            SinkEvent::Paused => {
                self.playing = false;
                None
            }
            SinkEvent::Position(position) => {
                self.position = position;
                None
            }
            SinkEvent::DurationKnown(duration) => {
                self.duration = Some(duration);
                if let Some(index) = self.playlist.current() {
                    self.playlist.set_duration(index, duration);
                }
                None
            }
            SinkEvent::Completed => {
                self.advance(sink);
                None
            }
            SinkEvent::Failed(reason) => {
                // No auto-advance on failure; the player cannot continue.
                self.playing = false;
                Some(format!("Playback failed: {reason}"))
            }
        }
    }
}

/// A uniformly random index in `[0, len)`, resampled until it differs from
/// `current` -- unless the list has a single track and no other choice.
fn shuffle_target(current: usize, len: usize) -> usize {
    if len == 1 {
        return current;
    }
    let mut rng = rand::rng();
    loop {
        let candidate = rng.random_range(0..len);
        if candidate != current {
            return candidate;
        }
    }
}
