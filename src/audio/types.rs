//! Commands accepted by the audio worker thread.

use std::time::Duration;

use crate::playlist::TrackSource;

#[derive(Debug)]
pub enum SinkCmd {
    /// Swap in a new source. Remote sources are downloaded before decoding.
    Load(TrackSource),
    /// Resume (or start) the loaded source.
    Play,
    /// Pause without losing position.
    Pause,
    /// Jump to an absolute position in the current source.
    Seek(Duration),
    /// Set the output volume, `0.0..=1.0`.
    SetVolume(f32),
    /// Stop playback and exit the worker thread.
    Quit,
}
