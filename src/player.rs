//! Playback controller: transport state and the advancement policy.
//!
//! The controller owns the playlist store plus play/pause, shuffle, repeat,
//! volume and progress. It drives the audio side exclusively through the
//! [`Sink`] trait so tests can substitute a recording fake.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
