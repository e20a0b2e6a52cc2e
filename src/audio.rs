//! Audio subsystem: a rodio-backed worker thread behind the
//! [`Sink`](crate::player::Sink) trait.
//!
//! The worker receives [`SinkCmd`]s over an mpsc channel and reports
//! [`SinkEvent`](crate::player::SinkEvent)s back to the event loop, which
//! feeds them into the controller one at a time.

mod handle;
mod source;
mod thread;
mod types;

pub use handle::AudioSink;
pub use types::SinkCmd;
