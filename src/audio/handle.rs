use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::player::{Sink, SinkEvent};
use crate::playlist::TrackSource;

use super::thread::spawn_sink_thread;
use super::types::SinkCmd;

/// Handle to the audio worker thread. Implements [`Sink`] by forwarding
/// every call as a [`SinkCmd`].
pub struct AudioSink {
    tx: Sender<SinkCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioSink {
    /// Spawn the worker and return the handle plus the event stream it
    /// reports on.
    pub fn spawn() -> (Self, Receiver<SinkEvent>) {
        let (tx, rx) = mpsc::channel::<SinkCmd>();
        let (events_tx, events_rx) = mpsc::channel::<SinkEvent>();
        let join = spawn_sink_thread(rx, events_tx);
        (
            Self {
                tx,
                join: Mutex::new(Some(join)),
            },
            events_rx,
        )
    }

    fn send(&self, cmd: SinkCmd) {
        // The worker outlives the UI except during shutdown; a send to a
        // dead worker is safely ignored.
        let _ = self.tx.send(cmd);
    }

    /// Stop playback, shut the worker down and wait for it.
    pub fn quit(&self) {
        self.send(SinkCmd::Quit);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}

impl Sink for AudioSink {
    fn load(&mut self, source: &TrackSource) {
        self.send(SinkCmd::Load(source.clone()));
    }

    fn play(&mut self) {
        self.send(SinkCmd::Play);
    }

    fn pause(&mut self) {
        self.send(SinkCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send(SinkCmd::Seek(position));
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(SinkCmd::SetVolume(volume));
    }
}
