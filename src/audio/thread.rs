use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink};

use crate::player::SinkEvent;

use super::source::append_source;
use super::types::SinkCmd;

const TICK: Duration = Duration::from_millis(200);

pub(super) fn spawn_sink_thread(
    rx: Receiver<SinkCmd>,
    events: Sender<SinkEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                let _ = events.send(SinkEvent::Failed(format!("no audio output device: {e}")));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("vivace/", env!("CARGO_PKG_VERSION")))
            .build();

        let mut sink: Option<Sink> = None;
        let mut playing = false;
        let mut volume: f32 = 1.0;

        loop {
            match rx.recv_timeout(TICK) {
                Ok(SinkCmd::Load(track_source)) => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }
                    playing = false;

                    let client = match client.as_ref() {
                        Ok(c) => c,
                        Err(e) => {
                            let _ = events.send(SinkEvent::Failed(format!("http client: {e}")));
                            continue;
                        }
                    };

                    // Downloads block this thread; the controller stays
                    // responsive and simply queues further commands.
                    let new_sink = Sink::connect_new(stream.mixer());
                    new_sink.set_volume(volume);
                    match append_source(&new_sink, &track_source, client) {
                        Ok(duration) => {
                            new_sink.pause();
                            if let Some(d) = duration {
                                let _ = events.send(SinkEvent::DurationKnown(d));
                            }
                            sink = Some(new_sink);
                        }
                        Err(reason) => {
                            new_sink.stop();
                            let _ = events.send(SinkEvent::Failed(reason));
                        }
                    }
                }
                Ok(SinkCmd::Play) => {
                    if let Some(s) = sink.as_ref() {
                        s.play();
                        playing = true;
                        let _ = events.send(SinkEvent::Started);
                    }
                }
                Ok(SinkCmd::Pause) => {
                    if let Some(s) = sink.as_ref() {
                        s.pause();
                        playing = false;
                        let _ = events.send(SinkEvent::Paused);
                    }
                }
                Ok(SinkCmd::Seek(position)) => {
                    if let Some(s) = sink.as_ref() {
                        // Not every decoder supports seeking; a failed seek
                        // just keeps the current position.
                        if s.try_seek(position).is_ok() {
                            let _ = events.send(SinkEvent::Position(position));
                        }
                    }
                }
                Ok(SinkCmd::SetVolume(v)) => {
                    volume = v;
                    if let Some(s) = sink.as_ref() {
                        s.set_volume(v);
                    }
                }
                Ok(SinkCmd::Quit) => {
                    if let Some(s) = sink.as_ref() {
                        s.stop();
                    }
                    break;
                }
                Err(RecvTimeoutError::Timeout) => {
                    if !playing {
                        continue;
                    }
                    if let Some(s) = sink.as_ref() {
                        if s.empty() {
                            // Natural end of the current track.
                            sink = None;
                            playing = false;
                            let _ = events.send(SinkEvent::Completed);
                        } else {
                            let _ = events.send(SinkEvent::Position(s.get_pos()));
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
