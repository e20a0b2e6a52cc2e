//! Decoding helpers for the audio worker.
//!
//! Local tracks are decoded straight from the file; remote tracks are
//! downloaded into memory first, since rodio needs a seekable reader.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::time::Duration;

use rodio::{Decoder, Sink, Source};

use crate::playlist::TrackSource;

/// Decode `source` and append it to `sink`, returning the duration when the
/// decoder can tell it up front (some mp3 streams cannot).
pub(super) fn append_source(
    sink: &Sink,
    source: &TrackSource,
    client: &reqwest::blocking::Client,
) -> Result<Option<Duration>, String> {
    match source {
        TrackSource::Local { path } => {
            let file =
                File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;
            let decoder = Decoder::new(BufReader::new(file))
                .map_err(|e| format!("failed to decode {}: {e}", path.display()))?;
            let duration = decoder.total_duration();
            sink.append(decoder);
            Ok(duration)
        }
        TrackSource::Remote { url } => {
            let response = client
                .get(url)
                .send()
                .and_then(|r| r.error_for_status())
                .map_err(|e| format!("download failed: {e}"))?;
            let bytes = response
                .bytes()
                .map_err(|e| format!("download failed: {e}"))?;
            let decoder = Decoder::new(Cursor::new(bytes.to_vec()))
                .map_err(|e| format!("failed to decode {url}: {e}"))?;
            let duration = decoder.total_duration();
            sink.append(decoder);
            Ok(duration)
        }
    }
}
