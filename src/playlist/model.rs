//! Playlist model types: `Track`, `TrackSource` and the `Playlist` store.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Where the audio bytes for a track come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSource {
    /// A direct download URL (GitHub raw content).
    Remote { url: String },
    /// A file on the local filesystem.
    Local { path: PathBuf },
}

/// A not-yet-inserted track. Ids are assigned by [`Playlist::replace_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackSeed {
    pub title: String,
    pub artist: String,
    pub source: TrackSource,
}

impl TrackSeed {
    pub fn remote(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: "GitHub".to_string(),
            source: TrackSource::Remote { url: url.into() },
        }
    }

    pub fn local(title: impl Into<String>, path: PathBuf) -> Self {
        Self {
            title: title.into(),
            artist: "Local File".to_string(),
            source: TrackSource::Local { path },
        }
    }
}

/// One playable item in the playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Stable identity assigned at insertion, never reused across
    /// [`Playlist::replace_all`] calls.
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub source: TrackSource,
    /// Known once the sink has loaded the track, `None` until then.
    pub duration: Option<Duration>,
    /// Whether the async tag lookup found embedded cover art.
    pub has_cover: bool,
    /// Set once the async tag lookup for this track has been started.
    pub tags_requested: bool,
}

impl Track {
    /// Local path for this track, if it is a local one.
    pub fn local_path(&self) -> Option<&PathBuf> {
        match &self.source {
            TrackSource::Local { path } => Some(path),
            TrackSource::Remote { .. } => None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("track index {0} out of range")]
    OutOfRange(usize),
}

/// The playlist store: an ordered track list plus the current selection.
///
/// `current` is either `None` or a valid index into `tracks`; it is reset to
/// `None` whenever the list is replaced.
#[derive(Debug, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: Option<usize>,
    next_id: u64,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all prior contents and insert `seeds` in order, assigning
    /// fresh ids. Resets `current`. An empty list is valid.
    pub fn replace_all(&mut self, seeds: Vec<TrackSeed>) {
        self.tracks = seeds
            .into_iter()
            .map(|seed| {
                let id = self.next_id;
                self.next_id += 1;
                Track {
                    id,
                    title: seed.title,
                    artist: seed.artist,
                    source: seed.source,
                    duration: None,
                    has_cover: false,
                    tags_requested: false,
                }
            })
            .collect();
        self.current = None;
    }

    /// Patch title/artist/cover for the track with the given id.
    ///
    /// Empty or missing values leave the existing (placeholder) field alone.
    /// Returns the track's index when applied, or `None` when the id is no
    /// longer present -- the list was replaced while the lookup was in
    /// flight, and the stale result must be discarded.
    pub fn update_metadata(
        &mut self,
        id: u64,
        title: Option<&str>,
        artist: Option<&str>,
        has_cover: bool,
    ) -> Option<usize> {
        let index = self.position_of(id)?;
        let track = &mut self.tracks[index];
        if let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) {
            track.title = t.to_string();
        }
        if let Some(a) = artist.map(str::trim).filter(|a| !a.is_empty()) {
            track.artist = a.to_string();
        }
        if has_cover {
            track.has_cover = true;
        }
        Some(index)
    }

    pub fn get(&self, index: usize) -> Result<&Track, PlaylistError> {
        self.tracks.get(index).ok_or(PlaylistError::OutOfRange(index))
    }

    pub fn position_of(&self, id: u64) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The currently selected track, if any.
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        debug_assert!(index < self.tracks.len());
        self.current = Some(index);
    }

    /// Record the sink-reported duration on the track at `index`.
    pub fn set_duration(&mut self, index: usize, duration: Duration) {
        if let Some(track) = self.tracks.get_mut(index) {
            track.duration = Some(duration);
        }
    }

    /// Mark that the tag lookup for the track at `index` has been kicked off.
    pub fn mark_tags_requested(&mut self, index: usize) {
        if let Some(track) = self.tracks.get_mut(index) {
            track.tags_requested = true;
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
