//! Async tag resolution for local tracks.
//!
//! Tracks are inserted with filename-derived placeholders; a worker thread
//! reads the real tags with lofty and reports a [`TagOutcome`] keyed by the
//! track's stable id. The event loop applies the merge (or discards it when
//! the id is gone).

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

use lofty::file::TaggedFileExt;
use lofty::tag::ItemKey;

/// Best-effort tags read from a local file. Fields the file does not carry
/// stay `None` and the placeholders win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub has_cover: bool,
}

/// Result of one lookup. `tags` is `None` when the file could not be read
/// or parsed; the lookup is best-effort and failure is silent.
#[derive(Debug)]
pub struct TagOutcome {
    pub id: u64,
    pub tags: Option<ResolvedTags>,
}

/// Read title/artist/cover presence from the file's primary tag.
pub fn read_tags(path: &Path) -> Option<ResolvedTags> {
    let tagged = lofty::read_from_path(path).ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;

    let mut tags = ResolvedTags::default();
    if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
        let v = v.trim();
        if !v.is_empty() {
            tags.title = Some(v.to_string());
        }
    }
    if let Some(v) = tag.get_string(ItemKey::TrackArtist) {
        let v = v.trim();
        if !v.is_empty() {
            tags.artist = Some(v.to_string());
        }
    }
    tags.has_cover = !tag.pictures().is_empty();
    Some(tags)
}

/// Resolve tags for one track on a worker thread and deliver the outcome
/// over `tx`. No cancellation: if the playlist was replaced meanwhile, the
/// stale id makes the receiver drop the result.
pub fn spawn_resolve(id: u64, path: PathBuf, tx: Sender<TagOutcome>) {
    thread::spawn(move || {
        let tags = read_tags(&path);
        let _ = tx.send(TagOutcome { id, tags });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn unreadable_file_yields_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("not-audio.mp3");
        fs::write(&path, b"definitely not an mp3").unwrap();
        assert_eq!(read_tags(&path), None);
    }

    #[test]
    fn missing_file_yields_none() {
        assert_eq!(read_tags(Path::new("/nonexistent/file.mp3")), None);
    }
}
