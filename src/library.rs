//! Local library loading: turn a directory into placeholder tracks.
//!
//! Tag reading is deliberately not done here; tracks start with a
//! filename-derived title and the async lookup in [`crate::metadata`]
//! patches the real tags in later.

use std::path::Path;

use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::playlist::TrackSeed;

/// Normalize configured extensions: trim, drop leading dots, lowercase.
fn normalized(extensions: &[String]) -> Vec<String> {
    extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Whether `name` ends in one of the recognized audio extensions
/// (case-insensitive).
pub fn is_audio_name(name: &str, extensions: &[String]) -> bool {
    let exts = normalized(extensions);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        }
        _ => false,
    }
}

/// Filename with a recognized audio extension stripped; used as the
/// placeholder title until real tags arrive.
pub fn placeholder_title(name: &str, extensions: &[String]) -> String {
    if is_audio_name(name, extensions) {
        if let Some((stem, _)) = name.rsplit_once('.') {
            return stem.to_string();
        }
    }
    name.to_string()
}

/// Scan `dir` for audio files and build placeholder seeds, sorted by title.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<TrackSeed> {
    let mut seeds: Vec<TrackSeed> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if !is_audio_name(name, &settings.extensions) {
            continue;
        }
        seeds.push(TrackSeed::local(
            placeholder_title(name, &settings.extensions),
            path.to_path_buf(),
        ));
    }

    seeds.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    seeds
}
