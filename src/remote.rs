//! Remote playlist loading from the GitHub contents API.
//!
//! A path like `user/repo/path/to/songs` maps to
//! `https://api.github.com/repos/user/repo/contents/path/to/songs`, which
//! returns either a JSON array of directory entries or an error object with
//! a `message`. The fetch runs on a fire-and-forget thread; its outcome is
//! delivered to the event loop as a [`FetchOutcome`].

use std::sync::mpsc::Sender;
use std::thread;

use serde::Deserialize;
use thiserror::Error;

use crate::library::{is_audio_name, placeholder_title};
use crate::playlist::TrackSeed;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Invalid path format. Please use user/repo/path.")]
    InvalidPath,
    #[error("Could not load from GitHub: {0}")]
    Http(String),
    #[error("Error: {0}")]
    Api(String),
}

/// A parsed `user/repo/sub/dir` path.
#[derive(Debug, PartialEq, Eq)]
pub struct RepoPath {
    pub owner: String,
    pub repo: String,
    pub path: String,
}

/// Split a raw path into owner, repo and the in-repo directory.
/// Fewer than 3 segments is a format error.
pub fn parse_repo_path(raw: &str) -> Result<RepoPath, RemoteError> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() < 3 || parts.iter().any(|p| p.is_empty()) {
        return Err(RemoteError::InvalidPath);
    }
    Ok(RepoPath {
        owner: parts[0].to_string(),
        repo: parts[1].to_string(),
        path: parts[2..].join("/"),
    })
}

fn api_url(repo_path: &RepoPath) -> String {
    format!(
        "https://api.github.com/repos/{}/{}/contents/{}",
        repo_path.owner, repo_path.repo, repo_path.path
    )
}

#[derive(Debug, Deserialize)]
struct DirEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    download_url: Option<String>,
}

/// The contents API answers with a listing on success and an object
/// carrying `message` otherwise (bad path, rate limit, private repo).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Listing {
    Entries(Vec<DirEntry>),
    Failure { message: String },
}

fn seeds_from_listing(
    listing: Listing,
    extensions: &[String],
) -> Result<Vec<TrackSeed>, RemoteError> {
    let entries = match listing {
        Listing::Entries(entries) => entries,
        Listing::Failure { message } => return Err(RemoteError::Api(message)),
    };

    Ok(entries
        .into_iter()
        .filter(|e| e.kind == "file" && is_audio_name(&e.name, extensions))
        .filter_map(|e| {
            let title = placeholder_title(&e.name, extensions);
            e.download_url.map(|url| TrackSeed::remote(title, url))
        })
        .collect())
}

/// Fetch and filter the directory listing for `raw` synchronously.
///
/// An empty result is not an error; the caller renders the empty-state
/// message.
pub fn fetch(raw: &str, extensions: &[String]) -> Result<Vec<TrackSeed>, RemoteError> {
    let repo_path = parse_repo_path(raw)?;

    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("vivace/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| RemoteError::Http(e.to_string()))?;

    // Error statuses still carry a JSON body with `message`; parse the body
    // either way and let the untagged enum sort it out.
    let listing: Listing = client
        .get(api_url(&repo_path))
        .send()
        .map_err(|e| RemoteError::Http(e.to_string()))?
        .json()
        .map_err(|e| RemoteError::Http(e.to_string()))?;

    seeds_from_listing(listing, extensions)
}

/// What the background fetch reports back to the event loop.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The raw path the fetch was started with.
    pub path: String,
    pub result: Result<Vec<TrackSeed>, RemoteError>,
}

/// Run [`fetch`] on a worker thread and deliver the outcome over `tx`.
/// The thread is not joined; a dropped receiver just discards the result.
pub fn spawn_fetch(path: String, extensions: Vec<String>, tx: Sender<FetchOutcome>) {
    thread::spawn(move || {
        let result = fetch(&path, &extensions);
        let _ = tx.send(FetchOutcome { path, result });
    });
}
