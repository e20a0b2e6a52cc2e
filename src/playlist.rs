//! Playlist store: the ordered track list and the current selection.
//!
//! The store is replaced wholesale on every load operation; tracks carry a
//! stable id so late async tag lookups can be matched (or discarded) safely.

mod model;

pub use model::*;
