//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model wraps the playback controller with the UI-side state:
//! cursor position, search filter, text prompts and the status line.

mod model;

pub use model::*;
